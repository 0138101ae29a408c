use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;
use core::ops::Deref;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{OnceLock, PoisonError, RwLock};

use fw_utils::TypeIdMap;

use crate::info::{TypeInfo, Typed};
use crate::plan::{FramePlan, PlanBuilder, PlanError};

// A failed build is stored like a plan, so it is never retried.
type PlanSlot = OnceLock<Result<Arc<FramePlan>, PlanError>>;

// -----------------------------------------------------------------------------
// PlanState

/// State of one [`PlanRegistry`] entry.
///
/// An entry moves from `Absent` to `Building` to `Ready` or `Failed`
/// exactly once and is never evicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanState {
    Absent,
    Building,
    Ready,
    Failed,
}

// -----------------------------------------------------------------------------
// PlanRegistry

/// A registry of serialization plans keyed by [`TypeId`].
///
/// [`get_or_build`](Self::get_or_build) builds a type's plan on first use
/// and returns the cached one afterwards. Concurrent first calls for the
/// same type block on one in-flight build; builds of different types run
/// independently.
///
/// # Examples
///
/// ```
/// use fw_frame::derive::Frame;
/// use fw_frame::registry::PlanRegistry;
///
/// #[derive(Frame)]
/// struct Sample {
///     id: u32,
///     value: f32,
/// }
///
/// let registry = PlanRegistry::new();
/// let plan = registry.get_or_build::<Sample>().unwrap();
/// let again = registry.get_or_build::<Sample>().unwrap();
///
/// assert!(std::sync::Arc::ptr_eq(&plan, &again));
/// assert_eq!(registry.builds(), 1);
/// ```
pub struct PlanRegistry {
    slots: RwLock<TypeIdMap<Arc<PlanSlot>>>,
    builds: AtomicUsize,
}

impl Default for PlanRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl PlanRegistry {
    /// Creates an empty registry.
    ///
    /// `const`, so a registry can be a `static`.
    #[inline]
    pub const fn new() -> Self {
        Self {
            slots: RwLock::new(TypeIdMap::new()),
            builds: AtomicUsize::new(0),
        }
    }

    /// Returns the plan of `T`, building it if this is the first request.
    ///
    /// A failed build is returned to this caller, to every caller waiting
    /// on the same build and to every later caller.
    #[inline]
    pub fn get_or_build<T: Typed>(&self) -> Result<Arc<FramePlan>, PlanError> {
        // Separate to reduce code compilation times
        self.get_or_build_by_id(TypeId::of::<T>(), T::type_info)
    }

    #[inline(never)]
    fn get_or_build_by_id(
        &self,
        type_id: TypeId,
        type_info: fn() -> &'static TypeInfo,
    ) -> Result<Arc<FramePlan>, PlanError> {
        // The map lock is released here, the build only holds the slot.
        let slot = self.slot(type_id);
        slot.get_or_init(|| self.build(type_info())).clone()
    }

    fn slot(&self, type_id: TypeId) -> Arc<PlanSlot> {
        if let Some(slot) = self
            .slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
        {
            return slot.clone();
        }

        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, Default::default)
            .clone()
    }

    fn build(&self, info: &'static TypeInfo) -> Result<Arc<FramePlan>, PlanError> {
        self.builds.fetch_add(1, Ordering::Relaxed);

        match PlanBuilder::build_info(info) {
            Ok(plan) => {
                log::debug!(
                    "built frame plan for `{}`: {} fields, {} bytes",
                    info.type_path(),
                    plan.steps().len(),
                    FixedSize(plan.fixed_size()),
                );
                Ok(Arc::new(plan))
            }
            Err(err) => {
                log::debug!("frame plan build failed: {err}");
                Err(err)
            }
        }
    }

    /// Returns the ready plan of `T` without building it.
    #[inline]
    pub fn get<T: ?Sized + 'static>(&self) -> Option<Arc<FramePlan>> {
        self.get_by_id(&TypeId::of::<T>())
    }

    /// Returns the ready plan of the type without building it.
    pub fn get_by_id(&self, type_id: &TypeId) -> Option<Arc<FramePlan>> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        match slots.get(type_id)?.get()? {
            Ok(plan) => Some(plan.clone()),
            Err(_) => None,
        }
    }

    /// Returns the state of the entry of `T`.
    pub fn state<T: ?Sized + 'static>(&self) -> PlanState {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        match slots.get_type::<T>().map(|slot| slot.get()) {
            None => PlanState::Absent,
            Some(None) => PlanState::Building,
            Some(Some(Ok(_))) => PlanState::Ready,
            Some(Some(Err(_))) => PlanState::Failed,
        }
    }

    /// Returns `true` if the plan of `T` is ready.
    #[inline]
    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.state::<T>() == PlanState::Ready
    }

    /// Number of ready plans.
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|slot| matches!(slot.get(), Some(Ok(_))))
            .count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of plan builds executed, failed ones included.
    #[inline]
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for PlanRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanRegistry")
            .field("len", &self.len())
            .field("builds", &self.builds())
            .finish()
    }
}

struct FixedSize(Option<usize>);

impl fmt::Display for FixedSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(size) => write!(f, "{size}"),
            None => f.write_str("variable"),
        }
    }
}

// -----------------------------------------------------------------------------
// PlanRegistryArc

/// A shared [`PlanRegistry`].
///
/// The registry synchronizes internally, so this is a plain [`Arc`]
/// dereferencing to it.
#[derive(Clone, Default)]
pub struct PlanRegistryArc {
    /// The wrapped [`PlanRegistry`].
    pub internal: Arc<PlanRegistry>,
}

impl Deref for PlanRegistryArc {
    type Target = PlanRegistry;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.internal
    }
}

impl fmt::Debug for PlanRegistryArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.internal.fmt(f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use std::sync::Barrier;
    use std::thread;

    use super::{PlanRegistry, PlanRegistryArc, PlanState};
    use crate::derive::Frame;
    use crate::plan::PlanError;

    #[derive(Frame)]
    struct Reading {
        sensor: u16,
        value: f64,
    }

    #[derive(Frame)]
    struct Broken {
        id: u32,
        text: String,
    }

    #[test]
    fn builds_once() {
        let registry = PlanRegistry::new();
        assert_eq!(registry.state::<Reading>(), PlanState::Absent);
        assert!(registry.get::<Reading>().is_none());

        for _ in 0..1000 {
            registry.get_or_build::<Reading>().unwrap();
        }

        assert_eq!(registry.builds(), 1);
        assert_eq!(registry.state::<Reading>(), PlanState::Ready);
        assert!(registry.contains::<Reading>());
        assert_eq!(registry.len(), 1);
        assert!(registry.get::<Reading>().is_some());
    }

    #[test]
    fn concurrent_first_use() {
        const THREADS: usize = 8;

        let registry = PlanRegistryArc::default();
        let barrier = Barrier::new(THREADS);

        let plans: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        registry.get_or_build::<Reading>().unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(registry.builds(), 1);
        assert!(plans.iter().all(|plan| Arc::ptr_eq(plan, &plans[0])));
    }

    #[test]
    fn failure_is_shared() {
        const THREADS: usize = 4;

        let registry = PlanRegistry::new();
        let barrier = Barrier::new(THREADS);

        let errors: Vec<PlanError> = thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        registry.get_or_build::<Broken>().unwrap_err()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let later = registry.get_or_build::<Broken>().unwrap_err();
        assert!(errors.iter().all(|err| *err == later));
        assert!(matches!(later, PlanError::UnsupportedType { field_type: "String", .. }));

        assert_eq!(registry.builds(), 1);
        assert_eq!(registry.state::<Broken>(), PlanState::Failed);
        assert!(!registry.contains::<Broken>());
        assert!(registry.is_empty());
    }

    #[test]
    fn independent_types() {
        let registry = PlanRegistry::new();
        registry.get_or_build::<Reading>().unwrap();
        registry.get_or_build::<Broken>().unwrap_err();
        registry.get_or_build::<Reading>().unwrap();

        assert_eq!(registry.builds(), 2);
        assert_eq!(registry.len(), 1);
    }
}
