use alloc::boxed::Box;

use crate::header::FrameHeader;
use crate::info::{Type, impl_type_fn};
use crate::plan::PlanStep;
use crate::plan::op::steps_fixed_size;

/// The serialization plan of one record type.
///
/// One [`PlanStep`] per active top-level field, in declaration order.
/// A plan is built once by [`PlanBuilder`](crate::plan::PlanBuilder),
/// cached in a [`PlanRegistry`](crate::registry::PlanRegistry) and replayed
/// for every record, see [`FramePlan::write`].
#[derive(Debug, Clone)]
pub struct FramePlan {
    ty: Type,
    steps: Box<[PlanStep]>,
    header: FrameHeader,
}

impl FramePlan {
    impl_type_fn!(ty);

    #[inline]
    pub(crate) fn new(ty: Type, steps: Box<[PlanStep]>, header: FrameHeader) -> Self {
        Self { ty, steps, header }
    }

    #[inline]
    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    /// The schema emitted before the first record of a stream.
    #[inline]
    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    /// Byte length of every record of this type.
    ///
    /// `None` if a field uses a custom conversion, whose output length
    /// is only known per value.
    pub fn fixed_size(&self) -> Option<usize> {
        steps_fixed_size(&self.steps)
    }
}
