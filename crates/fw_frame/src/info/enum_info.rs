use core::any::Any;

use alloc::boxed::Box;

use crate::info::{Type, TypePath, impl_type_fn};

/// Type-erased discriminant read of a fieldless enum.
///
/// Returns `None` if the value is not of the described type.
pub type WideFn = fn(&dyn Any) -> Option<i64>;

/// Frame description of a fieldless enum.
///
/// Enums are always written as their discriminant sign-extended to `i64`,
/// whatever the storage [`repr`](EnumInfo::repr) is.
///
/// ```
/// use fw_frame::derive::Frame;
/// use fw_frame::info::Typed;
///
/// #[derive(Frame)]
/// #[repr(i64)]
/// enum Offset {
///     Back = -1,
///     Far = i64::MAX,
/// }
///
/// let info = Offset::type_info().as_enum().unwrap();
/// assert_eq!(info.repr(), "i64");
/// assert_eq!(info.to_wide(&Offset::Back), Some(-1));
/// ```
///
/// 128-bit discriminants do not fit, such enums cannot derive `Frame`:
///
/// ```compile_fail
/// use fw_frame::derive::Frame;
///
/// #[derive(Frame)]
/// #[repr(u128)]
/// enum Huge {
///     Big = 1 << 100,
/// }
/// ```
#[derive(Clone, Debug)]
pub struct EnumInfo {
    ty: Type,
    repr: &'static str,
    variant_names: Box<[&'static str]>,
    to_wide: WideFn,
}

impl EnumInfo {
    impl_type_fn!(ty);

    /// Creates the info of `T`.
    ///
    /// `repr` is the storage integer (`"isize"` without a `#[repr]`).
    pub fn new<T: TypePath>(repr: &'static str, variants: &[&'static str], to_wide: WideFn) -> Self {
        Self {
            ty: Type::of::<T>(),
            repr,
            variant_names: variants.into(),
            to_wide,
        }
    }

    #[inline]
    pub const fn repr(&self) -> &'static str {
        self.repr
    }

    #[inline]
    pub fn variant_names(&self) -> &[&'static str] {
        &self.variant_names
    }

    #[inline]
    pub fn variant_len(&self) -> usize {
        self.variant_names.len()
    }

    pub fn contains_variant(&self, name: &str) -> bool {
        self.variant_names.iter().any(|v| *v == name)
    }

    /// Reads the discriminant of `value` as `i64`.
    #[inline]
    pub fn to_wide(&self, value: &dyn Any) -> Option<i64> {
        (self.to_wide)(value)
    }

    #[inline]
    pub const fn widener(&self) -> WideFn {
        self.to_wide
    }
}
