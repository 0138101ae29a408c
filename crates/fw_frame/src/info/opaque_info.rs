use crate::info::{Type, TypePath, impl_type_fn};

/// Frame description of a type that is known by name but cannot be
/// flattened, e.g. `String`, `Vec<T>` or a `#[frame(opaque)]` type.
///
/// Such fields need a custom conversion or `#[frame(ignore)]`,
/// otherwise the plan build fails.
#[derive(Debug, Clone)]
pub struct OpaqueInfo {
    ty: Type,
}

impl OpaqueInfo {
    impl_type_fn!(ty);

    #[inline]
    pub const fn new<T: TypePath + ?Sized>() -> Self {
        Self { ty: Type::of::<T>() }
    }
}
