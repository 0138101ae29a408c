#![allow(clippy::len_without_is_empty, reason = "`len` is fixed for array.")]

use core::any::Any;

use crate::info::{Type, TypeInfo, Typed, impl_type_fn};

/// Type-erased element access of a fixed-size array.
///
/// Returns `None` if the value is not of the described array type
/// or the index is out of bounds.
pub type ItemFn = fn(&dyn Any, usize) -> Option<&dyn Any>;

fn item_of<T: 'static, const N: usize>(array: &dyn Any, index: usize) -> Option<&dyn Any> {
    let item = array.downcast_ref::<[T; N]>()?.get(index)?;
    Some(item as &dyn Any)
}

/// Frame description of `[T; N]`.
#[derive(Clone, Debug)]
pub struct ArrayInfo {
    ty: Type,
    len: usize,
    // `TypeInfo` is created on first access, use a function pointer to delay it.
    item_info: fn() -> &'static TypeInfo,
    item_at: ItemFn,
}

impl ArrayInfo {
    impl_type_fn!(ty);

    #[inline]
    pub const fn new<T: Typed, const N: usize>() -> Self {
        Self {
            ty: Type::of::<[T; N]>(),
            len: N,
            item_info: T::type_info,
            item_at: item_of::<T, N>,
        }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    /// Returns the element at `index` of `array`.
    #[inline]
    pub fn item<'a>(&self, array: &'a dyn Any, index: usize) -> Option<&'a dyn Any> {
        (self.item_at)(array, index)
    }

    #[inline]
    pub const fn item_accessor(&self) -> ItemFn {
        self.item_at
    }
}
