use core::any::Any;

use alloc::vec::Vec;

use crate::info::{Type, TypePath, impl_type_fn};

// -----------------------------------------------------------------------------
// Primitive

/// A scalar written as raw little-endian bytes.
///
/// Implemented for `u8`-`u128`, `i8`-`i128`, `f32`, `f64`, `bool` (1 byte),
/// `char` (4 bytes, the scalar value) and `usize`/`isize` (8 bytes on every
/// target).
pub trait Primitive: Copy + TypePath {
    /// Number of bytes [`put_le`](Primitive::put_le) appends.
    const WIDTH: usize;

    /// Appends the little-endian bytes of `self` to `out`.
    fn put_le(self, out: &mut Vec<u8>);
}

/// Type-erased [`Primitive::put_le`].
///
/// Returns `false` if the value is not of the described type.
pub type EncodeFn = fn(&dyn Any, &mut Vec<u8>) -> bool;

fn encode_as<T: Primitive>(value: &dyn Any, out: &mut Vec<u8>) -> bool {
    match value.downcast_ref::<T>() {
        Some(value) => {
            value.put_le(out);
            true
        }
        None => false,
    }
}

// -----------------------------------------------------------------------------
// PrimitiveInfo

/// Frame description of a [`Primitive`] scalar.
#[derive(Clone, Debug)]
pub struct PrimitiveInfo {
    ty: Type,
    width: usize,
    encode: EncodeFn,
}

impl PrimitiveInfo {
    impl_type_fn!(ty);

    #[inline]
    pub const fn new<T: Primitive>() -> Self {
        Self {
            ty: Type::of::<T>(),
            width: T::WIDTH,
            encode: encode_as::<T>,
        }
    }

    /// Encoded width in bytes.
    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Appends the encoded `value` to `out`, see [`EncodeFn`].
    #[inline]
    pub fn encode(&self, value: &dyn Any, out: &mut Vec<u8>) -> bool {
        (self.encode)(value, out)
    }

    #[inline]
    pub const fn encoder(&self) -> EncodeFn {
        self.encode
    }
}
