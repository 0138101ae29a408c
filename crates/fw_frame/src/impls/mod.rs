//! Frame descriptions of foreign types and utilities for implementing
//! [`TypePath`] and [`Typed`].
//!
//! - [`concat`]: An efficient string concatenation function.
//! - [`NonGenericTypeInfoCell`]: Used to implement [`Typed`] for non-generic types.
//! - [`GenericTypePathCell`]: Used to implement [`TypePath`] for generic types.
//! - [`GenericTypeInfoCell`]: Used to implement [`Typed`] for generic types.
//!
//! ## Implemented Menu
//!
//! - primitive: `u8`-`u128`, `i8`-`i128`, `usize`, `isize`, `f32`, `f64`, `bool`, `char`
//! - array: `[T; N]`
//! - opaque: `String`, `&'static str`, `Vec<T>`, `Option<T>`
//!
//! [`TypePath`]: crate::info::TypePath
//! [`Typed`]: crate::info::Typed

// -----------------------------------------------------------------------------
// Modules

mod cell;

// String, &'static str, Vec<T>, Option<T>
mod alloc;
// [T; N]
mod array;
// u8 - u128, i8 - i128, f32, f64, usize, isize, bool, char
mod primitive;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};
pub use cell::{GenericTypeCell, NonGenericTypeCell};

/// An efficient string concatenation function.
///
/// This is usually used for the implementation of `TypePath`.
///
/// # Example
///
/// ```
/// use fw_frame::impls;
///
/// let s = impls::concat(&["module", "::", "name", "<", "T" , ">"]);
///
/// assert_eq!(s.capacity(), 15);
/// ```
///
/// Inline is prohibited here to reduce compilation time.
#[inline(never)]
pub fn concat(arr: &[&str]) -> ::alloc::string::String {
    let len = arr.iter().map(|item| item.len()).sum();
    let mut res = ::alloc::string::String::with_capacity(len);
    for &item in arr {
        res.push_str(item);
    }
    res
}
