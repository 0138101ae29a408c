//! Type introspection: the active field descriptors of a record type.
//!
//! Descriptors come from the static [`TypeInfo`] of the type, produced by
//! `#[derive(Frame)]` and materialized on first access. Ignored fields are
//! skipped, the rest is yielded in declaration order.
//!
//! ```
//! use fw_frame::derive::Frame;
//! use fw_frame::introspect;
//!
//! #[derive(Frame)]
//! struct Sample {
//!     id: u32,
//!     #[frame(ignore)]
//!     note: String,
//!     value: f32,
//! }
//!
//! let names: Vec<_> = introspect::active_fields::<Sample>()
//!     .unwrap()
//!     .map(|field| field.name())
//!     .collect();
//! assert_eq!(names, ["id", "value"]);
//! ```
//!
//! [`TypeInfo`]: crate::info::TypeInfo

use core::iter::FusedIterator;
use core::slice;

use crate::info::{CompositeInfo, FieldInfo, FrameKindError, Typed};

/// Returns the type descriptor of the record type `T`.
#[inline]
pub fn record_info<T: Typed>() -> Result<&'static CompositeInfo, FrameKindError> {
    T::type_info().as_composite()
}

/// Returns the active fields of the record type `T`.
#[inline]
pub fn active_fields<T: Typed>() -> Result<ActiveFields<'static>, FrameKindError> {
    record_info::<T>().map(CompositeInfo::active_fields)
}

/// Iterator over the non-ignored fields of a composite, see
/// [`CompositeInfo::active_fields`].
#[derive(Clone)]
pub struct ActiveFields<'a> {
    inner: slice::Iter<'a, FieldInfo>,
}

impl<'a> ActiveFields<'a> {
    #[inline]
    pub(crate) fn new(fields: &'a [FieldInfo]) -> Self {
        Self {
            inner: fields.iter(),
        }
    }
}

impl<'a> Iterator for ActiveFields<'a> {
    type Item = &'a FieldInfo;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find(|field| !field.is_ignored())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl DoubleEndedIterator for ActiveFields<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.rfind(|field| !field.is_ignored())
    }
}

impl FusedIterator for ActiveFields<'_> {}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::derive::Frame;

    #[derive(Frame)]
    struct Pair(#[frame(ignore)] u64, u8, i8);

    #[test]
    fn tuple_fields_are_numbered() {
        let info = super::record_info::<Pair>().unwrap();
        assert!(info.is_tuple());
        assert_eq!(info.field_len(), 3);

        let fields: Vec<_> = super::active_fields::<Pair>().unwrap().collect();
        let names: Vec<_> = fields.iter().map(|f| f.name()).collect();
        assert_eq!(names, ["1", "2"]);
        assert_eq!(fields[0].index(), 1);
        assert!(fields[1].type_is::<i8>());

        let last = super::active_fields::<Pair>().unwrap().next_back().unwrap();
        assert_eq!(last.name(), "2");
        assert!(super::active_fields::<u8>().is_err());
    }
}
