use alloc::string::String;

use thiserror::Error;

use crate::info::FrameKind;

/// An error that occurs while building a [`FramePlan`](crate::plan::FramePlan).
///
/// A failed build is cached like a successful one, so the error is `Clone`
/// and every caller asking for the same type receives a copy.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// A field has a type without a flat layout and no custom conversion.
    ///
    /// `field` is the dotted path from the record to the offending field.
    #[error("`{record}`: field `{field}` of type `{field_type}` cannot be written")]
    UnsupportedType {
        record: &'static str,
        field: String,
        field_type: &'static str,
    },
    /// The type itself is not a struct or tuple struct.
    #[error("`{record}` is not a record type: expected Composite, received {kind}")]
    NotARecord {
        record: &'static str,
        kind: FrameKind,
    },
}
