use crate::info::{TypeInfo, TypePath};

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to the frame description of a type.
///
/// This is the input of the plan builder: for a record type it yields the
/// ordered field descriptors, for leaf types it tells how the value is
/// flattened into bytes.
///
/// The returned [`TypeInfo`] is created on first access and lives for the
/// rest of the process.
///
/// # Implementation
///
/// Derive it with [`#[derive(Frame)]`](crate::derive::Frame):
///
/// ```
/// use fw_frame::derive::Frame;
/// use fw_frame::info::{Typed, TypeInfo};
///
/// #[derive(Frame)]
/// struct Sample {
///     id: u32,
///     value: f64,
/// }
///
/// let TypeInfo::Composite(info) = Sample::type_info() else { unreachable!() };
/// assert_eq!(info.field_names().collect::<Vec<_>>(), ["id", "value"]);
/// ```
///
/// Manual implementations should cache the info in a
/// [`NonGenericTypeInfoCell`] or, for generic types, a [`GenericTypeInfoCell`].
///
/// [`NonGenericTypeInfoCell`]: crate::impls::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::impls::GenericTypeInfoCell
pub trait Typed: TypePath {
    /// Returns the compile-time frame description of the type.
    fn type_info() -> &'static TypeInfo;
}
