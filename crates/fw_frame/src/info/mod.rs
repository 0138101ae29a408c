//! Compile-time frame descriptions of types.
//!
//! ## Menu
//!
//! - [`TypePath`]: stable type names, without prefix `::`.
//! - [`Type`]: a `TypeId` plus the `TypePath` functions of a type.
//! - [`Typed`]: a trait for obtaining the static [`TypeInfo`] of a type.
//!
//! - [`TypeInfo`]: an enum describing how a type is flattened:
//!     - [`PrimitiveInfo`]: scalars, with their encoded width.
//!     - [`EnumInfo`]: fieldless enums, with storage repr and variant names.
//!     - [`ArrayInfo`]: `[T; N]`, with length and element type info.
//!     - [`CompositeInfo`]: structs and tuple structs, with their fields.
//!     - [`OpaqueInfo`]: named but not decomposable types.
//!
//! - [`FieldInfo`]: one member of a composite type: name, declared type,
//!   ordering key, exclusion flag and optional [`FieldConversion`].
//!
//! - [`FrameKind`]: the variant tag of `TypeInfo`.

// -----------------------------------------------------------------------------
// Modules

mod array_info;
mod composite_info;
mod enum_info;
mod field_info;
mod opaque_info;
mod primitive_info;
mod type_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use array_info::{ArrayInfo, ItemFn};
pub use composite_info::CompositeInfo;
pub use enum_info::{EnumInfo, WideFn};
pub use field_info::{ConvertFn, FieldAccess, FieldConversion, FieldInfo};
pub use opaque_info::OpaqueInfo;
pub use primitive_info::{EncodeFn, Primitive, PrimitiveInfo};
pub use type_info::{FrameKind, FrameKindError, TypeInfo};
pub use type_path::{Type, TypePath};
pub use typed::Typed;

pub(crate) use type_path::impl_type_fn;
