//! Code generation for the derives.

// -----------------------------------------------------------------------------
// Modules

mod enum_kind;
mod opaque_kind;
mod struct_kind;
mod trait_type_path;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use enum_kind::impl_enum;
pub(crate) use opaque_kind::impl_opaque;
pub(crate) use struct_kind::impl_struct;
pub(crate) use trait_type_path::impl_trait_type_path;
pub(crate) use trait_typed::impl_trait_typed;
