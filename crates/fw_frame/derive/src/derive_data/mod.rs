//! Provide some tools for parsing token stream.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod frame_derive;
mod frame_enum;
mod frame_meta;
mod frame_struct;
mod type_parser;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes};
pub(crate) use type_parser::TypeParser;

pub(crate) use frame_derive::FrameDerive;
pub(crate) use frame_enum::FrameEnum;
pub(crate) use frame_meta::FrameMeta;
pub(crate) use frame_struct::FrameStruct;
