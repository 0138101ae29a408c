//! See following macros:
//!
//! - [`Frame`]
//! - [`TypePath`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

static FRAME_ATTRIBUTE_NAME: &str = "frame";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Frame Description Derivation
///
/// `#[derive(Frame)]` implements `TypePath` and `Typed`, giving the type a
/// static `TypeInfo` that a frame plan can be built from.
///
/// - `struct T { ... }` and `struct T(...);` become `Composite` records,
///   their fields kept in declaration order.
/// - `struct T;` becomes a `Composite` without fields.
/// - Fieldless `enum T { ... }` becomes an `Enum`, written as its
///   discriminant widened to `i64`. The `#[repr(..)]` integer is recorded.
///
/// Enums with data and unions are rejected; mark such types `opaque`.
///
/// ## Type Attributes
///
/// ### Custom Type Path
///
/// ```rust, ignore
/// #[derive(Frame)]
/// #[frame(type_path = "sensors::Pose")]
/// struct Pose { /* ... */ }
/// ```
///
/// The path replaces `module_path!()::Pose` and its last segment becomes the
/// type name. Generic arguments are appended automatically.
///
/// ### Opaque Types
///
/// ```rust, ignore
/// #[derive(Frame)]
/// #[frame(opaque)]
/// struct Handle(Box<[u8]>);
/// ```
///
/// An opaque type has a name but no layout. A field of this type must be
/// ignored or converted.
///
/// ## Field Attributes
///
/// ### Ignore
///
/// ```rust, ignore
/// #[derive(Frame)]
/// struct Sample {
///     id: u32,
///     #[frame(ignore)]
///     note: String,
/// }
/// ```
///
/// Ignored fields produce neither bytes nor header lines, and their type
/// does not need to implement `Typed`.
///
/// ### Custom Conversion
///
/// ```rust, ignore
/// fn text(value: &u32) -> Vec<u8> {
///     value.to_string().into_bytes()
/// }
///
/// #[derive(Frame)]
/// struct Sample {
///     #[frame(with = text)]
///     label: u32,
/// }
/// ```
///
/// The function receives `&Field` and returns anything that converts
/// into `Vec<u8>`, such as `[u8; N]`. Its bytes are written as one chunk.
///
/// The field type must still implement `Typed`: the header describes the
/// field by its own type and shape. On an enum field the conversion is
/// ignored and the discriminant is written as an 8-byte integer.
///
/// ## Enum Representation
///
/// Any integer `#[repr(..)]` up to 64 bits is accepted. `#[repr(u128)]`
/// and `#[repr(i128)]` are rejected, their discriminants cannot be
/// widened to `i64`.
#[proc_macro_derive(Frame, attributes(frame))]
pub fn derive_frame(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let derive_data = match derive_data::FrameDerive::from_input(&ast) {
        Ok(data) => data,
        Err(err) => return err.into_compile_error().into(),
    };

    let (type_path_impl, typed_impl) = match &derive_data {
        derive_data::FrameDerive::Struct(info) => (
            impls::impl_trait_type_path(info.meta()),
            impls::impl_struct(info),
        ),
        derive_data::FrameDerive::Enum(info) => (
            impls::impl_trait_type_path(info.meta()),
            impls::impl_enum(info),
        ),
        derive_data::FrameDerive::Opaque(meta) => {
            (impls::impl_trait_type_path(meta), impls::impl_opaque(meta))
        }
    };

    TokenStream::from(quote! {
        const _: () = {
            #type_path_impl

            #typed_impl
        };
    })
}

/// # Type Path Derivation
///
/// Implements only `TypePath`, for types that need a stable name without
/// a frame description.
///
/// ```rust, ignore
/// #[derive(TypePath)]
/// #[frame(type_path = "sensors::Tag")]
/// struct Tag(u32);
/// ```
///
/// Field attributes are accepted and ignored.
#[proc_macro_derive(TypePath, attributes(frame))]
pub fn derive_type_path(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let meta = match derive_data::FrameMeta::from_input(&ast) {
        Ok(meta) => meta,
        Err(err) => return err.into_compile_error().into(),
    };

    let type_path_impl = impls::impl_trait_type_path(&meta);

    TokenStream::from(quote! {
        const _: () = {
            #type_path_impl
        };
    })
}
