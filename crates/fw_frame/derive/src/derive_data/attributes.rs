//! Parsing of `#[frame(...)]` attributes.

use proc_macro2::Span;
use syn::{Attribute, LitStr, Path, meta::ParseNestedMeta};

use crate::FRAME_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// Helpers

fn frame_attributes(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(FRAME_ATTRIBUTE_NAME))
}

fn set_once<T>(slot: &mut Option<T>, value: T, meta: &ParseNestedMeta) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("duplicate frame attribute"));
    }
    *slot = Some(value);
    Ok(())
}

/// Parses `"a::b::C"` into a path, rejecting leading colons and generics.
fn parse_type_path(lit: &LitStr) -> syn::Result<Path> {
    let path: Path = lit.parse_with(Path::parse_mod_style)?;

    if path.leading_colon.is_some() {
        return Err(syn::Error::new(
            lit.span(),
            "did not expect a leading double colon (`::`)",
        ));
    }

    Ok(path)
}

// -----------------------------------------------------------------------------
// Type Attributes

/// Attributes on the type itself.
///
/// - `#[frame(type_path = "a::b::C")]`
/// - `#[frame(opaque)]`
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub type_path: Option<Path>,
    pub opaque: Option<Span>,
}

impl TypeAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in frame_attributes(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("type_path") {
                    let lit: LitStr = meta.value()?.parse()?;
                    let path = parse_type_path(&lit)?;
                    set_once(&mut this.type_path, path, &meta)
                } else if meta.path.is_ident("opaque") {
                    set_once(&mut this.opaque, meta.path.require_ident()?.span(), &meta)
                } else if meta.path.is_ident("ignore") || meta.path.is_ident("with") {
                    Err(meta.error("this attribute can only be applied to fields"))
                } else {
                    Err(meta.error("unknown frame attribute, expected `type_path` or `opaque`"))
                }
            })?;
        }

        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// Field Attributes

/// Attributes on a struct field.
///
/// - `#[frame(ignore)]`
/// - `#[frame(with = path::to::function)]`
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub ignore: Option<Span>,
    pub with: Option<Path>,
}

impl FieldAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in frame_attributes(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("ignore") {
                    set_once(&mut this.ignore, meta.path.require_ident()?.span(), &meta)
                } else if meta.path.is_ident("with") {
                    let path: Path = meta.value()?.parse()?;
                    set_once(&mut this.with, path, &meta)
                } else if meta.path.is_ident("type_path") || meta.path.is_ident("opaque") {
                    Err(meta.error("this attribute can only be applied to types"))
                } else {
                    Err(meta.error("unknown frame attribute, expected `ignore` or `with`"))
                }
            })?;
        }

        if let (Some(span), Some(_)) = (this.ignore, &this.with) {
            return Err(syn::Error::new(
                span,
                "`ignore` and `with` cannot be used on the same field",
            ));
        }

        Ok(this)
    }

    /// Rejects any `#[frame(...)]` on places that take none, e.g. enum variants.
    pub fn reject(attrs: &[Attribute]) -> syn::Result<()> {
        match frame_attributes(attrs).next() {
            Some(attr) => Err(syn::Error::new_spanned(
                attr,
                "frame attributes are not supported here",
            )),
            None => Ok(()),
        }
    }
}
