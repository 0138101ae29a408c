use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Fields, Ident, Variant};

use super::{FieldAttributes, FrameMeta};

/// Integer types accepted in `#[repr(..)]`.
const REPR_INTEGERS: &[&str] = &[
    "u8", "u16", "u32", "u64", "usize", "i8", "i16", "i32", "i64", "isize",
];

/// Integer types whose discriminants may not fit the 8-byte wide form.
const REPR_TOO_WIDE: &[&str] = &["u128", "i128"];

/// The discriminant type when no integer `#[repr(..)]` is given.
const DEFAULT_REPR: &str = "isize";

/// A fieldless enum deriving `Frame`.
pub(crate) struct FrameEnum<'a> {
    meta: FrameMeta<'a>,
    variants: Vec<&'a Ident>,
    repr: String,
}

/// Finds the integer type of `#[repr(..)]`, e.g. `u8` in `#[repr(C, u8)]`.
fn parse_repr(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut repr = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("repr")) {
        attr.parse_nested_meta(|meta| {
            if let Some(ident) = meta.path.get_ident() {
                let ident = ident.to_string();
                if REPR_TOO_WIDE.contains(&ident.as_str()) {
                    return Err(meta.error(format_args!(
                        "`#[repr({ident})]` discriminants cannot be written as 8-byte integers, \
                         use a 64-bit or narrower repr or mark the type `#[frame(opaque)]`"
                    )));
                }
                if REPR_INTEGERS.contains(&ident.as_str()) {
                    repr = Some(ident);
                }
            }
            // Skip arguments such as `align(8)`.
            if meta.input.peek(syn::token::Paren) {
                let _content;
                syn::parenthesized!(_content in meta.input);
            }
            Ok(())
        })?;
    }

    Ok(repr)
}

fn check_variant(variant: &Variant) -> syn::Result<&Ident> {
    FieldAttributes::reject(&variant.attrs)?;

    match variant.fields {
        Fields::Unit => Ok(&variant.ident),
        _ => Err(syn::Error::new_spanned(
            variant,
            "only fieldless enums can derive `Frame`, mark the type `#[frame(opaque)]` instead",
        )),
    }
}

impl<'a> FrameEnum<'a> {
    pub fn new(
        meta: FrameMeta<'a>,
        attrs: &'a [Attribute],
        variants: impl IntoIterator<Item = &'a Variant>,
    ) -> syn::Result<Self> {
        let variants = variants
            .into_iter()
            .map(check_variant)
            .collect::<syn::Result<Vec<_>>>()?;

        let repr = parse_repr(attrs)?.unwrap_or_else(|| DEFAULT_REPR.to_owned());

        Ok(Self {
            meta,
            variants,
            repr,
        })
    }

    /// Access the metadata associated with this enum definition.
    #[inline]
    pub fn meta(&self) -> &FrameMeta<'a> {
        &self.meta
    }

    /// Generates the `TypeInfo` of this enum.
    pub fn to_info_tokens(&self) -> TokenStream {
        let fw_frame_path = self.meta.fw_frame_path();
        let type_info_ = crate::path::type_info_(fw_frame_path);
        let enum_info_ = crate::path::enum_info_(fw_frame_path);

        let repr = &self.repr;
        let names = self.variants.iter().map(|ident| ident.to_string());
        let idents = &self.variants;

        quote! {
            #type_info_::Enum(#enum_info_::new::<Self>(
                #repr,
                &[ #(#names),* ],
                |value| value.downcast_ref::<Self>().map(|variant| match *variant {
                    #( Self::#idents => Self::#idents as i64, )*
                }),
            ))
        }
    }
}
