use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, quote};
use syn::{Field, Fields, Index, Member};

use super::{FieldAttributes, FrameMeta};

// -----------------------------------------------------------------------------
// Define

/// A struct deriving `Frame`.
pub(crate) struct FrameStruct<'a> {
    meta: FrameMeta<'a>,
    fields: Vec<StructField<'a>>,
    is_tuple: bool,
}

/// Represents a field on a struct.
pub(crate) struct StructField<'a> {
    /// The raw field.
    pub data: &'a Field,
    /// The frame attributes on the field.
    pub attrs: FieldAttributes,
    /// The index of this field within the struct.
    pub declaration_index: usize,
}

// -----------------------------------------------------------------------------
// StructField Implementation

impl StructField<'_> {
    /// `foo` for named fields, `0` for tuple fields.
    pub fn member(&self) -> Member {
        match &self.data.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(Index {
                index: self.declaration_index as u32,
                span: Span::call_site(),
            }),
        }
    }

    /// The field name as written in the header.
    pub fn name(&self) -> String {
        match &self.data.ident {
            Some(ident) => ident.to_string(),
            None => self.declaration_index.to_string(),
        }
    }

    /// Whether the field is described by its own `Typed` implementation.
    /// Only ignored fields are untyped.
    pub fn is_typed(&self) -> bool {
        self.attrs.ignore.is_none()
    }

    /// Generates a `FieldInfo` construction.
    pub fn to_info_tokens(&self, fw_frame_path: &syn::Path) -> TokenStream {
        use crate::path::fp::{AnyFP, IntoFP};

        let field_info_ = crate::path::field_info_(fw_frame_path);
        let alloc_utils_ = crate::path::alloc_utils_(fw_frame_path);

        let ty = &self.data.ty;
        let name = self.name();
        let index = self.declaration_index;
        let member = self.member();

        let access = quote! {
            |value| value
                .downcast_ref::<Self>()
                .map(|record| &record.#member as &dyn #AnyFP)
        };

        if self.attrs.ignore.is_some() {
            return quote! {
                #field_info_::untyped::<#ty>(#name, #index, #access).with_ignored(true)
            };
        }

        if let Some(with) = &self.attrs.with {
            let field_conversion_ = crate::path::field_conversion_(fw_frame_path);
            let with_name = with.to_token_stream().to_string().replace(' ', "");

            return quote! {
                #field_info_::new::<#ty>(#name, #index, #access).with_conversion(
                    #field_conversion_::new(#with_name, |value| {
                        value
                            .downcast_ref::<#ty>()
                            .map(|field| #IntoFP::<#alloc_utils_::Vec<u8>>::into(#with(field)))
                    })
                )
            };
        }

        quote! {
            #field_info_::new::<#ty>(#name, #index, #access)
        }
    }
}

// -----------------------------------------------------------------------------
// Struct Implementation

impl<'a> FrameStruct<'a> {
    pub fn new(mut meta: FrameMeta<'a>, fields: &'a Fields) -> syn::Result<Self> {
        let is_tuple = matches!(fields, Fields::Unnamed(_));

        let fields = fields
            .iter()
            .enumerate()
            .map(|(declaration_index, data)| {
                Ok(StructField {
                    data,
                    attrs: FieldAttributes::parse(&data.attrs)?,
                    declaration_index,
                })
            })
            .collect::<syn::Result<Vec<_>>>()?;

        let (typed, untyped) = fields.iter().partition::<Vec<_>, _>(|field| field.is_typed());
        meta.set_field_types(
            typed.into_iter().map(|field| field.data.ty.clone()).collect(),
            untyped.into_iter().map(|field| field.data.ty.clone()).collect(),
        );

        Ok(Self {
            meta,
            fields,
            is_tuple,
        })
    }

    /// Access the metadata associated with this struct definition.
    #[inline]
    pub fn meta(&self) -> &FrameMeta<'a> {
        &self.meta
    }

    /// Generates the `TypeInfo` of this struct.
    pub fn to_info_tokens(&self) -> TokenStream {
        let fw_frame_path = self.meta.fw_frame_path();
        let type_info_ = crate::path::type_info_(fw_frame_path);
        let composite_info_ = crate::path::composite_info_(fw_frame_path);

        let constructor = if self.is_tuple {
            quote!(new_tuple)
        } else {
            quote!(new)
        };

        let fields = self
            .fields
            .iter()
            .map(|field| field.to_info_tokens(fw_frame_path));

        quote! {
            #type_info_::Composite(
                #composite_info_::#constructor::<Self>(&[ #(#fields),* ])
            )
        }
    }
}
