use proc_macro2::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{DeriveInput, Generics, ImplGenerics, Token, Type, TypeGenerics};

use super::{TypeAttributes, TypeParser};
use crate::utils::StringExpr;

/// Data shared by every derive: the type path and generics.
pub(crate) struct FrameMeta<'a> {
    type_parser: TypeParser<'a>,
    fw_frame_path: syn::Path,
    /// Field types that must implement `Typed` in a generic impl.
    typed_fields: Vec<Type>,
    /// Field types that are only accessed, never described.
    untyped_fields: Vec<Type>,
}

impl<'a> FrameMeta<'a> {
    pub fn new(attrs: TypeAttributes, input: &'a DeriveInput) -> Self {
        Self {
            type_parser: TypeParser::new(&input.ident, attrs.type_path, &input.generics),
            fw_frame_path: crate::path::fw_frame(),
            typed_fields: Vec::new(),
            untyped_fields: Vec::new(),
        }
    }

    /// Parses the type attributes only, as `#[derive(TypePath)]` does.
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse(&input.attrs)?;
        Ok(Self::new(attrs, input))
    }

    pub(super) fn set_field_types(&mut self, typed: Vec<Type>, untyped: Vec<Type>) {
        self.typed_fields = typed;
        self.untyped_fields = untyped;
    }

    #[inline]
    pub fn fw_frame_path(&self) -> &syn::Path {
        &self.fw_frame_path
    }

    #[inline]
    pub fn generics(&self) -> &'a Generics {
        self.type_parser.generics()
    }

    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        self.type_parser.impl_with_generic()
    }

    #[inline]
    pub fn real_ident(&self) -> TokenStream {
        self.type_parser.real_ident()
    }

    #[inline]
    pub fn module_path(&self) -> Option<StringExpr> {
        self.type_parser.module_path()
    }

    #[inline]
    pub fn type_ident(&self) -> StringExpr {
        self.type_parser.type_ident()
    }

    #[inline]
    pub fn type_name(&self) -> StringExpr {
        self.type_parser.type_name(&self.fw_frame_path)
    }

    #[inline]
    pub fn type_path(&self) -> StringExpr {
        self.type_parser.type_path(&self.fw_frame_path)
    }

    pub fn type_name_into_owned(&self) -> TokenStream {
        self.type_name().into_owned(&self.fw_frame_path)
    }

    pub fn type_path_into_owned(&self) -> TokenStream {
        self.type_path().into_owned(&self.fw_frame_path)
    }

    /// Split generics for an impl block, extending the where clause.
    ///
    /// - Generic types always get `T: TypePath`.
    /// - With `add_typed`, described field types get `Field: Typed` and the
    ///   other fields `Field: Any`.
    pub fn split_generics(&self, add_typed: bool) -> (ImplGenerics<'_>, TypeGenerics<'_>, TokenStream) {
        use crate::path::fp::AnyFP;

        let generics = self.generics();

        let mut generic_where_clause = quote! { where };

        if generics.params.iter().next().is_some() {
            generic_where_clause.extend(quote! { Self: 'static, });
        }

        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        // Maintain existing where clause bounds, if any.
        if let Some(where_clause) = where_clause {
            let predicates = where_clause.predicates.iter();
            generic_where_clause.extend(quote! { #(#predicates,)* });
        }

        let mut predicates: Punctuated<TokenStream, Token![,]> = Punctuated::new();

        let type_path_ = crate::path::type_path_(&self.fw_frame_path);
        predicates.extend(generics.type_params().map(|param| {
            let ident = &param.ident;
            quote!(#ident: #type_path_)
        }));

        if add_typed && self.impl_with_generic() {
            let typed_ = crate::path::typed_(&self.fw_frame_path);
            predicates.extend(self.typed_fields.iter().map(|ty| quote!(#ty: #typed_)));
            predicates.extend(self.untyped_fields.iter().map(|ty| quote!(#ty: #AnyFP)));
        }

        generic_where_clause.extend(quote! { #predicates });

        (impl_generics, ty_generics, generic_where_clause)
    }
}
