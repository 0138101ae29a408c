use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{GenericParam, Generics, Ident, LitStr, Path, TypeParam, spanned::Spanned};

use crate::utils::StringExpr;

/// Produces the strings of a `TypePath` implementation.
///
/// Only a part of [`FrameMeta`](crate::derive_data::FrameMeta), no interfaces
/// are exposed beyond it.
pub(crate) struct TypeParser<'a> {
    ident: &'a Ident,
    custom_path: Option<Path>,
    generics: &'a Generics,
}

impl core::fmt::Debug for TypeParser<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.ident, f)
    }
}

impl<'a> TypeParser<'a> {
    pub(super) fn new(ident: &'a Ident, custom_path: Option<Path>, generics: &'a Generics) -> Self {
        Self {
            ident,
            custom_path,
            generics,
        }
    }

    pub(super) fn generics(&self) -> &'a Generics {
        self.generics
    }

    /// Whether an implementation of `Typed` or `TypePath` should be generic.
    pub(super) fn impl_with_generic(&self) -> bool {
        // exist non-lifetime generic parameters
        !self
            .generics
            .params
            .iter()
            .all(|param| matches!(param, GenericParam::Lifetime(_)))
    }

    /// This name is used in `impl ... for #real_ident {...}`.
    pub(super) fn real_ident(&self) -> TokenStream {
        self.ident.to_token_stream()
    }

    /// Get (custom) ident.
    fn get_ident(&self) -> &Ident {
        self.custom_path
            .as_ref()
            .and_then(|path| path.segments.last())
            .map(|segment| &segment.ident)
            .unwrap_or(self.ident)
    }

    pub(super) fn module_path(&self) -> Option<StringExpr> {
        let Some(path) = &self.custom_path else {
            return Some(StringExpr::Const(quote! {
                ::core::module_path!()
            }));
        };

        // A single segment custom path has no module.
        let path_string = path
            .segments
            .iter()
            .take(path.segments.len().saturating_sub(1))
            .map(|segment| segment.ident.to_string())
            .reduce(|path, ident| path + "::" + &ident)?;

        let path_lit = LitStr::new(&path_string, path.span());
        Some(StringExpr::from_lit(&path_lit))
    }

    pub(super) fn type_ident(&self) -> StringExpr {
        StringExpr::from(self.get_ident())
    }

    /// Combines type generics and const generics into one [`StringExpr`].
    ///
    /// The `ty_generic_fn` param maps [`TypeParam`]s to [`StringExpr`]s.
    fn reduce_generics(
        generics: &Generics,
        mut ty_generic_fn: impl FnMut(&TypeParam) -> StringExpr,
        fw_frame_path: &Path,
    ) -> StringExpr {
        let alloc_utils_ = crate::path::alloc_utils_(fw_frame_path);

        let mut params = generics.params.iter().filter_map(|param| match param {
            GenericParam::Type(type_param) => Some(ty_generic_fn(type_param)),
            GenericParam::Const(const_param) => {
                let ident = &const_param.ident;
                let ty = &const_param.ty;

                Some(StringExpr::Owned(quote! {
                    <#ty as #alloc_utils_::ToString>::to_string(&#ident)
                }))
            }
            GenericParam::Lifetime(_) => None,
        });

        let first = params.next().into_iter();

        StringExpr::from_iter(
            first.chain(params.flat_map(|x| [StringExpr::from_str(", "), x])),
            fw_frame_path,
        )
    }

    /// Returns a [`StringExpr`] representing the "type name" of the type.
    ///
    /// For `my_crate::Grid<f32, 4>`, this is `"Grid<f32, 4>"`.
    pub(super) fn type_name(&self, fw_frame_path: &Path) -> StringExpr {
        let type_ident = self.type_ident();

        if !self.impl_with_generic() {
            return type_ident;
        }

        let type_path_ = crate::path::type_path_(fw_frame_path);
        let generics = TypeParser::reduce_generics(
            self.generics,
            |TypeParam { ident, .. }| {
                StringExpr::Borrowed(quote! {
                    <#ident as #type_path_>::type_name()
                })
            },
            fw_frame_path,
        );

        StringExpr::from_iter(
            [
                type_ident,
                StringExpr::from_str("<"),
                generics,
                StringExpr::from_str(">"),
            ],
            fw_frame_path,
        )
    }

    /// Returns a [`StringExpr`] representing the "type path" of the type.
    ///
    /// For `my_crate::Grid<f32, 4>`, this is `"my_crate::Grid<f32, 4>"`.
    pub(super) fn type_path(&self, fw_frame_path: &Path) -> StringExpr {
        let mut parts = Vec::with_capacity(6);

        if let Some(module_path) = self.module_path() {
            parts.push(module_path);
            parts.push(StringExpr::from_str("::"));
        }
        parts.push(self.type_ident());

        if self.impl_with_generic() {
            let type_path_ = crate::path::type_path_(fw_frame_path);
            let generics = TypeParser::reduce_generics(
                self.generics,
                |TypeParam { ident, .. }| {
                    StringExpr::Borrowed(quote! {
                        <#ident as #type_path_>::type_path()
                    })
                },
                fw_frame_path,
            );

            parts.push(StringExpr::from_str("<"));
            parts.push(generics);
            parts.push(StringExpr::from_str(">"));
        }

        StringExpr::from_iter(parts, fw_frame_path)
    }
}
