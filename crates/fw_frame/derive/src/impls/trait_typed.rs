use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::FrameMeta;

/// Generate implementation code for `Typed`
///
/// For param `type_info_tokens`, see the `to_info_tokens` of
/// [`FrameStruct`] and [`FrameEnum`].
///
/// [`FrameStruct`]: crate::derive_data::FrameStruct
/// [`FrameEnum`]: crate::derive_data::FrameEnum
pub(crate) fn impl_trait_typed(meta: &FrameMeta, type_info_tokens: TokenStream) -> TokenStream {
    let fw_frame_path = meta.fw_frame_path();
    let trait_typed_ = crate::path::typed_(fw_frame_path);
    let type_info_ = crate::path::type_info_(fw_frame_path);

    let inner_cell_tokens = if meta.impl_with_generic() {
        let info_cell = crate::path::generic_type_info_cell_(fw_frame_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_insert::<Self>(|| {
                #type_info_tokens
            })
        }
    } else {
        let info_cell = crate::path::non_generic_type_info_cell_(fw_frame_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_init(|| {
                #type_info_tokens
            })
        }
    };

    let real_ident = meta.real_ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true);

    quote! {
        impl #impl_generics #trait_typed_ for #real_ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #inner_cell_tokens
            }
        }
    }
}
