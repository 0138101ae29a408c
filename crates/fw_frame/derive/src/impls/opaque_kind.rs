use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::FrameMeta;

/// Implements `Typed` for a `#[frame(opaque)]` type.
pub(crate) fn impl_opaque(meta: &FrameMeta) -> TokenStream {
    let fw_frame_path = meta.fw_frame_path();
    let type_info_ = crate::path::type_info_(fw_frame_path);
    let opaque_info_ = crate::path::opaque_info_(fw_frame_path);

    super::impl_trait_typed(
        meta,
        quote! {
            #type_info_::Opaque(#opaque_info_::new::<Self>())
        },
    )
}
