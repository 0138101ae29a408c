use proc_macro2::TokenStream;

use crate::derive_data::FrameStruct;

/// Implements `Typed` for a struct as a `Composite`.
pub(crate) fn impl_struct(info: &FrameStruct) -> TokenStream {
    super::impl_trait_typed(info.meta(), info.to_info_tokens())
}
