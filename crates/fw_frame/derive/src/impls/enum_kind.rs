use proc_macro2::TokenStream;

use crate::derive_data::FrameEnum;

/// Implements `Typed` for a fieldless enum as an `Enum`.
pub(crate) fn impl_enum(info: &FrameEnum) -> TokenStream {
    super::impl_trait_typed(info.meta(), info.to_info_tokens())
}
