//! Fully qualified paths of `core` items, usable from any scope.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

pub(crate) struct AnyFP;
pub(crate) struct OptionFP;
pub(crate) struct IntoFP;

impl ToTokens for AnyFP {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        quote!(::core::any::Any).to_tokens(tokens);
    }
}

impl ToTokens for OptionFP {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        quote!(::core::option::Option).to_tokens(tokens);
    }
}

impl ToTokens for IntoFP {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        quote!(::core::convert::Into).to_tokens(tokens);
    }
}
