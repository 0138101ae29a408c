use proc_macro2::TokenStream;
use quote::quote;

#[inline]
pub(crate) fn type_path_(fw_frame_path: &syn::Path) -> TokenStream {
    quote! {
        #fw_frame_path::info::TypePath
    }
}

#[inline]
pub(crate) fn typed_(fw_frame_path: &syn::Path) -> TokenStream {
    quote! {
        #fw_frame_path::info::Typed
    }
}

#[inline]
pub(crate) fn type_info_(fw_frame_path: &syn::Path) -> TokenStream {
    quote! {
        #fw_frame_path::info::TypeInfo
    }
}

#[inline]
pub(crate) fn composite_info_(fw_frame_path: &syn::Path) -> TokenStream {
    quote! {
        #fw_frame_path::info::CompositeInfo
    }
}

#[inline]
pub(crate) fn field_info_(fw_frame_path: &syn::Path) -> TokenStream {
    quote! {
        #fw_frame_path::info::FieldInfo
    }
}

#[inline]
pub(crate) fn field_conversion_(fw_frame_path: &syn::Path) -> TokenStream {
    quote! {
        #fw_frame_path::info::FieldConversion
    }
}

#[inline]
pub(crate) fn enum_info_(fw_frame_path: &syn::Path) -> TokenStream {
    quote! {
        #fw_frame_path::info::EnumInfo
    }
}

#[inline]
pub(crate) fn opaque_info_(fw_frame_path: &syn::Path) -> TokenStream {
    quote! {
        #fw_frame_path::info::OpaqueInfo
    }
}
