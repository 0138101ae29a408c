//! This independent module is used to provide the required paths,
//! so as to minimize changes when the `fw_frame` structure is modified.
//!
//! The only special feature is the path of `fw_frame` itself,
//! see [`fw_frame`] function doc.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `fw_frame` crate.
///
/// 1. For crates that depend on `fw_frame`, `::fw_frame` is returned.
/// 2. For crates that depend on `fw_core`, `::fw_core::frame` is returned.
/// 3. For crates that depend on `fw`, `::fw::frame` is returned.
/// 4. For other situations, `::fw_frame` is returned, but this may be incorrect.
///
/// This reads and caches the caller's `Cargo.toml`, so the path is obtained
/// once per derive and passed down.
pub(crate) fn fw_frame() -> syn::Path {
    fw_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("fw_frame"))
}

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod info;

pub(crate) mod fp;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use cell::*;
pub(crate) use info::*;

#[inline(always)]
pub(crate) fn alloc_utils_(fw_frame_path: &syn::Path) -> TokenStream {
    quote! {
        #fw_frame_path::__macro_exports::alloc_utils
    }
}

#[inline(always)]
pub(crate) fn concat_(fw_frame_path: &syn::Path) -> TokenStream {
    quote! {
        #fw_frame_path::__macro_exports::concat
    }
}
