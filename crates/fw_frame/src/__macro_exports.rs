//! Items referenced by the code `#[derive(Frame)]` generates.
//!
//! The deriving crate may be `no_std` without `extern crate alloc`,
//! so generated code reaches `alloc` through this module.

pub mod alloc_utils {
    pub use ::alloc::{string::ToString, vec::Vec};
}

pub use crate::impls::concat;
