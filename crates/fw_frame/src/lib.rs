#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Usually, we need to use `crate` in the crate itself and use `fw_frame` in doc testing.
// But `macro_utils::Manifest` can only choose one, so we must have an
// `extern self` to ensure `fw_frame` can be used as an alias for `crate`.
extern crate self as fw_frame;

// -----------------------------------------------------------------------------
// Alloc paths

// `std` is always linked, `OnceLock` and `RwLock` back the type cells and
// the plan registry. Everything else goes through `core` and `alloc`.
extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod header;
pub mod impls;
pub mod info;
pub mod introspect;
pub mod plan;
pub mod registry;
pub mod sink;
pub mod stream;
pub mod write;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use fw_frame_derive as derive;

/// The most used items.
pub mod prelude {
    pub use crate::derive::Frame;
    pub use crate::header::{FrameHeader, HeaderSink, LogHeader};
    pub use crate::info::{TypePath, Typed};
    pub use crate::plan::{FramePlan, PlanError};
    pub use crate::registry::{PlanRegistry, PlanRegistryArc};
    pub use crate::sink::ByteSink;
    pub use crate::stream::{Chunking, FrameWriter, WriterOptions};
    pub use crate::write::WriteError;
}
