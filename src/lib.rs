#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use fw_frame as frame;
pub use fw_utils as utils;
