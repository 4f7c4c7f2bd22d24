#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use weft_reflect as reflect;
pub use weft_utils as utils;
pub use weft_wire as wire;
