#![cfg_attr(docsrs, feature(doc_cfg))]

//! # hdb_val - Historian sample value
//! 历史库采样值
//!
//! | Form       | Layout                                             |
//! |------------|----------------------------------------------------|
//! | raw        | 3 × u64 little-endian, 24 bytes / 定长 24 字节      |
//! | compressed | 3 × varint(word XOR previous word) / XOR 增量变长   |
//!
//! Typed views reinterpret the same three words; the point's metadata decides
//! which view applies.
//! 类型视图是对同三个字的重新解释，由测点元数据决定使用哪种视图。

mod error;
mod run;
mod value;
pub mod varint;
mod view;

pub use error::{Error, Result};
pub use run::{Decoder, Encoder};
pub use value::{HistorianValue, RAW_SIZE};
pub use view::STR_LEN;
