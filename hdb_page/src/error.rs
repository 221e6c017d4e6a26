//! 错误定义 Error definitions

use thiserror::Error;

/// 结果类型 Result type
pub type Result<T> = std::result::Result<T, Error>;

/// 错误类型 Error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("layout: {0}")]
  Layout(#[from] hdb_layout::Error),

  #[error("block {0} not found")]
  BlockNotFound(u32),

  #[error("block store full")]
  Full,

  #[error("block size mismatch: layout {layout}, store {store}")]
  BlockSize { layout: u32, store: u32 },

  #[error("block {addr} footer mismatch: expect kind {kind} base {base}")]
  FooterMismatch { addr: u32, kind: u8, base: u32 },

  #[error("block {0} checksum mismatch")]
  Checksum(u32),

  #[error("read {len} bytes at {pos} beyond feature length {end}")]
  OutOfBounds { pos: u64, len: usize, end: u64 },
}
