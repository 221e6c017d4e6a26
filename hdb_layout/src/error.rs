//! 错误定义 Error definitions

use thiserror::Error;

/// 结果类型 Result type
pub type Result<T> = std::result::Result<T, Error>;

/// 错误类型 Error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("position cannot be negative: {0}")]
  InvalidArgument(i64),

  #[error("block index {0} beyond the addressable space")]
  AddressOutOfRange(u64),

  #[error("invalid layout: {0}")]
  InvalidConf(&'static str),

  #[error("block length {got} != {expect}")]
  BlockLen { expect: usize, got: usize },
}
