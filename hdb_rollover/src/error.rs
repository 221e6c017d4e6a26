//! 错误定义 Error definitions

use thiserror::Error;

/// 结果类型 Result type
pub type Result<T> = std::result::Result<T, Error>;

/// 错误类型 Error type
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  /// Sequence number not above the last processed one
  /// 序号未大于上一次处理的序号
  #[error("stale rollover {got}, last processed {last}")]
  Stale { last: u64, got: u64 },

  #[error("rollover channel closed")]
  Closed,
}
