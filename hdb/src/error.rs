//! Error types for hdb
//! hdb 错误类型定义

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("layout: {0}")]
  Layout(#[from] hdb_layout::Error),

  #[error("value: {0}")]
  Val(#[from] hdb_val::Error),

  #[error("page: {0}")]
  Page(#[from] hdb_page::Error),

  #[error("rollover: {0}")]
  Rollover(#[from] hdb_rollover::Error),

  /// Live stream reached a stage that only takes tables
  /// 仅接收表的阶段收到了活动流
  #[error("rollover {0} is not finalized")]
  NotFinalized(u64),

  #[error("table header claims {expect} records, found {got}")]
  Truncated { expect: u64, got: u64 },

  #[error("{0} thread panicked")]
  Panic(&'static str),

  /// Pipeline stopped before these samples were handed off
  /// 流水线在交接这些采样前已停止
  #[error("{} samples not handed off: {cause}", .stream.len())]
  Unsent {
    stream: crate::Stream,
    #[source]
    cause: Box<Error>,
  },
}

pub type Result<T> = std::result::Result<T, Error>;
