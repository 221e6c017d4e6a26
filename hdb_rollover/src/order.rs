//! Per-consumer ordering check 消费者侧顺序校验

use log::error;

use crate::{Error, Result};

/// Last processed sequence number of one consumer
/// 单个消费者最近处理的序号
///
/// Starts at 0, so the first accepted record is 1 or above.
/// 初始为 0，首条可接受记录序号不小于 1。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Order {
  last: u64,
}

impl Order {
  #[inline]
  pub fn new() -> Self {
    Self::default()
  }

  /// Resume after `last` 从 `last` 之后继续
  #[inline]
  pub fn after(last: u64) -> Self {
    Self { last }
  }

  #[inline]
  pub fn last(&self) -> u64 {
    self.last
  }

  /// Accept `seq` if it is above the last one, otherwise `Stale`
  /// `seq` 大于上一次时接受，否则返回 `Stale`
  pub fn check(&mut self, seq: u64) -> Result<()> {
    if seq <= self.last {
      error!("stale rollover {seq}, last processed {}", self.last);
      return Err(Error::Stale {
        last: self.last,
        got: seq,
      });
    }
    self.last = seq;
    Ok(())
  }
}
