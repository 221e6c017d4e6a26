//! Stream - live write buffer
//! 活动写缓冲区
//!
//! BTreeMap keyed by sample key (typically a timestamp), kept sorted so a
//! rollover can finalize it in one pass.
//! 以采样键（通常为时间戳）为键的 BTreeMap，保持有序以便滚动时一次性定型。

use std::{collections::BTreeMap, ops::RangeBounds};

use hdb_val::HistorianValue;

/// Live sorted buffer of samples
/// 活动的有序采样缓冲
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stream {
  data: BTreeMap<u64, HistorianValue>,
}

impl Stream {
  #[inline]
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert a sample; an existing key is replaced and its value returned
  /// 插入采样；键已存在则替换并返回旧值
  #[inline]
  pub fn put(&mut self, key: u64, val: HistorianValue) -> Option<HistorianValue> {
    self.data.insert(key, val)
  }

  #[inline]
  pub fn get(&self, key: u64) -> Option<&HistorianValue> {
    self.data.get(&key)
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.data.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  #[inline]
  pub fn first_key(&self) -> Option<u64> {
    self.data.first_key_value().map(|(k, _)| *k)
  }

  #[inline]
  pub fn last_key(&self) -> Option<u64> {
    self.data.last_key_value().map(|(k, _)| *k)
  }

  /// Ascending iteration 升序遍历
  #[inline]
  pub fn iter(&self) -> impl Iterator<Item = (u64, &HistorianValue)> + '_ {
    self.data.iter().map(|(k, v)| (*k, v))
  }

  #[inline]
  pub fn range(
    &self,
    range: impl RangeBounds<u64>,
  ) -> impl Iterator<Item = (u64, &HistorianValue)> + '_ {
    self.data.range(range).map(|(k, v)| (*k, v))
  }
}
