//! Compression run: keeps `prev` in step on both sides
//! 压缩序列：两端同步维护 `prev`

use bytes::BufMut;

use crate::{HistorianValue, Result};

/// Delta encoder for a run of samples, starting from the cleared value
/// 一组采样的增量编码器，初始 prev 为清零值
#[derive(Debug, Default, Clone)]
pub struct Encoder {
  prev: HistorianValue,
}

impl Encoder {
  #[inline]
  pub fn new() -> Self {
    Self::default()
  }

  #[inline]
  pub fn push(&mut self, v: &HistorianValue, buf: &mut impl BufMut) {
    v.write_compressed(&self.prev, buf);
    self.prev = *v;
  }

  /// Start a new run 开始新的序列
  #[inline]
  pub fn reset(&mut self) {
    self.prev.clear();
  }
}

/// Delta decoder mirroring [`Encoder`]
/// 与 [`Encoder`] 对应的增量解码器
#[derive(Debug, Default, Clone)]
pub struct Decoder {
  prev: HistorianValue,
}

impl Decoder {
  #[inline]
  pub fn new() -> Self {
    Self::default()
  }

  /// Decode next sample; on error `prev` and `buf` are untouched
  /// 解码下一个采样；出错时 `prev` 与 `buf` 不变
  pub fn decode(&mut self, buf: &mut &[u8]) -> Result<HistorianValue> {
    let v = HistorianValue::read_compressed(&self.prev, buf)?;
    self.prev = v;
    Ok(v)
  }

  #[inline]
  pub fn reset(&mut self) {
    self.prev.clear();
  }
}
