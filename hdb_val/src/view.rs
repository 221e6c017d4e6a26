//! Typed views over the three words
//! 三个字上的类型视图
//!
//! Views share storage: reading one after writing another yields the bit
//! reinterpretation of the overlapping words.
//! 视图共享存储：写入一种视图后读取另一种，得到重叠字的按位重新解释。

use bytes::Buf;

use crate::{Error, HistorianValue, Result};

/// String view width in bytes (value1 + value2)
/// 字符串视图字节宽度（value1 + value2）
pub const STR_LEN: usize = 16;

/// Stored for characters outside ASCII 非 ASCII 字符的替代字节
const REPLACEMENT: u8 = b'?';

impl HistorianValue {
  #[inline]
  pub const fn as_u64(&self) -> u64 {
    self.value1
  }

  #[inline]
  pub fn set_u64(&mut self, v: u64) {
    self.value1 = v;
  }

  #[inline]
  pub const fn as_i64(&self) -> i64 {
    self.value1 as i64
  }

  #[inline]
  pub fn set_i64(&mut self, v: i64) {
    self.value1 = v as u64;
  }

  /// Low 32 bits of value1 value1 的低 32 位
  #[inline]
  pub const fn as_u32(&self) -> u32 {
    self.value1 as u32
  }

  #[inline]
  pub fn set_u32(&mut self, v: u32) {
    self.value1 = v as u64;
  }

  /// Single precision float in the low 32 bits of value1
  /// value1 低 32 位中的单精度浮点
  #[inline]
  pub fn as_f32(&self) -> f32 {
    f32::from_bits(self.value1 as u32)
  }

  /// Zeroes the high 32 bits of value1 同时清零 value1 高 32 位
  #[inline]
  pub fn set_f32(&mut self, v: f32) {
    self.value1 = v.to_bits() as u64;
  }

  #[inline]
  pub fn as_f64(&self) -> f64 {
    f64::from_bits(self.value1)
  }

  #[inline]
  pub fn set_f64(&mut self, v: f64) {
    self.value1 = v.to_bits();
  }

  /// Quality flags in value3 value3 中的质量标志
  #[inline]
  pub const fn quality(&self) -> u64 {
    self.value3
  }

  #[inline]
  pub fn set_quality(&mut self, q: u64) {
    self.value3 = q;
  }

  /// Raw 16 string bytes 字符串的 16 个原始字节
  #[inline]
  pub fn str_bytes(&self) -> [u8; STR_LEN] {
    let mut out = [0u8; STR_LEN];
    out[..8].copy_from_slice(&self.value1.to_le_bytes());
    out[8..].copy_from_slice(&self.value2.to_le_bytes());
    out
  }

  /// ASCII string in value1 and value2, NUL padding trimmed
  /// value1 与 value2 中的 ASCII 字符串，去除末尾 NUL 填充
  pub fn as_str(&self) -> String {
    let bytes = self.str_bytes();
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    bytes[..end]
      .iter()
      .map(|&b| if b.is_ascii() { b as char } else { REPLACEMENT as char })
      .collect()
  }

  /// Store up to 16 characters, non-ASCII ones as `?`
  /// 写入至多 16 个字符，非 ASCII 字符存为 `?`
  pub fn set_str(&mut self, s: &str) -> Result<()> {
    let n = s.chars().count();
    if n > STR_LEN {
      return Err(Error::Overflow(n));
    }
    let mut buf = [0u8; STR_LEN];
    for (dst, c) in buf.iter_mut().zip(s.chars()) {
      *dst = if c.is_ascii() { c as u8 } else { REPLACEMENT };
    }
    let mut words = &buf[..];
    self.value1 = words.get_u64_le();
    self.value2 = words.get_u64_le();
    Ok(())
  }
}
