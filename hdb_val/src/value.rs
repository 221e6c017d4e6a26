//! HistorianValue 历史库值

use bitcode::{Decode, Encode};
use bytes::{Buf, BufMut};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, varint};

/// Raw record size 定长记录大小
pub const RAW_SIZE: usize = 24;

/// Three 64-bit words of one sample, not self-describing
/// 单个采样的三个 64 位字，不自描述类型
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode,
)]
pub struct HistorianValue {
  /// First 64 bits of the field; 32-bit values live here only
  /// 字段的前 64 位；32 位值只用此字
  pub value1: u64,
  /// Overflow of value1, costs compression when used
  /// value1 的溢出部分，使用会降低压缩率
  pub value2: u64,
  /// Digital data such as quality flags
  /// 数字量，如质量标志
  pub value3: u64,
}

impl HistorianValue {
  #[inline]
  pub const fn new(value1: u64, value2: u64, value3: u64) -> Self {
    Self {
      value1,
      value2,
      value3,
    }
  }

  /// Reset all words to zero 三个字清零
  #[inline]
  pub fn clear(&mut self) {
    *self = Self::default();
  }

  #[inline]
  pub const fn words(&self) -> [u64; 3] {
    [self.value1, self.value2, self.value3]
  }

  #[inline]
  const fn from_words([value1, value2, value3]: [u64; 3]) -> Self {
    Self::new(value1, value2, value3)
  }

  /// Write fixed 24 bytes 写入定长 24 字节
  #[inline]
  pub fn write_raw(&self, buf: &mut impl BufMut) {
    for w in self.words() {
      buf.put_u64_le(w);
    }
  }

  /// Read fixed 24 bytes, advancing `buf` only on success
  /// 读取定长 24 字节，仅成功时前移 `buf`
  pub fn read_raw(buf: &mut &[u8]) -> Result<Self> {
    if buf.remaining() < RAW_SIZE {
      return Err(Error::Eof);
    }
    Ok(Self::new(
      buf.get_u64_le(),
      buf.get_u64_le(),
      buf.get_u64_le(),
    ))
  }

  /// Write each word XOR the previous sample as a varint
  /// 每个字与上一采样异或后按变长整数写入
  ///
  /// Reader and writer must track the same `prev`.
  /// 读写双方须维护相同的 `prev`。
  #[inline]
  pub fn write_compressed(&self, prev: &Self, buf: &mut impl BufMut) {
    for (w, p) in self.words().into_iter().zip(prev.words()) {
      varint::put(buf, w ^ p);
    }
  }

  /// Inverse of [`write_compressed`](Self::write_compressed), advancing `buf` only on success
  /// [`write_compressed`](Self::write_compressed) 的逆操作，仅成功时前移 `buf`
  pub fn read_compressed(prev: &Self, buf: &mut &[u8]) -> Result<Self> {
    let mut cur = *buf;
    let mut words = [0u64; 3];
    for (w, p) in words.iter_mut().zip(prev.words()) {
      *w = varint::get(&mut cur)? ^ p;
    }
    *buf = cur;
    Ok(Self::from_words(words))
  }

  /// Compressed length against `prev` 相对 `prev` 的压缩长度
  #[inline]
  pub fn compressed_len(&self, prev: &Self) -> usize {
    self
      .words()
      .into_iter()
      .zip(prev.words())
      .map(|(w, p)| varint::len(w ^ p))
      .sum()
  }
}
