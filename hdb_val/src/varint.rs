//! 7-bit group varint 七位分组变长整数
//!
//! Least-significant group first, high bit set when more groups follow.
//! 低位组在前，最高位为 1 表示后续还有字节。

use bytes::{Buf, BufMut};

use crate::{Error, Result};

/// Longest encoding of a u64 u64 的最长编码
pub const MAX_LEN: usize = 10;

const MORE: u8 = 0x80;

/// Encoded length 编码长度
#[inline]
pub const fn len(v: u64) -> usize {
  let bits = 64 - (v | 1).leading_zeros() as usize;
  bits.div_ceil(7)
}

#[inline]
pub fn put(buf: &mut impl BufMut, mut v: u64) {
  while v >= MORE as u64 {
    buf.put_u8(v as u8 | MORE);
    v >>= 7;
  }
  buf.put_u8(v as u8);
}

/// Decode one varint, advancing `buf` only on success
/// 解码一个变长整数，仅成功时前移 `buf`
pub fn get(buf: &mut &[u8]) -> Result<u64> {
  let mut cur = *buf;
  let mut v = 0u64;
  let mut shift = 0u32;
  loop {
    if !cur.has_remaining() {
      return Err(Error::Eof);
    }
    let b = cur.get_u8();
    // The 10th group carries a single bit 第 10 组仅剩 1 位
    if shift == 63 && b > 1 {
      return Err(Error::VarintOverflow);
    }
    v |= ((b & !MORE) as u64) << shift;
    if b & MORE == 0 {
      *buf = cur;
      return Ok(v);
    }
    shift += 7;
  }
}
