//! Indirect block address entries
//! 间接块地址项

use bytes::{Buf, BufMut};

use crate::ADDR_SIZE;

/// Read the 4-byte address at byte `offset`
/// 读取字节偏移 `offset` 处的 4 字节地址
#[inline]
pub fn read_addr(block: &[u8], offset: u32) -> u32 {
  let start = offset as usize;
  debug_assert!(start + ADDR_SIZE as usize <= block.len());
  let mut buf = &block[start..start + ADDR_SIZE as usize];
  buf.get_u32_le()
}

/// Write a 4-byte address at byte `offset`
/// 在字节偏移 `offset` 处写入 4 字节地址
#[inline]
pub fn write_addr(block: &mut [u8], offset: u32, addr: u32) {
  let start = offset as usize;
  debug_assert!(start + ADDR_SIZE as usize <= block.len());
  let mut buf = &mut block[start..start + ADDR_SIZE as usize];
  buf.put_u32_le(addr);
}
