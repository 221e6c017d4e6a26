//! Block footer 块尾
//! Self-consistency record at the end of every block 每个块末尾的自校验记录

use bytes::{Buf, BufMut};

use crate::{Error, Layout, Level, Result};

/// Block kind 块类型
pub mod kind {
  pub const DATA: u8 = 1;
  pub const INDIRECT: u8 = 2;
}

/// Footer magic "HDBF" 块尾魔数
const MAGIC: u32 = 0x48_44_42_46;

/// Block footer (16 bytes, rest of the footer area is zero)
/// 块尾（16 字节，块尾区剩余部分为 0）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Footer {
  pub magic: u32,
  /// Block kind 块类型
  pub kind: u8,
  /// Indirect depth of the block's own tier 所在层级
  pub level: u8,
  pub _reserved: u16,
  /// Data block: its block index. Indirect block: first reachable block index
  /// 数据块：自身块序号；间接块：可达的首个块序号
  pub base_idx: u32,
  /// CRC32 of the payload 载荷 CRC32
  pub checksum: u32,
}

impl Footer {
  pub const SIZE: usize = 16;

  #[inline]
  pub fn new(kind: u8, level: Level, base_idx: u32) -> Self {
    Self {
      magic: MAGIC,
      kind,
      level: level as u8,
      _reserved: 0,
      base_idx,
      checksum: 0,
    }
  }

  #[inline]
  pub fn is_valid(&self) -> bool {
    self.magic == MAGIC
  }

  /// Decode from bytes 从字节解码
  #[inline]
  pub(crate) fn decode(mut buf: &[u8]) -> Self {
    Self {
      magic: buf.get_u32_le(),
      kind: buf.get_u8(),
      level: buf.get_u8(),
      _reserved: buf.get_u16_le(),
      base_idx: buf.get_u32_le(),
      checksum: buf.get_u32_le(),
    }
  }

  /// Encode to bytes 编码到字节
  #[inline]
  pub(crate) fn encode(&self, mut buf: &mut [u8]) {
    buf.put_u32_le(self.magic);
    buf.put_u8(self.kind);
    buf.put_u8(self.level);
    buf.put_u16_le(self._reserved);
    buf.put_u32_le(self.base_idx);
    buf.put_u32_le(self.checksum);
  }

  /// Read footer of a whole block 读取整块的块尾
  pub fn read(block: &[u8], layout: &Layout) -> Result<Self> {
    check_len(block, layout)?;
    Ok(Self::decode(&block[layout.block_data_len as usize..]))
  }

  /// Checksum the payload and write the footer into the block
  /// 计算载荷校验和并写入块尾
  pub fn seal(mut self, block: &mut [u8], layout: &Layout) -> Result<()> {
    check_len(block, layout)?;
    let (payload, tail) = block.split_at_mut(layout.block_data_len as usize);
    self.checksum = crc32fast::hash(payload);
    tail.fill(0);
    self.encode(tail);
    Ok(())
  }

  /// Payload matches the stored checksum; false for a wrong-sized block
  /// 载荷与校验和一致；块长度不符时为 false
  #[inline]
  pub fn verify(&self, block: &[u8], layout: &Layout) -> bool {
    check_len(block, layout).is_ok()
      && crc32fast::hash(&block[..layout.block_data_len as usize]) == self.checksum
  }
}

#[inline]
fn check_len(block: &[u8], layout: &Layout) -> Result<()> {
  let expect = layout.block_size as usize;
  if block.len() != expect {
    return Err(Error::BlockLen {
      expect,
      got: block.len(),
    });
  }
  Ok(())
}
