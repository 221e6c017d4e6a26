//! Raw block store 原始块存储

use std::sync::atomic::{AtomicU64, Ordering};

use hdb_layout::NULL_ADDR;

use crate::{Error, Result};

/// Physical block reader / writer
/// 物理块读写器
///
/// Address [`NULL_ADDR`] is never handed out by [`alloc`](BlockIo::alloc).
/// [`alloc`](BlockIo::alloc) 不会返回 [`NULL_ADDR`]。
pub trait BlockIo {
  fn block_size(&self) -> u32;

  /// Read a whole block into `buf` 读取整块到 `buf`
  fn read(&self, addr: u32, buf: &mut [u8]) -> Result<()>;

  /// Overwrite a whole block 覆盖写入整块
  fn write(&mut self, addr: u32, block: &[u8]) -> Result<()>;

  /// Reserve a zeroed block 分配一个全零块
  fn alloc(&mut self) -> Result<u32>;
}

/// In-memory block store
/// 内存块存储
#[derive(Debug)]
pub struct MemBlocks {
  block_size: u32,
  blocks: Vec<Box<[u8]>>,
  reads: AtomicU64,
}

impl MemBlocks {
  pub fn new(block_size: u32) -> Self {
    Self {
      block_size,
      // Slot 0 stands for NULL_ADDR 0 号槽位对应 NULL_ADDR
      blocks: vec![Box::default()],
      reads: AtomicU64::new(0),
    }
  }

  /// Allocated blocks 已分配块数
  #[inline]
  pub fn len(&self) -> usize {
    self.blocks.len() - 1
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Blocks read so far 累计读块次数
  #[inline]
  pub fn reads(&self) -> u64 {
    self.reads.load(Ordering::Relaxed)
  }

  /// Raw block bytes 块原始字节
  #[inline]
  pub fn get(&self, addr: u32) -> Option<&[u8]> {
    if addr == NULL_ADDR {
      return None;
    }
    self.blocks.get(addr as usize).map(|b| &b[..])
  }

  /// Mutable raw block bytes, bypassing footers
  /// 可变原始块字节，绕过块尾
  #[inline]
  pub fn get_mut(&mut self, addr: u32) -> Option<&mut [u8]> {
    if addr == NULL_ADDR {
      return None;
    }
    self.blocks.get_mut(addr as usize).map(|b| &mut b[..])
  }

  fn check_len(&self, len: usize) -> Result<()> {
    if len != self.block_size as usize {
      return Err(
        hdb_layout::Error::BlockLen {
          expect: self.block_size as usize,
          got: len,
        }
        .into(),
      );
    }
    Ok(())
  }
}

impl BlockIo for MemBlocks {
  #[inline]
  fn block_size(&self) -> u32 {
    self.block_size
  }

  fn read(&self, addr: u32, buf: &mut [u8]) -> Result<()> {
    self.check_len(buf.len())?;
    let block = self.get(addr).ok_or(Error::BlockNotFound(addr))?;
    buf.copy_from_slice(block);
    self.reads.fetch_add(1, Ordering::Relaxed);
    Ok(())
  }

  fn write(&mut self, addr: u32, block: &[u8]) -> Result<()> {
    self.check_len(block.len())?;
    let dst = self.get_mut(addr).ok_or(Error::BlockNotFound(addr))?;
    dst.copy_from_slice(block);
    Ok(())
  }

  fn alloc(&mut self) -> Result<u32> {
    let addr = u32::try_from(self.blocks.len()).map_err(|_| Error::Full)?;
    self
      .blocks
      .push(vec![0u8; self.block_size as usize].into_boxed_slice());
    Ok(addr)
  }
}
