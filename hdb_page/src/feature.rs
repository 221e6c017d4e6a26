//! Feature: a logical byte space backed by blocks
//! 特征：由块承载的逻辑字节空间

use hdb_layout::{Footer, Layout, Level, kind};

use crate::{BlockIo, Error, Inode, Parser, Result, parser::check_footer};

/// Inode plus written length, immutable once its writer finished
/// inode 与已写长度，写入完成后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
  pub layout: Layout,
  pub inode: Inode,
  pub len: u64,
}

impl Feature {
  pub fn new(layout: Layout) -> Self {
    Self {
      inode: Inode::new(&layout),
      layout,
      len: 0,
    }
  }

  /// Independent read cursor 独立的读游标
  pub fn reader<'a, B: BlockIo>(&'a self, io: &'a B) -> Result<Reader<'a, B>> {
    Reader::new(self, io)
  }
}

fn check_store(layout: &Layout, io: &impl BlockIo) -> Result<()> {
  if io.block_size() != layout.block_size {
    return Err(Error::BlockSize {
      layout: layout.block_size,
      store: io.block_size(),
    });
  }
  Ok(())
}

/// Data block held by a cursor 游标当前持有的数据块
#[derive(Debug, Clone, Copy)]
struct Cur {
  addr: u32,
  idx: u32,
  level: Level,
}

/// Write cursor owning the block store until [`finish`](Writer::finish)
/// 写游标，在 [`finish`](Writer::finish) 前独占块存储
pub struct Writer<B> {
  io: B,
  feature: Feature,
  parser: Parser,
  block: Box<[u8]>,
  cur: Option<Cur>,
  dirty: bool,
}

impl<B: BlockIo> Writer<B> {
  pub fn new(io: B, layout: Layout) -> Result<Self> {
    check_store(&layout, &io)?;
    Ok(Self {
      io,
      parser: Parser::new(layout)?,
      block: vec![0u8; layout.block_size as usize].into_boxed_slice(),
      feature: Feature::new(layout),
      cur: None,
      dirty: false,
    })
  }

  #[inline]
  pub fn len(&self) -> u64 {
    self.feature.len
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.feature.len == 0
  }

  /// Write `data` at logical `pos`, allocating blocks on demand
  /// 在逻辑位置 `pos` 写入 `data`，按需分配块
  pub fn write_at(&mut self, mut pos: u64, mut data: &[u8]) -> Result<()> {
    let block_len = self.feature.layout.block_data_len as u64;
    while !data.is_empty() {
      let addr = self
        .parser
        .lookup_or_alloc(pos, &mut self.feature.inode, &mut self.io)?;
      let plan = *self.parser.plan();
      self.select(Cur {
        addr,
        idx: plan.block_idx,
        level: plan.level,
      })?;

      let at = pos - plan.base_addr;
      let n = (block_len - at).min(data.len() as u64) as usize;
      let at = at as usize;
      self.block[at..at + n].copy_from_slice(&data[..n]);
      self.dirty = true;

      pos += n as u64;
      data = &data[n..];
      self.feature.len = self.feature.len.max(pos);
    }
    Ok(())
  }

  /// Write at the end, returns the start position
  /// 追加写入，返回起始位置
  #[inline]
  pub fn append(&mut self, data: &[u8]) -> Result<u64> {
    let pos = self.feature.len;
    self.write_at(pos, data)?;
    Ok(pos)
  }

  fn select(&mut self, next: Cur) -> Result<()> {
    if self.cur.is_some_and(|c| c.addr == next.addr) {
      return Ok(());
    }
    self.flush()?;
    // Buffer is about to be overwritten 缓冲即将被覆盖
    self.cur = None;
    self.io.read(next.addr, &mut self.block)?;
    check_footer(
      &self.block,
      &self.feature.layout,
      next.addr,
      kind::DATA,
      next.idx,
    )?;
    self.cur = Some(next);
    Ok(())
  }

  /// Seal and write the held data block 封印并写回当前数据块
  pub fn flush(&mut self) -> Result<()> {
    if let (true, Some(c)) = (self.dirty, self.cur) {
      Footer::new(kind::DATA, c.level, c.idx).seal(&mut self.block, &self.feature.layout)?;
      self.io.write(c.addr, &self.block)?;
      self.dirty = false;
    }
    Ok(())
  }

  /// Flush and hand back the store with the finished feature
  /// 刷盘并交还块存储与已完成的特征
  pub fn finish(mut self) -> Result<(B, Feature)> {
    self.flush()?;
    Ok((self.io, self.feature))
  }
}

/// Read cursor; many may share one finished feature
/// 读游标；多个游标可共享同一已完成特征
pub struct Reader<'a, B> {
  io: &'a B,
  feature: &'a Feature,
  parser: Parser,
  block: Box<[u8]>,
  cur: Option<u32>,
}

impl<'a, B: BlockIo> Reader<'a, B> {
  pub fn new(feature: &'a Feature, io: &'a B) -> Result<Self> {
    let layout = feature.layout;
    check_store(&layout, io)?;
    Ok(Self {
      io,
      feature,
      parser: Parser::new(layout)?,
      block: vec![0u8; layout.block_size as usize].into_boxed_slice(),
      cur: None,
    })
  }

  #[inline]
  pub fn len(&self) -> u64 {
    self.feature.len
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.feature.len == 0
  }

  /// Fill `out` from logical `pos`; unallocated blocks read as zero
  /// 从逻辑位置 `pos` 填充 `out`；未分配的块读为 0
  pub fn read_at(&mut self, mut pos: u64, mut out: &mut [u8]) -> Result<()> {
    let end = self.feature.len;
    if pos.checked_add(out.len() as u64).is_none_or(|e| e > end) {
      return Err(Error::OutOfBounds {
        pos,
        len: out.len(),
        end,
      });
    }

    let block_len = self.feature.layout.block_data_len as u64;
    while !out.is_empty() {
      let found = self.parser.lookup(pos, &self.feature.inode, self.io)?;
      let plan = *self.parser.plan();
      let at = pos - plan.base_addr;
      let n = (block_len - at).min(out.len() as u64) as usize;
      let at = at as usize;
      let (dst, rest) = out.split_at_mut(n);

      match found {
        Some(addr) => {
          if self.cur != Some(addr) {
            self.cur = None;
            self.io.read(addr, &mut self.block)?;
            check_footer(
              &self.block,
              &self.feature.layout,
              addr,
              kind::DATA,
              plan.block_idx,
            )?;
            self.cur = Some(addr);
          }
          dst.copy_from_slice(&self.block[at..at + n]);
        }
        None => dst.fill(0),
      }

      pos += n as u64;
      out = rest;
    }
    Ok(())
  }
}
