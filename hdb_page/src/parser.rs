//! Index parser: walks indirect blocks to the data block
//! 索引解析器：沿间接块找到数据块
//!
//! Indirect blocks read on the previous path are kept per hop. After each
//! translation the [`hdb_layout::Change`] decides how many hops stay valid, so sequential
//! access usually re-reads nothing but the deepest entry.
//! 上一路径读取的间接块按跳缓存。每次转换后由 [`hdb_layout::Change`] 决定保留几跳，
//! 顺序访问通常只需重读最深一层的地址项。

use hdb_layout::{
  Footer, Layout, Level, Mapper, NULL_ADDR, Plan, kind, read_addr, write_addr,
};
use log::warn;

use crate::{BlockIo, Error, Inode, Result};

/// Cursor-local index parser, one per reader or writer
/// 游标私有的索引解析器，每个读写者一个
#[derive(Debug)]
pub struct Parser {
  mapper: Mapper,
  /// Physical address of the indirect block read at each hop
  /// 每跳读取的间接块物理地址
  hops: [u32; 3],
  bufs: [Box<[u8]>; 3],
  /// Hops `0..cached` hold valid blocks 前 `cached` 跳缓存有效
  cached: usize,
}

impl Parser {
  pub fn new(layout: Layout) -> Result<Self> {
    let block = || vec![0u8; layout.block_size as usize].into_boxed_slice();
    Ok(Self {
      mapper: Mapper::new(layout)?,
      hops: [NULL_ADDR; 3],
      bufs: [block(), block(), block()],
      cached: 0,
    })
  }

  #[inline]
  pub fn layout(&self) -> &Layout {
    self.mapper.layout()
  }

  /// Plan of the last translated position 最近一次转换的路径
  #[inline]
  pub fn plan(&self) -> &Plan {
    self.mapper.plan()
  }

  /// Cached hop count 已缓存的跳数
  #[inline]
  pub fn cached(&self) -> usize {
    self.cached
  }

  /// Drop every cached hop, e.g. after the inode was replaced
  /// 丢弃全部缓存，如 inode 被替换之后
  #[inline]
  pub fn invalidate(&mut self) {
    self.cached = 0;
  }

  fn translate(&mut self, pos: u64) -> Result<Plan> {
    let len = self.layout().block_data_len as u64;
    let pos =
      i64::try_from(pos).map_err(|_| hdb_layout::Error::AddressOutOfRange(pos / len))?;
    let (plan, change) = self.mapper.translate(pos)?;
    self.cached = self.cached.min(change.kept_depth());
    Ok(plan)
  }

  /// Make hop `hop` hold block `addr`, reading it when not cached
  /// 令第 `hop` 跳缓存块 `addr`，未缓存时读取
  fn load(&mut self, hop: usize, addr: u32, plan: &Plan, io: &impl BlockIo) -> Result<()> {
    if hop < self.cached && self.hops[hop] == addr {
      return Ok(());
    }
    self.cached = hop;
    let layout = *self.layout();
    let buf = &mut self.bufs[hop];
    io.read(addr, buf)?;
    check_footer(buf, &layout, addr, kind::INDIRECT, plan.bases[hop])?;
    self.hops[hop] = addr;
    self.cached = hop + 1;
    Ok(())
  }

  /// Physical data block holding `pos`, `None` when not allocated
  /// `pos` 所在的物理数据块，未分配时返回 `None`
  pub fn lookup(&mut self, pos: u64, inode: &Inode, io: &impl BlockIo) -> Result<Option<u32>> {
    let plan = self.translate(pos)?;
    let Some(mut addr) = inode.root(plan.level) else {
      return Ok(nonnull(inode.direct[plan.block_idx as usize]));
    };

    for (hop, off) in plan.hops().enumerate() {
      if addr == NULL_ADDR {
        return Ok(None);
      }
      self.load(hop, addr, &plan, io)?;
      addr = read_addr(&self.bufs[hop], off);
    }
    Ok(nonnull(addr))
  }

  /// Like [`lookup`](Self::lookup) but allocates and links missing blocks
  /// 同 [`lookup`](Self::lookup)，但会分配并链接缺失的块
  pub fn lookup_or_alloc(
    &mut self,
    pos: u64,
    inode: &mut Inode,
    io: &mut impl BlockIo,
  ) -> Result<u32> {
    let plan = self.translate(pos)?;
    let layout = *self.layout();

    let depth = plan.level.depth();
    if depth == 0 {
      let slot = &mut inode.direct[plan.block_idx as usize];
      if *slot == NULL_ADDR {
        *slot = new_block(io, &layout, kind::DATA, plan.level, plan.block_idx)?;
      }
      return Ok(*slot);
    }

    let root = &mut inode.roots[depth - 1];
    if *root == NULL_ADDR {
      *root = new_block(io, &layout, kind::INDIRECT, plan.level, plan.bases[0])?;
      self.cached = 0;
    }
    let mut addr = *root;

    for (hop, off) in plan.hops().enumerate() {
      self.load(hop, addr, &plan, &*io)?;
      let mut child = read_addr(&self.bufs[hop], off);
      if child == NULL_ADDR {
        child = if hop + 1 < depth {
          new_block(io, &layout, kind::INDIRECT, plan.level, plan.bases[hop + 1])?
        } else {
          new_block(io, &layout, kind::DATA, plan.level, plan.block_idx)?
        };
        let buf = &mut self.bufs[hop];
        write_addr(buf, off, child);
        Footer::new(kind::INDIRECT, plan.level, plan.bases[hop]).seal(buf, &layout)?;
        io.write(addr, buf)?;
        self.cached = hop + 1;
      }
      addr = child;
    }
    Ok(addr)
  }
}

/// Verify kind, base index and checksum of a block read from `addr`
/// 校验从 `addr` 读出的块的类型、基序号与校验和
pub(crate) fn check_footer(
  block: &[u8],
  layout: &Layout,
  addr: u32,
  kind: u8,
  base: u32,
) -> Result<()> {
  let footer = Footer::read(block, layout)?;
  if !footer.is_valid() || footer.kind != kind || footer.base_idx != base {
    warn!("block {addr} footer {footer:?}, expect kind {kind} base {base}");
    return Err(Error::FooterMismatch { addr, kind, base });
  }
  if !footer.verify(block, layout) {
    warn!("block {addr} checksum mismatch");
    return Err(Error::Checksum(addr));
  }
  Ok(())
}

#[inline]
fn nonnull(addr: u32) -> Option<u32> {
  (addr != NULL_ADDR).then_some(addr)
}

/// Allocate a zeroed block with a sealed footer
/// 分配带封印块尾的全零块
fn new_block(
  io: &mut impl BlockIo,
  layout: &Layout,
  kind: u8,
  level: Level,
  base_idx: u32,
) -> Result<u32> {
  let addr = io.alloc()?;
  let mut block = vec![0u8; layout.block_size as usize];
  Footer::new(kind, level, base_idx).seal(&mut block, layout)?;
  io.write(addr, &block)?;
  Ok(addr)
}
