//! Layout constants derived from block geometry
//! 由块几何参数推导的布局常量

use crate::{
  ADDR_SIZE, BLOCK_SIZE, Conf, DIRECT_BLOCKS, Error, FOOTER_SIZE, Footer, Level, Plan, Result,
};

/// Block indices must stay below this bound
/// 块序号上界（不含）
const MAX_BLOCK_IDX: u64 = i32::MAX as u64;

/// Layout of one feature's address space
/// 单个特征地址空间的布局
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
  pub block_size: u32,
  pub footer_size: u32,
  /// Payload bytes per block 每块有效载荷字节数
  pub block_data_len: u32,
  /// Fan-out of one indirect block 单个间接块的扇出
  pub addrs_per_block: u32,
  pub addrs_per_block_sq: u32,
  pub first_single: u32,
  pub first_double: u32,
  pub first_triple: u32,
  pub last_addressable: u32,
}

impl Default for Layout {
  fn default() -> Self {
    // Default geometry is known valid 默认参数必然合法
    match Self::new(&[]) {
      Ok(layout) => layout,
      Err(_) => unreachable!(),
    }
  }
}

impl Layout {
  /// Build layout from configuration
  /// 由配置构建布局
  pub fn new(conf: &[Conf]) -> Result<Self> {
    let mut block_size = BLOCK_SIZE;
    let mut footer_size = FOOTER_SIZE;
    let mut direct = DIRECT_BLOCKS;
    for c in conf {
      match *c {
        Conf::BlockSize(n) => block_size = n,
        Conf::FooterSize(n) => footer_size = n,
        Conf::DirectBlocks(n) => direct = n,
      }
    }

    if block_size % ADDR_SIZE != 0 {
      return Err(Error::InvalidConf("block size must be a multiple of 4"));
    }
    if (footer_size as usize) < Footer::SIZE || footer_size >= block_size {
      return Err(Error::InvalidConf("footer does not fit the block"));
    }
    if direct == 0 {
      return Err(Error::InvalidConf("at least one direct block"));
    }

    let block_data_len = block_size - footer_size;
    let apb = (block_data_len / ADDR_SIZE) as u64;
    if apb < 2 {
      return Err(Error::InvalidConf("indirect block holds fewer than 2 addresses"));
    }

    let sq = apb * apb;
    let first_single = direct as u64;
    let first_double = first_single + apb;
    let first_triple = first_double + sq;
    let last = sq
      .checked_mul(apb)
      .and_then(|cube| cube.checked_add(first_triple))
      .map(|end| end - 1)
      .filter(|last| *last < MAX_BLOCK_IDX)
      .ok_or(Error::InvalidConf("triple indirect capacity exceeds 31-bit index"))?;

    Ok(Self {
      block_size,
      footer_size,
      block_data_len,
      addrs_per_block: apb as u32,
      addrs_per_block_sq: sq as u32,
      first_single: first_single as u32,
      first_double: first_double as u32,
      first_triple: first_triple as u32,
      last_addressable: last as u32,
    })
  }

  /// Direct block count 直接块数量
  #[inline]
  pub const fn direct_blocks(&self) -> u32 {
    self.first_single
  }

  /// Byte size of the whole addressable space
  /// 可寻址空间的总字节数
  #[inline]
  pub const fn capacity(&self) -> u64 {
    (self.last_addressable as u64 + 1) * self.block_data_len as u64
  }

  /// Translate a logical byte position into an indirect traversal plan
  /// 将逻辑字节位置转换为间接寻址路径
  pub fn plan(&self, position: i64) -> Result<Plan> {
    if position < 0 {
      return Err(Error::InvalidArgument(position));
    }

    let idx = position as u64 / self.block_data_len as u64;
    if idx > self.last_addressable as u64 {
      return Err(Error::AddressOutOfRange(idx));
    }
    let idx = idx as u32;
    let apb = self.addrs_per_block;
    let sq = self.addrs_per_block_sq;

    let (level, slots) = if idx < self.first_single {
      (Level::Direct, [None, None, None])
    } else if idx < self.first_double {
      (Level::Single, [Some(idx - self.first_single), None, None])
    } else if idx < self.first_triple {
      let i = idx - self.first_double;
      (Level::Double, [Some(i / apb), Some(i % apb), None])
    } else {
      let i = idx - self.first_triple;
      (Level::Triple, [Some(i / sq), Some(i / apb % apb), Some(i % apb)])
    };

    let slot = |n: usize| slots[n].unwrap_or(0);
    let bases = match level {
      Level::Direct => [0, 0, 0],
      Level::Single => [self.first_single, 0, 0],
      Level::Double => [self.first_double, self.first_double + apb * slot(0), 0],
      Level::Triple => {
        let second = self.first_triple + sq * slot(0);
        [self.first_triple, second, second + apb * slot(1)]
      }
    };

    Ok(Plan {
      level,
      block_idx: idx,
      base_addr: idx as u64 * self.block_data_len as u64,
      offsets: slots.map(|s| s.map(|s| s * ADDR_SIZE)),
      bases,
    })
  }
}
