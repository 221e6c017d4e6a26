//! Translation plan and change granularity
//! 寻址路径与变化粒度

/// Number of indirect hops before the data block
/// 到达数据块前需经过的间接块数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
  Direct = 0,
  Single = 1,
  Double = 2,
  Triple = 3,
}

impl Level {
  /// Indirect hops 间接跳数
  #[inline]
  pub const fn depth(self) -> usize {
    self as usize
  }

  #[inline]
  pub const fn from_depth(depth: u8) -> Option<Self> {
    match depth {
      0 => Some(Self::Direct),
      1 => Some(Self::Single),
      2 => Some(Self::Double),
      3 => Some(Self::Triple),
      _ => None,
    }
  }
}

/// Coarsest level at which two plans differ
/// 两个路径首次出现差异的最外层级别
///
/// `Direct` means the indirection level itself changed and nothing cached is
/// reusable; `Triple` means only the deepest offset moved.
/// `Direct` 表示间接级别本身改变，缓存全部失效；`Triple` 表示仅最深层偏移改变。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Change {
  Direct = 0,
  Single = 1,
  Double = 2,
  Triple = 3,
  NoChange = 4,
}

impl Change {
  /// Diff two plans field by field, outermost first
  /// 由外向内逐字段比较两个路径
  pub fn between(prev: &Plan, next: &Plan) -> Self {
    if prev.level != next.level {
      return Self::Direct;
    }
    const BY_HOP: [Change; 3] = [Change::Single, Change::Double, Change::Triple];
    prev
      .offsets
      .iter()
      .zip(&next.offsets)
      .position(|(a, b)| a != b)
      .map_or(Self::NoChange, |hop| BY_HOP[hop])
  }

  /// Cached indirect depths still valid after this change
  /// 此变化后仍有效的缓存间接块层数
  ///
  /// Depth `d` is the indirect block read at hop `d`; it stays valid while the
  /// offsets above it are unchanged.
  #[inline]
  pub const fn kept_depth(self) -> usize {
    match self {
      Self::Direct => 0,
      Self::Single => 1,
      Self::Double => 2,
      Self::Triple | Self::NoChange => 3,
    }
  }
}

/// Path to the data block holding one logical position
/// 定位某逻辑位置所在数据块的路径
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
  pub level: Level,
  /// Data block index, also stored in the data block footer
  /// 数据块序号，同时写入数据块尾
  pub block_idx: u32,
  /// First logical byte of the data block 数据块首个逻辑字节
  pub base_addr: u64,
  /// Byte offset inside the indirect block at each hop (`index * 4`)
  /// 每一跳间接块内的字节偏移（`index * 4`）
  pub offsets: [Option<u32>; 3],
  /// First block index reachable through the indirect block at each hop
  /// 每一跳间接块可达的首个块序号
  pub bases: [u32; 3],
}

impl Plan {
  /// Offsets of the hops actually taken 实际经过的跳偏移
  #[inline]
  pub fn hops(&self) -> impl Iterator<Item = u32> + '_ {
    self.offsets.iter().map_while(|o| *o)
  }

  /// Position falls inside this plan's data block
  /// 位置是否落在本路径的数据块内
  #[inline]
  pub fn contains(&self, position: u64, block_data_len: u32) -> bool {
    position >= self.base_addr && position - self.base_addr < block_data_len as u64
  }
}
