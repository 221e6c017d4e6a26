//! Root addresses of one feature 单个特征的根地址

use hdb_layout::{Layout, Level, NULL_ADDR};

/// Direct data blocks plus single / double / triple indirect roots
/// 直接数据块以及一、二、三级间接根块
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inode {
  pub direct: Box<[u32]>,
  /// Indexed by `level.depth() - 1` 以 `level.depth() - 1` 为下标
  pub roots: [u32; 3],
}

impl Inode {
  pub fn new(layout: &Layout) -> Self {
    Self {
      direct: vec![NULL_ADDR; layout.direct_blocks() as usize].into_boxed_slice(),
      roots: [NULL_ADDR; 3],
    }
  }

  /// Root indirect block of a tier, `None` for the direct tier
  /// 某层级的根间接块，直接层返回 `None`
  #[inline]
  pub fn root(&self, level: Level) -> Option<u32> {
    level.depth().checked_sub(1).map(|i| self.roots[i])
  }
}
