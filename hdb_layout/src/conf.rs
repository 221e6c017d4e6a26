/// Layout configuration
/// 布局配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conf {
  /// Block size in bytes, multiple of 4, default 4096
  /// 块大小（字节），须为 4 的倍数，默认 4096
  BlockSize(u32),
  /// Footer bytes reserved at the end of every block, default 32
  /// 每块末尾保留的块尾字节数，默认 32
  FooterSize(u32),
  /// Data blocks addressed straight from the inode, default 1
  /// inode 直接寻址的数据块数，默认 1
  DirectBlocks(u32),
}
