//! 常量定义 Constants

/// 块大小 Block size
pub const BLOCK_SIZE: u32 = 4096;

/// 块尾大小 Block footer size
pub const FOOTER_SIZE: u32 = 32;

/// 直接块数量 Direct block count
pub const DIRECT_BLOCKS: u32 = 1;

/// 块地址宽度 On-disk width of one block pointer
pub const ADDR_SIZE: u32 = 4;

/// 未分配地址 Unallocated block address
pub const NULL_ADDR: u32 = 0;
