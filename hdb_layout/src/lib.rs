#![cfg_attr(docsrs, feature(doc_cfg))]

//! Block layout and indirect address translation
//! 块布局与间接地址转换
//!
//! A feature's logical byte space is split into fixed-size data blocks.
//! Blocks are reached directly or through 1, 2 or 3 indirect blocks,
//! the same way a classic inode maps file offsets.
//! 特征的逻辑字节空间被切分为定长数据块，经 0 到 3 级间接块寻址（同 inode）。

mod conf;
mod consts;
mod error;
mod footer;
mod layout;
mod mapper;
mod plan;
mod ptr;

pub use conf::Conf;
pub use consts::{ADDR_SIZE, BLOCK_SIZE, DIRECT_BLOCKS, FOOTER_SIZE, NULL_ADDR};
pub use error::{Error, Result};
pub use footer::{Footer, kind};
pub use layout::Layout;
pub use mapper::Mapper;
pub use plan::{Change, Level, Plan};
pub use ptr::{read_addr, write_addr};
