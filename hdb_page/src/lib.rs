#![cfg_attr(docsrs, feature(doc_cfg))]

//! Block store access through indirect blocks
//! 经间接块访问块存储

mod error;
mod feature;
mod inode;
mod io;
mod parser;

pub use error::{Error, Result};
pub use feature::{Feature, Reader, Writer};
pub use inode::Inode;
pub use io::{BlockIo, MemBlocks};
pub use parser::Parser;
