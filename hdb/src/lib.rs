#![cfg_attr(docsrs, feature(doc_cfg))]

//! hdb - Historian storage core
//! hdb - 历史库存储核心
//!
//! Samples go into a live [`Stream`]. A rollover hands the stream to the
//! [`Stage`] thread, which finalizes it into an immutable [`Table`]; the
//! [`Committer`] thread appends tables to the [`ArchiveList`] strictly in
//! sequence order.
//! 采样写入活动 [`Stream`]；滚动时交给 [`Stage`] 线程定型为不可变 [`Table`]，
//! 再由 [`Committer`] 线程严格按序号追加到 [`ArchiveList`]。

use std::sync::Arc;

mod archive;
mod conf;
mod db;
mod error;
mod stage;
mod stream;
mod table;
mod writer;

pub use archive::{ArchiveList, Committer};
pub use conf::Conf;
pub use db::Hdb;
pub use error::{Error, Result};
pub use hdb_val::HistorianValue;
pub use stage::Stage;
pub use stream::Stream;
pub use table::{Iter, Table};
pub use writer::Writer;

/// Record flowing between stages 阶段间流转的记录
pub type Record = hdb_rollover::Rollover<Arc<Stream>, Arc<Table>>;
pub type Tx = hdb_rollover::Tx<Arc<Stream>, Arc<Table>>;
pub type Rx = hdb_rollover::Rx<Arc<Stream>, Arc<Table>>;
