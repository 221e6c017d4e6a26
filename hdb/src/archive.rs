//! Archive list and its committer
//! 归档列表及其提交者

use std::{collections::BTreeMap, sync::Arc, thread::JoinHandle};

use hdb_val::HistorianValue;
use log::{debug, error};
use parking_lot::RwLock;

use crate::{Error, Result, Rx, Stream, Table};

/// Committed tables in sequence order, plus rolled streams not yet committed
/// 按序号排列的已提交表，以及尚未提交的已滚动流
#[derive(Debug, Default)]
pub struct ArchiveList {
  tables: Vec<(u64, Arc<Table>)>,
  pending: BTreeMap<u64, Arc<Stream>>,
}

impl ArchiveList {
  #[inline]
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a finalized table; sequence must exceed the last one
  /// 追加已定型表，序号须大于最后一个
  pub fn push(&mut self, seq: u64, table: Arc<Table>) -> Result<()> {
    let last = self.last_seq();
    if seq <= last {
      return Err(hdb_rollover::Error::Stale { last, got: seq }.into());
    }
    self.tables.push((seq, table));
    self.pending.retain(|s, _| *s > seq);
    Ok(())
  }

  /// Keep a rolled stream readable until its table is pushed
  /// 保留已滚动的流，直到其表被追加
  #[inline]
  pub fn hold(&mut self, seq: u64, stream: Arc<Stream>) {
    self.pending.insert(seq, stream);
  }

  /// Drop a held stream that was never sent 移除未发出的保留流
  #[inline]
  pub fn release(&mut self, seq: u64) -> Option<Arc<Stream>> {
    self.pending.remove(&seq)
  }

  /// Rolled streams awaiting commit 等待提交的已滚动流数量
  #[inline]
  pub fn pending(&self) -> usize {
    self.pending.len()
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.tables.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.tables.is_empty()
  }

  /// Sequence number of the newest table, 0 when empty
  /// 最新表的序号，空时为 0
  #[inline]
  pub fn last_seq(&self) -> u64 {
    self.tables.last().map_or(0, |(seq, _)| *seq)
  }

  #[inline]
  pub fn tables(&self) -> &[(u64, Arc<Table>)] {
    &self.tables
  }

  /// Sample count over all tables 全部表的采样数
  pub fn samples(&self) -> u64 {
    self.tables.iter().map(|(_, t)| t.len()).sum()
  }

  /// Pending streams before tables, newest first 先查待提交流再查表，新者优先
  pub fn get(&self, key: u64) -> Result<Option<HistorianValue>> {
    if let Some(v) = self.pending.values().rev().find_map(|s| s.get(key)) {
      return Ok(Some(*v));
    }
    for (_, table) in self.tables.iter().rev() {
      if let Some(v) = table.get(key)? {
        return Ok(Some(v));
      }
    }
    Ok(None)
  }
}

/// Commit thread appending finalized tables in order
/// 按序追加已定型表的提交线程
pub struct Committer {
  handle: JoinHandle<Result<()>>,
}

impl Committer {
  /// Spawn the committer; a stale or unfinalized record stops it
  /// 启动提交线程；遇到过期或未定型的记录即停止
  pub fn spawn(rx: Rx, archive: Arc<RwLock<ArchiveList>>) -> Self {
    let handle = std::thread::spawn(move || {
      let r = run(rx, &archive);
      if let Err(e) = &r {
        error!("committer stopped: {e}");
      }
      r
    });
    Self { handle }
  }

  /// Wait for the thread; returns the error that stopped it
  /// 等待线程结束，返回使其停止的错误
  pub fn join(self) -> Result<()> {
    self.handle.join().map_err(|_| Error::Panic("committer"))?
  }
}

fn run(mut rx: Rx, archive: &RwLock<ArchiveList>) -> Result<()> {
  loop {
    let rec = match rx.recv() {
      Ok(rec) => rec,
      Err(hdb_rollover::Error::Closed) => return Ok(()),
      Err(e) => return Err(e.into()),
    };
    let (seq, table) = rec
      .into_table()
      .map_err(|rec| Error::NotFinalized(rec.seq()))?;
    debug!("rollover {seq} committed: {} samples", table.len());
    archive.write().push(seq, table)?;
  }
}
