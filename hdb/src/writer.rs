//! Writer - owns the live stream
//! 写入者，持有活动流

use std::sync::Arc;

use hdb_rollover::{Rollover, SeqGen};
use hdb_val::HistorianValue;
use log::{debug, warn};
use parking_lot::RwLock;

use crate::{ArchiveList, Result, Stream, Tx};

/// Single writer of the live stream; rollovers leave in sequence order
/// 活动流的唯一写入者，滚动按序号依次发出
pub struct Writer {
  stream: Stream,
  seq: SeqGen,
  tx: Tx,
  archive: Option<Arc<RwLock<ArchiveList>>>,
}

impl Writer {
  #[inline]
  pub fn new(tx: Tx) -> Self {
    Self::with_seq(tx, SeqGen::new())
  }

  /// Continue numbering from a recovered generator 沿用已恢复的序号生成器
  #[inline]
  pub fn with_seq(tx: Tx, seq: SeqGen) -> Self {
    Self {
      stream: Stream::new(),
      seq,
      tx,
      archive: None,
    }
  }

  /// Keep rolled streams readable in `archive` until committed
  /// 已滚动的流在提交前保留于 `archive` 中可读
  #[inline]
  pub fn with_archive(mut self, archive: Arc<RwLock<ArchiveList>>) -> Self {
    self.archive = Some(archive);
    self
  }

  #[inline]
  pub fn put(&mut self, key: u64, val: HistorianValue) -> Option<HistorianValue> {
    self.stream.put(key, val)
  }

  #[inline]
  pub fn get(&self, key: u64) -> Option<&HistorianValue> {
    self.stream.get(key)
  }

  /// Live stream 活动流
  #[inline]
  pub fn stream(&self) -> &Stream {
    &self.stream
  }

  /// Give up the writer, keeping what was never rolled
  /// 放弃写入者，取回未滚动的采样
  #[inline]
  pub fn into_stream(self) -> Stream {
    self.stream
  }

  /// Swap in an empty stream and send the old one downstream.
  /// Returns its sequence number, `None` when there was nothing to roll.
  /// If the channel is closed the samples stay in the live stream and the
  /// sequence number is not consumed.
  /// 换入空流并把旧流发往下游，返回其序号；无数据时返回 `None`。
  /// 通道已关闭时采样留在活动流中，序号不被消耗。
  pub fn rollover(&mut self) -> Result<Option<u64>> {
    if self.stream.is_empty() {
      return Ok(None);
    }
    let seq = self.seq.peek();
    let stream = Arc::new(std::mem::take(&mut self.stream));
    debug!("rollover {seq}: {} samples", stream.len());
    if let Some(archive) = &self.archive {
      archive.write().hold(seq, Arc::clone(&stream));
    }

    if let Err(rec) = self.tx.offer(Rollover::stream(stream, seq)) {
      if let Some(archive) = &self.archive {
        archive.write().release(seq);
      }
      if let Ok((_, stream)) = rec.into_stream() {
        self.stream = Arc::unwrap_or_clone(stream);
      }
      warn!("rollover {seq} not sent, {} samples kept", self.stream.len());
      return Err(hdb_rollover::Error::Closed.into());
    }
    self.seq.alloc();
    Ok(Some(seq))
  }
}
