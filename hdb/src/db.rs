//! Hdb - writer, finalizer and committer wired together
//! 写入者、定型线程与提交线程的组装

use std::sync::Arc;

use hdb_val::HistorianValue;
use parking_lot::RwLock;

use crate::{ArchiveList, Committer, Conf, Error, Result, Stage, Writer, conf};

/// Running pipeline 运行中的流水线
pub struct Hdb {
  writer: Writer,
  stage: Stage,
  committer: Committer,
  archive: Arc<RwLock<ArchiveList>>,
}

impl Hdb {
  pub fn open(conf: &[Conf]) -> Result<Self> {
    let layout = conf::layout(conf)?;
    let (stream_tx, stream_rx) = conf::channel(conf);
    let (table_tx, table_rx) = conf::channel(conf);
    let archive = Arc::new(RwLock::new(ArchiveList::new()));
    Ok(Self {
      writer: Writer::new(stream_tx).with_archive(Arc::clone(&archive)),
      stage: Stage::spawn(stream_rx, table_tx, layout),
      committer: Committer::spawn(table_rx, Arc::clone(&archive)),
      archive,
    })
  }

  #[inline]
  pub fn put(&mut self, key: u64, val: HistorianValue) -> Option<HistorianValue> {
    self.writer.put(key, val)
  }

  /// Live stream first, then rolled streams awaiting commit, then tables
  /// 依次查活动流、待提交的已滚动流、已提交表
  pub fn get(&self, key: u64) -> Result<Option<HistorianValue>> {
    if let Some(v) = self.writer.get(key) {
      return Ok(Some(*v));
    }
    self.archive.read().get(key)
  }

  #[inline]
  pub fn rollover(&mut self) -> Result<Option<u64>> {
    self.writer.rollover()
  }

  #[inline]
  pub fn writer(&self) -> &Writer {
    &self.writer
  }

  #[inline]
  pub fn archive(&self) -> Arc<RwLock<ArchiveList>> {
    Arc::clone(&self.archive)
  }

  /// Roll the remaining samples, then drain and stop both threads.
  /// The committer's error is reported ahead of the stage's. Samples that
  /// could not be handed off come back in [`Error::Unsent`].
  /// 滚动剩余采样，处理完后停止两个线程。提交线程的错误优先于定型线程；
  /// 未能交接的采样经 [`Error::Unsent`] 返回。
  pub fn close(mut self) -> Result<()> {
    let rolled = self.writer.rollover();
    let Self {
      writer,
      stage,
      committer,
      ..
    } = self;
    let unsent = writer.into_stream();
    let stage = stage.join();
    let committer = committer.join();
    match committer.and(stage).and(rolled.map(|_| ())) {
      Err(cause) if !unsent.is_empty() => Err(Error::Unsent {
        stream: unsent,
        cause: Box::new(cause),
      }),
      r => r,
    }
  }
}
