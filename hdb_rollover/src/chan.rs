//! FIFO hand-off channel 先进先出交接通道

use std::sync::mpsc::{self, Receiver, SendError, Sender, SyncSender, TryRecvError};

use crate::{Error, Order, Result, Rollover};

enum Inner<M> {
  Unbounded(Sender<M>),
  Bounded(SyncSender<M>),
}

impl<M> Clone for Inner<M> {
  fn clone(&self) -> Self {
    match self {
      Self::Unbounded(tx) => Self::Unbounded(tx.clone()),
      Self::Bounded(tx) => Self::Bounded(tx.clone()),
    }
  }
}

/// Sending half, forwards records unchanged
/// 发送端，原样转发记录
pub struct Tx<S, T> {
  inner: Inner<Rollover<S, T>>,
}

impl<S, T> Clone for Tx<S, T> {
  fn clone(&self) -> Self {
    Self {
      inner: self.inner.clone(),
    }
  }
}

impl<S, T> Tx<S, T> {
  /// Blocks while a bounded channel is full 有界通道满时阻塞
  #[inline]
  pub fn send(&self, rec: Rollover<S, T>) -> Result<()> {
    self.offer(rec).map_err(|_| Error::Closed)
  }

  /// Like [`send`](Self::send), but a closed channel hands the record back
  /// 同 [`send`](Self::send)，通道关闭时交还记录
  pub fn offer(&self, rec: Rollover<S, T>) -> std::result::Result<(), Rollover<S, T>> {
    match &self.inner {
      Inner::Unbounded(tx) => tx.send(rec),
      Inner::Bounded(tx) => tx.send(rec),
    }
    .map_err(|SendError(rec)| rec)
  }
}

/// Receiving half, validates order before handing a record out
/// 接收端，交出记录前校验顺序
pub struct Rx<S, T> {
  rx: Receiver<Rollover<S, T>>,
  order: Order,
}

impl<S, T> Rx<S, T> {
  /// Next record; a stale one is dropped and reported
  /// 下一条记录；过期记录被丢弃并报错
  pub fn recv(&mut self) -> Result<Rollover<S, T>> {
    let rec = self.rx.recv().map_err(|_| Error::Closed)?;
    self.order.check(rec.seq())?;
    Ok(rec)
  }

  /// Like [`recv`](Self::recv) but `Ok(None)` when nothing is queued
  /// 同 [`recv`](Self::recv)，队列为空时返回 `Ok(None)`
  pub fn try_recv(&mut self) -> Result<Option<Rollover<S, T>>> {
    let rec = match self.rx.try_recv() {
      Ok(rec) => rec,
      Err(TryRecvError::Empty) => return Ok(None),
      Err(TryRecvError::Disconnected) => return Err(Error::Closed),
    };
    self.order.check(rec.seq())?;
    Ok(Some(rec))
  }

  #[inline]
  pub fn order(&self) -> &Order {
    &self.order
  }
}

/// Unbounded FIFO channel 无界先进先出通道
pub fn channel<S, T>() -> (Tx<S, T>, Rx<S, T>) {
  let (tx, rx) = mpsc::channel();
  (
    Tx {
      inner: Inner::Unbounded(tx),
    },
    Rx {
      rx,
      order: Order::new(),
    },
  )
}

/// FIFO channel holding at most `cap` records 最多容纳 `cap` 条记录的通道
pub fn bounded<S, T>(cap: usize) -> (Tx<S, T>, Rx<S, T>) {
  let (tx, rx) = mpsc::sync_channel(cap);
  (
    Tx {
      inner: Inner::Bounded(tx),
    },
    Rx {
      rx,
      order: Order::new(),
    },
  )
}
