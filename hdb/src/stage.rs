//! Stage - finalizes rolled streams on a worker thread
//! 在工作线程上将滚动出的流定型为表

use std::{sync::Arc, thread::JoinHandle};

use hdb_layout::Layout;
use hdb_rollover::{Payload, Rollover};
use log::{debug, error};

use crate::{Error, Result, Rx, Table, Tx};

/// Finalizer thread handle 定型线程句柄
pub struct Stage {
  handle: JoinHandle<Result<()>>,
}

impl Stage {
  /// Spawn the finalizer; it stops once `rx` is closed
  /// 启动定型线程，`rx` 关闭后退出
  pub fn spawn(rx: Rx, tx: Tx, layout: Layout) -> Self {
    let handle = std::thread::spawn(move || {
      let r = run(rx, tx, layout);
      if let Err(e) = &r {
        error!("stage stopped: {e}");
      }
      r
    });
    Self { handle }
  }

  /// Wait for the thread to drain and stop 等待线程处理完并退出
  pub fn join(self) -> Result<()> {
    self.handle.join().map_err(|_| Error::Panic("stage"))?
  }
}

fn run(mut rx: Rx, tx: Tx, layout: Layout) -> Result<()> {
  loop {
    let rec = match rx.recv() {
      Ok(rec) => rec,
      Err(hdb_rollover::Error::Closed) => return Ok(()),
      Err(e) => return Err(e.into()),
    };
    let (seq, payload) = rec.into_parts();
    let table = match payload {
      Payload::Stream(stream) => {
        let table = Table::build(&stream, layout)?;
        debug!("rollover {seq} finalized");
        Arc::new(table)
      }
      // Already finalized upstream 上游已定型
      Payload::Table(table) => table,
    };
    tx.send(Rollover::table(table, seq))?;
  }
}
