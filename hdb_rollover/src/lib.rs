#![cfg_attr(docsrs, feature(doc_cfg))]

//! Rollover hand-off between pipeline stages
//! 流水线阶段间的滚动交接
//!
//! A [`Rollover`] binds either a live stream or a finalized table to a sequence
//! number. Each consumer checks that sequence numbers strictly increase.
//! [`Rollover`] 将活动流或已完成表与序号绑定，每个消费者独立校验序号严格递增。

mod chan;
mod error;
mod order;
mod record;
mod seq;

pub use chan::{Rx, Tx, bounded, channel};
pub use error::{Error, Result};
pub use order::Order;
pub use record::{Payload, Rollover};
pub use seq::SeqGen;
