//! Storage configuration
//! 存储配置

use hdb_layout::Layout;

use crate::Result;

/// Storage configuration
/// 存储配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conf {
  /// Table block layout
  /// 表的块布局
  Layout(hdb_layout::Conf),
  /// Records queued between stages, default unbounded
  /// 阶段间排队的记录数，默认无界
  ChannelCap(usize),
}

/// Layout built from every `Conf::Layout` item
/// 由全部 `Conf::Layout` 项构建布局
pub(crate) fn layout(conf: &[Conf]) -> Result<Layout> {
  let items: Vec<hdb_layout::Conf> = conf
    .iter()
    .filter_map(|c| match *c {
      Conf::Layout(l) => Some(l),
      Conf::ChannelCap(_) => None,
    })
    .collect();
  Ok(Layout::new(&items)?)
}

pub(crate) fn channel_cap(conf: &[Conf]) -> Option<usize> {
  conf.iter().rev().find_map(|c| match *c {
    Conf::ChannelCap(n) => Some(n),
    Conf::Layout(_) => None,
  })
}

/// Hand-off channel sized by configuration 按配置创建交接通道
pub(crate) fn channel(conf: &[Conf]) -> (crate::Tx, crate::Rx) {
  match channel_cap(conf) {
    Some(cap) => hdb_rollover::bounded(cap),
    None => hdb_rollover::channel(),
  }
}
