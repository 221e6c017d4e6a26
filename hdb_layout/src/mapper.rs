//! Stateful translator remembering the previous plan
//! 记住上一次路径的有状态转换器

use crate::{Change, Layout, Plan, Result};

/// Translates positions and reports what changed since the last call
/// 转换位置并报告自上次调用以来的变化
///
/// One mapper per cursor; it owns its previous plan and is not shared.
/// 每个游标一个 mapper，独占上一次的路径，不可共享。
#[derive(Debug, Clone)]
pub struct Mapper {
  layout: Layout,
  prev: Plan,
}

impl Mapper {
  /// Starts at position 0 起始位置为 0
  pub fn new(layout: Layout) -> Result<Self> {
    let prev = layout.plan(0)?;
    Ok(Self { layout, prev })
  }

  #[inline]
  pub fn layout(&self) -> &Layout {
    &self.layout
  }

  /// Last successful plan 上一次成功的路径
  #[inline]
  pub fn plan(&self) -> &Plan {
    &self.prev
  }

  /// Translate `position`; on error the previous plan is kept
  /// 转换 `position`；出错时保留上一次的路径
  pub fn translate(&mut self, position: i64) -> Result<(Plan, Change)> {
    let next = self.layout.plan(position)?;
    let change = Change::between(&self.prev, &next);
    self.prev = next;
    Ok((next, change))
  }
}
