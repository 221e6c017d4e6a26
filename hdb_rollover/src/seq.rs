/// Producer-side sequence allocator, first number is 1
/// 生产者侧序号分配器，首个序号为 1
#[derive(Debug, Clone)]
pub struct SeqGen {
  next: u64,
}

impl Default for SeqGen {
  fn default() -> Self {
    Self { next: 1 }
  }
}

impl SeqGen {
  #[inline]
  pub fn new() -> Self {
    Self::default()
  }

  /// Continue after a recovered `last` 从恢复的 `last` 之后继续
  #[inline]
  pub fn after(last: u64) -> Self {
    Self { next: last + 1 }
  }

  /// Number the next call hands out 下次分配的序号
  #[inline]
  pub fn peek(&self) -> u64 {
    self.next
  }

  /// Hand out a number, never reused 分配序号，永不复用
  #[inline]
  pub fn alloc(&mut self) -> u64 {
    let seq = self.next;
    self.next += 1;
    seq
  }
}
