//! Rollover record 滚动记录

/// Exactly one handle per record 每条记录恰好一个句柄
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload<S, T> {
  /// Live stream, still owned by whoever holds the record
  /// 活动流，归持有记录者所有
  Stream(S),
  /// Finalized immutable table 已完成的不可变表
  Table(T),
}

/// Stream or table bound to its sequence number
/// 与序号绑定的流或表
///
/// Immutable once built; ownership of the handle moves with the record.
/// 构建后不可变，句柄所有权随记录转移。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rollover<S, T> {
  seq: u64,
  payload: Payload<S, T>,
}

impl<S, T> Rollover<S, T> {
  #[inline]
  pub fn stream(stream: S, seq: u64) -> Self {
    Self {
      seq,
      payload: Payload::Stream(stream),
    }
  }

  #[inline]
  pub fn table(table: T, seq: u64) -> Self {
    Self {
      seq,
      payload: Payload::Table(table),
    }
  }

  #[inline]
  pub fn seq(&self) -> u64 {
    self.seq
  }

  /// Table handle present 是否携带表句柄
  #[inline]
  pub fn is_finalized(&self) -> bool {
    matches!(self.payload, Payload::Table(_))
  }

  #[inline]
  pub fn payload(&self) -> &Payload<S, T> {
    &self.payload
  }

  #[inline]
  pub fn as_stream(&self) -> Option<&S> {
    match &self.payload {
      Payload::Stream(s) => Some(s),
      Payload::Table(_) => None,
    }
  }

  #[inline]
  pub fn as_table(&self) -> Option<&T> {
    match &self.payload {
      Payload::Table(t) => Some(t),
      Payload::Stream(_) => None,
    }
  }

  /// Take the stream, or give the record back
  /// 取出流，否则原样返回记录
  pub fn into_stream(self) -> std::result::Result<(u64, S), Self> {
    match self.payload {
      Payload::Stream(s) => Ok((self.seq, s)),
      payload => Err(Self { seq: self.seq, payload }),
    }
  }

  /// Take the table, or give the record back
  /// 取出表，否则原样返回记录
  pub fn into_table(self) -> std::result::Result<(u64, T), Self> {
    match self.payload {
      Payload::Table(t) => Ok((self.seq, t)),
      payload => Err(Self { seq: self.seq, payload }),
    }
  }

  #[inline]
  pub fn into_parts(self) -> (u64, Payload<S, T>) {
    (self.seq, self.payload)
  }
}
