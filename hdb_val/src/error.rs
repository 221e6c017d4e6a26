use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("string of {0} chars exceeds 16 / 字符串超过 16 个字符")]
  Overflow(usize),

  #[error("unexpected end of buffer / 缓冲区意外结束")]
  Eof,

  #[error("varint exceeds 64 bits / 变长整数超过 64 位")]
  VarintOverflow,
}

pub type Result<T> = std::result::Result<T, Error>;
