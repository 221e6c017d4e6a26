//! Finalized table
//! 已定型的表
//!
//! Layout inside the table's feature:
//! 表在特征内的布局：
//!
//! ```text
//! varint(count) | { varint(key ^ prev_key) | compressed value } * count
//! ```
//!
//! Both `prev_key` and the value codec start from zero.
//! `prev_key` 与值编解码器均从 0 开始。

use hdb_layout::Layout;
use hdb_page::{Feature, MemBlocks, Reader, Writer};
use hdb_val::{Decoder, Encoder, HistorianValue, varint};
use log::debug;

use crate::{Error, Result, Stream};

/// Bytes staged before each append 每次追加前暂存的字节数
const CHUNK: usize = 4096;

/// Upper bound of one encoded record 单条编码记录的上限
const RECORD_MAX: usize = varint::MAX_LEN * 4;

/// Immutable table, shared behind `Arc` by any number of readers
/// 不可变表，可经 `Arc` 被任意多个读者共享
#[derive(Debug)]
pub struct Table {
  store: MemBlocks,
  feature: Feature,
  len: u64,
  first_key: Option<u64>,
  last_key: Option<u64>,
}

impl Table {
  /// Finalize a stream into its own block store
  /// 将流定型到独立的块存储
  pub fn build(stream: &Stream, layout: Layout) -> Result<Self> {
    let mut w = Writer::new(MemBlocks::new(layout.block_size), layout)?;
    let mut buf = Vec::with_capacity(CHUNK + RECORD_MAX);
    varint::put(&mut buf, stream.len() as u64);

    let mut enc = Encoder::new();
    let mut prev = 0u64;
    for (key, val) in stream.iter() {
      varint::put(&mut buf, key ^ prev);
      enc.push(val, &mut buf);
      prev = key;
      if buf.len() >= CHUNK {
        w.append(&buf)?;
        buf.clear();
      }
    }
    if !buf.is_empty() {
      w.append(&buf)?;
    }

    let (store, feature) = w.finish()?;
    debug!(
      "table finalized: {} records, {} bytes, {} blocks",
      stream.len(),
      feature.len,
      store.len()
    );
    Ok(Self {
      store,
      feature,
      len: stream.len() as u64,
      first_key: stream.first_key(),
      last_key: stream.last_key(),
    })
  }

  /// Record count 记录数
  #[inline(always)]
  pub fn len(&self) -> u64 {
    self.len
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  #[inline]
  pub fn first_key(&self) -> Option<u64> {
    self.first_key
  }

  #[inline]
  pub fn last_key(&self) -> Option<u64> {
    self.last_key
  }

  /// Encoded bytes 编码后的字节数
  #[inline]
  pub fn size(&self) -> u64 {
    self.feature.len
  }

  #[inline]
  pub fn feature(&self) -> &Feature {
    &self.feature
  }

  #[inline]
  pub fn store(&self) -> &MemBlocks {
    &self.store
  }

  /// Ascending iteration with a private cursor
  /// 以私有游标升序遍历
  pub fn iter(&self) -> Result<Iter<'_>> {
    let mut it = Iter {
      reader: self.feature.reader(&self.store)?,
      buf: Vec::with_capacity(CHUNK + RECORD_MAX),
      at: 0,
      pos: 0,
      expect: 0,
      left: 0,
      key: 0,
      dec: Decoder::new(),
    };
    it.fill()?;
    let mut rd = &it.buf[..];
    let count = varint::get(&mut rd)?;
    it.at = it.buf.len() - rd.len();
    it.expect = count;
    it.left = count;
    Ok(it)
  }

  /// Point lookup by scanning 扫描查找单个键
  pub fn get(&self, key: u64) -> Result<Option<HistorianValue>> {
    match (self.first_key, self.last_key) {
      (Some(first), Some(last)) if (first..=last).contains(&key) => {}
      _ => return Ok(None),
    }
    for item in self.iter()? {
      let (k, v) = item?;
      if k >= key {
        return Ok((k == key).then_some(v));
      }
    }
    Ok(None)
  }
}

/// Decoding cursor over one table 单表解码游标
pub struct Iter<'a> {
  reader: Reader<'a, MemBlocks>,
  buf: Vec<u8>,
  /// Consumed bytes of `buf` `buf` 中已消费的字节
  at: usize,
  /// Next feature position to read 下一个待读的特征位置
  pos: u64,
  expect: u64,
  left: u64,
  key: u64,
  dec: Decoder,
}

impl Iter<'_> {
  /// Keep at least one whole record buffered 至少缓冲一条完整记录
  fn fill(&mut self) -> Result<()> {
    if self.buf.len() - self.at >= RECORD_MAX {
      return Ok(());
    }
    self.buf.drain(..self.at);
    self.at = 0;

    let n = (self.reader.len() - self.pos).min(CHUNK as u64) as usize;
    if n > 0 {
      let old = self.buf.len();
      self.buf.resize(old + n, 0);
      self.reader.read_at(self.pos, &mut self.buf[old..])?;
      self.pos += n as u64;
    }
    Ok(())
  }

  fn record(&mut self) -> Result<(u64, HistorianValue)> {
    self.fill()?;
    let mut rd = &self.buf[self.at..];
    let decoded = varint::get(&mut rd).and_then(|delta| Ok((delta, self.dec.decode(&mut rd)?)));
    let (delta, val) = match decoded {
      Ok(r) => r,
      Err(hdb_val::Error::Eof) => {
        return Err(Error::Truncated {
          expect: self.expect,
          got: self.expect - self.left,
        });
      }
      Err(e) => return Err(e.into()),
    };
    self.at = self.buf.len() - rd.len();
    self.key ^= delta;
    self.left -= 1;
    Ok((self.key, val))
  }
}

impl Iterator for Iter<'_> {
  type Item = Result<(u64, HistorianValue)>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.left == 0 {
      return None;
    }
    let r = self.record();
    if r.is_err() {
      self.left = 0;
    }
    Some(r)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let n = self.left as usize;
    (n, Some(n))
  }
}
