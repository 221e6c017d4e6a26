use aok::{OK, Void};
use hdb_val::{Decoder, Encoder, Error, HistorianValue, RAW_SIZE, STR_LEN, varint};
use proptest::prelude::*;

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

fn any_value() -> impl Strategy<Value = HistorianValue> {
  (any::<u64>(), any::<u64>(), any::<u64>()).prop_map(|(a, b, c)| HistorianValue::new(a, b, c))
}

#[test]
fn test_raw_layout() -> Void {
  let v = HistorianValue::new(1, 0x0203, u64::MAX);
  let mut buf = Vec::new();
  v.write_raw(&mut buf);
  assert_eq!(buf.len(), RAW_SIZE);
  assert_eq!(&buf[..8], &1u64.to_le_bytes());
  assert_eq!(&buf[8..16], &0x0203u64.to_le_bytes());
  assert_eq!(&buf[16..], &[0xFF; 8]);

  let mut rd = buf.as_slice();
  assert_eq!(HistorianValue::read_raw(&mut rd)?, v);
  assert!(rd.is_empty());
  OK
}

#[test]
fn test_raw_truncated() -> Void {
  let buf = [0u8; RAW_SIZE - 1];
  let mut rd = &buf[..];
  assert_eq!(HistorianValue::read_raw(&mut rd), Err(Error::Eof));
  assert_eq!(rd.len(), RAW_SIZE - 1);
  OK
}

#[test]
fn test_varint_bytes() -> Void {
  let mut buf = Vec::new();
  varint::put(&mut buf, 0);
  varint::put(&mut buf, 127);
  varint::put(&mut buf, 300);
  assert_eq!(buf, [0x00, 0x7F, 0xAC, 0x02]);

  let mut rd = buf.as_slice();
  assert_eq!(varint::get(&mut rd)?, 0);
  assert_eq!(varint::get(&mut rd)?, 127);
  assert_eq!(varint::get(&mut rd)?, 300);
  assert!(rd.is_empty());
  OK
}

#[test]
fn test_varint_len() -> Void {
  assert_eq!(varint::len(0), 1);
  assert_eq!(varint::len(127), 1);
  assert_eq!(varint::len(128), 2);
  assert_eq!(varint::len(u64::MAX), varint::MAX_LEN);

  let mut buf = Vec::new();
  varint::put(&mut buf, u64::MAX);
  assert_eq!(buf.len(), varint::MAX_LEN);
  assert_eq!(varint::get(&mut buf.as_slice())?, u64::MAX);
  OK
}

#[test]
fn test_varint_malformed() -> Void {
  let too_long = [0xFFu8; 11];
  assert_eq!(varint::get(&mut &too_long[..]), Err(Error::VarintOverflow));

  // 10th group may only hold one bit 第 10 组只能有 1 位
  let mut wide = [0xFFu8; 10];
  wide[9] = 0x02;
  assert_eq!(varint::get(&mut &wide[..]), Err(Error::VarintOverflow));

  let cut = [0x80u8, 0x80];
  let mut rd = &cut[..];
  assert_eq!(varint::get(&mut rd), Err(Error::Eof));
  assert_eq!(rd.len(), 2);
  OK
}

#[test]
fn test_compressed_same_value_minimal() -> Void {
  let v = HistorianValue::new(0xDEAD_BEEF, 42, 0xC0);
  let mut buf = Vec::new();
  v.write_compressed(&v, &mut buf);
  assert_eq!(buf, [0, 0, 0]);
  assert_eq!(v.compressed_len(&v), 3);
  assert_eq!(HistorianValue::read_compressed(&v, &mut buf.as_slice())?, v);
  OK
}

#[test]
fn test_compressed_shares_high_bits() -> Void {
  let prev = HistorianValue::new(0x4049_0FDB_0000_0000, 0, 0xC0);
  let next = HistorianValue::new(0x4049_0FDC_0000_0000, 0, 0xC0);
  let mut buf = Vec::new();
  next.write_compressed(&prev, &mut buf);
  assert!(buf.len() < RAW_SIZE);
  assert_eq!(buf.len(), next.compressed_len(&prev));
  OK
}

#[test]
fn test_compressed_truncated_untouched() -> Void {
  let prev = HistorianValue::default();
  let v = HistorianValue::new(1000, 2000, 3000);
  let mut buf = Vec::new();
  v.write_compressed(&prev, &mut buf);
  buf.pop();

  let mut rd = buf.as_slice();
  assert_eq!(
    HistorianValue::read_compressed(&prev, &mut rd),
    Err(Error::Eof)
  );
  assert_eq!(rd.len(), buf.len());
  OK
}

#[test]
fn test_clear_and_copy() -> Void {
  let mut v = HistorianValue::new(1, 2, 3);
  let copy = v;
  v.clear();
  assert_eq!(v, HistorianValue::default());
  assert_eq!(copy, HistorianValue::new(1, 2, 3));
  assert_ne!(v, copy);
  OK
}

#[test]
fn test_numeric_views() -> Void {
  let mut v = HistorianValue::default();
  v.set_i64(-2);
  assert_eq!(v.as_i64(), -2);
  assert_eq!(v.as_u64(), u64::MAX - 1);
  assert_eq!(v.as_u32(), u32::MAX - 1);

  v.set_u32(7);
  assert_eq!(v.value1, 7);

  v.set_f64(1.5);
  assert_eq!(v.as_f64(), 1.5);
  assert_eq!(v.as_u64(), 1.5f64.to_bits());

  v.set_quality(0xC0);
  assert_eq!(v.quality(), 0xC0);
  assert_eq!(v.value3, 0xC0);
  OK
}

#[test]
fn test_f32_view() -> Void {
  let mut v = HistorianValue::new(u64::MAX, 9, 9);
  v.set_f32(3.25);
  assert_eq!(v.as_f32(), 3.25);
  assert_eq!(v.value1, 3.25f32.to_bits() as u64);
  assert_eq!(v.value2, 9);

  // Reinterpretation of whatever was last written 按位重新解释最后写入的值
  v.set_u64(0xFFFF_FFFF_0000_0000 | 1.0f32.to_bits() as u64);
  assert_eq!(v.as_f32(), 1.0);
  OK
}

#[test]
fn test_str_view() -> Void {
  let mut v = HistorianValue::default();
  v.set_str("0123456789ABCDEF")?;
  assert_eq!(v.as_str(), "0123456789ABCDEF");
  assert_eq!(v.value1, u64::from_le_bytes(*b"01234567"));
  assert_eq!(v.value2, u64::from_le_bytes(*b"89ABCDEF"));

  v.set_str("abc")?;
  assert_eq!(v.as_str(), "abc");
  assert_eq!(v.str_bytes()[3..], [0u8; STR_LEN - 3]);

  v.set_str("")?;
  assert_eq!(v.as_str(), "");
  OK
}

#[test]
fn test_str_overflow() -> Void {
  let mut v = HistorianValue::new(1, 2, 3);
  assert_eq!(v.set_str("0123456789ABCDEFG"), Err(Error::Overflow(17)));
  assert_eq!(v, HistorianValue::new(1, 2, 3));
  OK
}

#[test]
fn test_str_non_ascii() -> Void {
  let mut v = HistorianValue::default();
  v.set_str("温度-1")?;
  assert_eq!(v.as_str(), "??-1");

  // 16 chars but more than 16 bytes 16 个字符但超过 16 字节
  v.set_str("ééééééééééééééééé")
    .expect_err("17 chars must overflow");
  v.set_str("éééééééééééééééé")?;
  assert_eq!(v.as_str(), "?".repeat(16));
  OK
}

#[test]
fn test_str_view_reads_numeric_words() -> Void {
  let mut v = HistorianValue::default();
  v.set_u64(u64::from_le_bytes(*b"PUMP-01\0"));
  assert_eq!(v.as_str(), "PUMP-01");
  OK
}

#[test]
fn test_run_codec() -> Void {
  let samples: Vec<_> = (0..100u64)
    .map(|i| HistorianValue::new(1000 + i, 0, if i % 10 == 0 { 1 } else { 0xC0 }))
    .collect();

  let mut enc = Encoder::new();
  let mut buf = Vec::new();
  for v in &samples {
    enc.push(v, &mut buf);
  }
  assert!(buf.len() < samples.len() * RAW_SIZE / 4);

  let mut dec = Decoder::new();
  let mut rd = buf.as_slice();
  for v in &samples {
    assert_eq!(dec.decode(&mut rd)?, *v);
  }
  assert!(rd.is_empty());
  assert_eq!(dec.decode(&mut rd), Err(Error::Eof));
  OK
}

#[test]
fn test_run_reset() -> Void {
  let v = HistorianValue::new(5, 6, 7);
  let mut enc = Encoder::new();
  let mut first = Vec::new();
  enc.push(&v, &mut first);
  enc.reset();
  let mut second = Vec::new();
  enc.push(&v, &mut second);
  assert_eq!(first, second);
  OK
}

#[test]
fn test_serde_bitcode() -> Void {
  let v = HistorianValue::new(1, 2, 3);
  let json = serde_json::to_string(&v)?;
  assert_eq!(serde_json::from_str::<HistorianValue>(&json)?, v);
  let bin = bitcode::encode(&v);
  assert_eq!(bitcode::decode::<HistorianValue>(&bin)?, v);
  OK
}

proptest! {
  #[test]
  fn prop_raw_roundtrip(v in any_value()) {
    let mut buf = Vec::new();
    v.write_raw(&mut buf);
    prop_assert_eq!(HistorianValue::read_raw(&mut buf.as_slice()).unwrap(), v);
  }

  #[test]
  fn prop_compressed_roundtrip(prev in any_value(), v in any_value()) {
    let mut buf = Vec::new();
    v.write_compressed(&prev, &mut buf);
    prop_assert_eq!(buf.len(), v.compressed_len(&prev));
    let mut rd = buf.as_slice();
    prop_assert_eq!(HistorianValue::read_compressed(&prev, &mut rd).unwrap(), v);
    prop_assert!(rd.is_empty());
  }

  #[test]
  fn prop_varint_roundtrip(n in any::<u64>()) {
    let mut buf = Vec::new();
    varint::put(&mut buf, n);
    prop_assert_eq!(buf.len(), varint::len(n));
    prop_assert_eq!(varint::get(&mut buf.as_slice()).unwrap(), n);
  }
}
