use aok::{OK, Void};
use hdb_layout::{
  Change, Conf, Error, Footer, Layout, Level, Mapper, kind, read_addr, write_addr,
};
use proptest::prelude::*;

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

// 64-byte blocks: 48 payload bytes, 12 addresses per indirect block
// 64 字节块：48 字节载荷，每个间接块 12 个地址
fn small() -> Layout {
  Layout::new(&[Conf::BlockSize(64), Conf::FooterSize(16)]).unwrap()
}

const LEN: i64 = 48;

#[test]
fn test_default_layout() -> Void {
  let l = Layout::default();
  assert_eq!(l.block_size, 4096);
  assert_eq!(l.block_data_len, 4064);
  assert_eq!(l.addrs_per_block, 1016);
  assert_eq!(l.addrs_per_block_sq, 1016 * 1016);
  assert_eq!(l.first_single, 1);
  assert_eq!(l.first_double, 1017);
  assert_eq!(l.first_triple, 1_033_273);
  assert_eq!(l.last_addressable, 1_049_805_368);
  assert!((l.last_addressable as u64) < i32::MAX as u64);
  OK
}

#[test]
fn test_small_layout() -> Void {
  let l = small();
  assert_eq!(l.addrs_per_block, 12);
  assert_eq!(l.first_single, 1);
  assert_eq!(l.first_double, 13);
  assert_eq!(l.first_triple, 157);
  assert_eq!(l.last_addressable, 1884);
  assert_eq!(l.capacity(), 1885 * 48);
  OK
}

#[test]
fn test_invalid_conf() -> Void {
  assert!(matches!(
    Layout::new(&[Conf::BlockSize(63)]),
    Err(Error::InvalidConf(_))
  ));
  assert!(matches!(
    Layout::new(&[Conf::FooterSize(8)]),
    Err(Error::InvalidConf(_))
  ));
  assert!(matches!(
    Layout::new(&[Conf::DirectBlocks(0)]),
    Err(Error::InvalidConf(_))
  ));
  // Triple capacity would overflow the 31-bit index space
  // 三级间接容量超出 31 位索引空间
  assert!(matches!(
    Layout::new(&[Conf::BlockSize(1 << 20)]),
    Err(Error::InvalidConf(_))
  ));
  OK
}

#[test]
fn test_negative_position() -> Void {
  let l = small();
  assert_eq!(l.plan(-1), Err(Error::InvalidArgument(-1)));
  assert_eq!(l.plan(i64::MIN), Err(Error::InvalidArgument(i64::MIN)));
  OK
}

#[test]
fn test_out_of_range() -> Void {
  let l = small();
  let last = l.last_addressable as i64;
  assert!(l.plan(last * LEN + LEN - 1).is_ok());
  assert_eq!(
    l.plan((last + 1) * LEN),
    Err(Error::AddressOutOfRange(last as u64 + 1))
  );
  assert!(matches!(l.plan(i64::MAX), Err(Error::AddressOutOfRange(_))));
  OK
}

#[test]
fn test_direct() -> Void {
  let p = small().plan(LEN - 1)?;
  assert_eq!(p.level, Level::Direct);
  assert_eq!(p.block_idx, 0);
  assert_eq!(p.base_addr, 0);
  assert_eq!(p.offsets, [None, None, None]);
  assert_eq!(p.bases, [0, 0, 0]);
  assert_eq!(p.hops().count(), 0);
  OK
}

#[test]
fn test_tier_boundaries_select_new_tier() -> Void {
  let l = small();

  let p = l.plan(l.first_single as i64 * LEN)?;
  assert_eq!(p.level, Level::Single);
  assert_eq!(p.offsets, [Some(0), None, None]);
  assert_eq!(p.bases, [1, 0, 0]);

  let p = l.plan(l.first_double as i64 * LEN)?;
  assert_eq!(p.level, Level::Double);
  assert_eq!(p.offsets, [Some(0), Some(0), None]);
  assert_eq!(p.bases, [13, 13, 0]);

  let p = l.plan(l.first_triple as i64 * LEN)?;
  assert_eq!(p.level, Level::Triple);
  assert_eq!(p.offsets, [Some(0), Some(0), Some(0)]);
  assert_eq!(p.bases, [157, 157, 157]);

  // One byte before each boundary stays in the old tier
  // 边界前一字节仍属旧层级
  assert_eq!(l.plan(l.first_double as i64 * LEN - 1)?.level, Level::Single);
  assert_eq!(l.plan(l.first_triple as i64 * LEN - 1)?.level, Level::Double);
  OK
}

#[test]
fn test_single_offsets() -> Void {
  let p = small().plan(12 * LEN + 5)?;
  assert_eq!(p.level, Level::Single);
  assert_eq!(p.block_idx, 12);
  assert_eq!(p.offsets, [Some(11 * 4), None, None]);
  OK
}

#[test]
fn test_double_offsets() -> Void {
  // idx = 13 + 12 * 3 + 5
  let p = small().plan(54 * LEN)?;
  assert_eq!(p.level, Level::Double);
  assert_eq!(p.offsets, [Some(12), Some(20), None]);
  assert_eq!(p.bases, [13, 49, 0]);
  OK
}

#[test]
fn test_triple_offsets() -> Void {
  // idx = 157 + 144 * 2 + 12 * 3 + 7
  let p = small().plan(488 * LEN + 1)?;
  assert_eq!(p.level, Level::Triple);
  assert_eq!(p.block_idx, 488);
  assert_eq!(p.offsets, [Some(8), Some(12), Some(28)]);
  assert_eq!(p.bases, [157, 445, 481]);

  let p = small().plan(1884 * LEN)?;
  assert_eq!(p.offsets, [Some(44), Some(44), Some(44)]);
  OK
}

#[test]
fn test_change_sequence() -> Void {
  let mut m = Mapper::new(small())?;
  assert_eq!(m.translate(10)?.1, Change::NoChange);
  assert_eq!(m.translate(LEN)?.1, Change::Direct);
  assert_eq!(m.translate(LEN + 7)?.1, Change::NoChange);
  assert_eq!(m.translate(2 * LEN)?.1, Change::Single);

  assert_eq!(m.translate(13 * LEN)?.1, Change::Direct);
  assert_eq!(m.translate(14 * LEN)?.1, Change::Double);
  // offsets [0, 4] -> [4, 0]: the outer hop wins
  // 偏移 [0, 4] -> [4, 0]：以外层为准
  assert_eq!(m.translate(25 * LEN)?.1, Change::Single);

  assert_eq!(m.translate(157 * LEN)?.1, Change::Direct);
  assert_eq!(m.translate(158 * LEN)?.1, Change::Triple);
  assert_eq!(m.translate(169 * LEN)?.1, Change::Double);
  assert_eq!(m.translate(301 * LEN)?.1, Change::Single);
  assert_eq!(m.translate(301 * LEN + 3)?.1, Change::NoChange);

  // Back to the direct tier 回到直接层
  assert_eq!(m.translate(0)?.1, Change::Direct);
  OK
}

#[test]
fn test_failed_translate_keeps_prev() -> Void {
  let mut m = Mapper::new(small())?;
  let (p, _) = m.translate(54 * LEN)?;
  assert!(m.translate(-5).is_err());
  assert!(m.translate(i64::MAX).is_err());
  assert_eq!(*m.plan(), p);
  assert_eq!(m.translate(54 * LEN + 1)?.1, Change::NoChange);
  OK
}

#[test]
fn test_change_kept_depth() -> Void {
  assert_eq!(Change::Direct.kept_depth(), 0);
  assert_eq!(Change::Single.kept_depth(), 1);
  assert_eq!(Change::Double.kept_depth(), 2);
  assert_eq!(Change::Triple.kept_depth(), 3);
  assert_eq!(Change::NoChange.kept_depth(), 3);
  assert!(Change::Direct < Change::Single);
  assert!(Change::Triple < Change::NoChange);
  OK
}

#[test]
fn test_direct_tier_only_direct_changes() -> Void {
  let l = Layout::new(&[
    Conf::BlockSize(64),
    Conf::FooterSize(16),
    Conf::DirectBlocks(4),
  ])?;
  let mut m = Mapper::new(l)?;
  for pos in (0..4 * LEN).step_by(5) {
    let (p, c) = m.translate(pos)?;
    assert_eq!(p.level, Level::Direct);
    assert!(c == Change::NoChange || c == Change::Direct);
  }
  OK
}

#[test]
fn test_addr() -> Void {
  let mut block = vec![0u8; 48];
  write_addr(&mut block, 0, 7);
  write_addr(&mut block, 44, 0xDEAD_BEEF);
  assert_eq!(read_addr(&block, 0), 7);
  assert_eq!(read_addr(&block, 44), 0xDEAD_BEEF);
  assert_eq!(read_addr(&block, 4), 0);
  assert_eq!(&block[44..48], &0xDEAD_BEEFu32.to_le_bytes());
  OK
}

#[test]
fn test_footer_seal_verify() -> Void {
  let l = small();
  let mut block = vec![0u8; 64];
  block[..5].copy_from_slice(b"hello");
  Footer::new(kind::INDIRECT, Level::Double, 49).seal(&mut block, &l)?;

  let f = Footer::read(&block, &l)?;
  assert!(f.is_valid());
  assert_eq!(f.kind, kind::INDIRECT);
  assert_eq!(Level::from_depth(f.level), Some(Level::Double));
  assert_eq!(f.base_idx, 49);
  assert!(f.verify(&block, &l));

  // Truncated or oversized slices never verify 截断或超长切片校验失败
  assert!(!f.verify(&block[..32], &l));
  assert!(!f.verify(&[], &l));
  let mut longer = block.clone();
  longer.push(0);
  assert!(!f.verify(&longer, &l));

  block[0] = b'j';
  assert!(!Footer::read(&block, &l)?.verify(&block, &l));

  assert_eq!(
    Footer::read(&block[..32], &l),
    Err(Error::BlockLen { expect: 64, got: 32 })
  );
  assert!(!Footer::read(&[0u8; 64], &l)?.is_valid());
  OK
}

proptest! {
  #[test]
  fn prop_plan_recovers_block(pos in 0i64..1885 * LEN) {
    let l = small();
    let p = l.plan(pos).unwrap();
    let idx = (pos / LEN) as u32;
    prop_assert_eq!(p.block_idx, idx);
    prop_assert_eq!(p.base_addr, idx as u64 * LEN as u64);
    prop_assert!(p.contains(pos as u64, l.block_data_len));
    prop_assert_eq!(p.hops().count(), p.level.depth());
    if let Some(last) = p.level.depth().checked_sub(1) {
      let off = p.offsets[last].unwrap();
      prop_assert_eq!(p.bases[last] + off / 4, idx);
    }
  }

  #[test]
  fn prop_same_block_no_change(pos in 0i64..1885 * LEN, delta in 0i64..LEN) {
    let l = small();
    let mut m = Mapper::new(l).unwrap();
    let start = pos - pos % LEN;
    m.translate(start).unwrap();
    let (_, c) = m.translate(start + delta).unwrap();
    prop_assert_eq!(c, Change::NoChange);
  }
}
