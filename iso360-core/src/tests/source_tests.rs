use super::*;
use std::io::Cursor;

fn source(data: Vec<u8>) -> ByteSource<Cursor<Vec<u8>>> {
    ByteSource::new(Cursor::new(data)).unwrap()
}

#[test]
fn test_len_is_measured() {
    let src = source(vec![0u8; 100]);
    assert_eq!(src.len(), 100);
    assert!(!src.is_empty());
    assert!(source(Vec::new()).is_empty());
}

#[test]
fn test_read_at_inside_bounds() {
    let mut src = source((0u8..16).collect());
    let mut buf = [0u8; 4];
    src.read_at(12, &mut buf).unwrap();
    assert_eq!(buf, [12, 13, 14, 15]);
}

#[test]
fn test_read_past_end_is_truncated() {
    let mut src = source(vec![0u8; 16]);
    let mut buf = [0u8; 4];
    let err = src.read_at(13, &mut buf).unwrap_err();
    match err {
        ReadError::TruncatedRead { offset, len, size } => {
            assert_eq!(offset, 13);
            assert_eq!(len, 4);
            assert_eq!(size, 16);
        }
        other => panic!("expected TruncatedRead, got {other:?}"),
    }
}

#[test]
fn test_read_far_beyond_end_does_not_wrap() {
    let mut src = source(vec![0u8; 16]);
    let mut buf = [0u8; 4];
    assert!(matches!(
        src.read_at(u64::MAX - 1, &mut buf),
        Err(ReadError::TruncatedRead { .. })
    ));
}

#[test]
fn test_read_vec_rejects_oversized_length() {
    let mut src = source(vec![0u8; 16]);
    assert!(matches!(
        src.read_vec(0, 0xFFFF_FFFF),
        Err(ReadError::TruncatedRead { .. })
    ));
    assert_eq!(src.read_vec(4, 0).unwrap(), Vec::<u8>::new());
}

#[test]
fn test_read_u32_le() {
    let mut src = source(vec![0x00, 0x78, 0x56, 0x34, 0x12]);
    assert_eq!(src.read_u32_le(1).unwrap(), 0x1234_5678);
}
