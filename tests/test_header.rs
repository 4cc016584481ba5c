// Container header suite:
// * codec round-trip stability
// * magic / version / truncation rejection
// * tag padding rules

use std::io::Cursor;

use filecrypt_core::cipher::identity::{AlgorithmTag, TAG_CC20};
use filecrypt_core::constants::{FORMAT_V1, HEADER_LEN, MAGIC_FCF1};
use filecrypt_core::header::{decode_header, encode_header, read_header, FileHeader, HeaderError};

// ---- Round trip ----

#[test]
fn header_encode_decode_round_trip() {
    let h = FileHeader::new(TAG_CC20);
    let wire = encode_header(&h);
    assert_eq!(wire.len(), HEADER_LEN);
    let back = decode_header(&wire).unwrap();
    assert_eq!(back, h);
}

#[test]
fn header_layout_is_stable() {
    let wire = encode_header(&FileHeader::new(TAG_CC20));
    assert_eq!(&wire[0..4], &MAGIC_FCF1);
    assert_eq!(wire[4], FORMAT_V1);
    assert_eq!(&wire[5..9], b"CC20");
    assert!(wire[9..].iter().all(|&b| b == 0), "reserve region must be zero");
}

#[test]
fn header_tag_right_pads_with_underscore() {
    let tag = AlgorithmTag::from_name("RC2");
    assert_eq!(tag.as_str(), "RC2_");
    let wire = encode_header(&FileHeader::new(tag));
    assert_eq!(&wire[5..9], b"RC2_");
}

// ---- Rejection ----

#[test]
fn header_rejects_bad_magic() {
    let mut wire = encode_header(&FileHeader::new(TAG_CC20));
    wire[0..4].copy_from_slice(b"BAD!");
    let err = decode_header(&wire).unwrap_err();
    assert!(matches!(err, HeaderError::InvalidMagic { .. }));
}

#[test]
fn header_rejects_unknown_version() {
    let mut wire = encode_header(&FileHeader::new(TAG_CC20));
    wire[4] = 0xFF;
    let err = decode_header(&wire).unwrap_err();
    assert!(matches!(err, HeaderError::UnsupportedVersion { have: 0xFF }));
}

#[test]
fn header_rejects_short_buffer() {
    let wire = encode_header(&FileHeader::new(TAG_CC20));
    let err = decode_header(&wire[..7]).unwrap_err();
    assert!(matches!(err, HeaderError::BufferTooShort { have: 7, need: HEADER_LEN }));
}

#[test]
fn header_read_rejects_truncated_stream() {
    let wire = encode_header(&FileHeader::new(TAG_CC20));
    let mut short = Cursor::new(wire[..10].to_vec());
    let err = read_header(&mut short).unwrap_err();
    assert!(matches!(err, HeaderError::BufferTooShort { .. }));
}

#[test]
fn header_read_consumes_exactly_header_len() {
    let mut wire = encode_header(&FileHeader::new(TAG_CC20)).to_vec();
    wire.extend_from_slice(b"ciphertext follows");
    let mut cursor = Cursor::new(wire);
    read_header(&mut cursor).unwrap();
    assert_eq!(cursor.position(), HEADER_LEN as u64);
}
