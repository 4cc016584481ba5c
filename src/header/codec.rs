//! Header encoding and decoding.
//!
//! Design notes:
//! - Serializes a `FileHeader` into a fixed 16-byte buffer.
//! - Field order: magic (0..4), version (4), tag (5..9), reserve (9..16).
//! - Decoding verifies magic and version and rejects anything else with a
//!   distinguishable `HeaderError` so callers can branch on "invalid
//!   container" without string matching.

use std::io::Read;

use crate::cipher::identity::AlgorithmTag;
use crate::constants::{FORMAT_V1, HEADER_LEN, MAGIC_FCF1};
use crate::header::types::{FileHeader, HeaderError};

/// Serialize a `FileHeader` into its fixed 16-byte wire form.
pub fn encode_header(h: &FileHeader) -> [u8; HEADER_LEN] {
    let mut out = [0u8; HEADER_LEN];
    out[0..4].copy_from_slice(&MAGIC_FCF1); // 0..4  magic
    out[4] = h.version; // 4     version
    out[5..9].copy_from_slice(&h.tag.0); // 5..9  algorithm tag
    // 9..16 reserved, already zero
    out
}

/// Deserialize a 16-byte buffer into a `FileHeader`, verifying magic and
/// version.
pub fn decode_header(buf: &[u8]) -> Result<FileHeader, HeaderError> {
    if buf.len() < HEADER_LEN {
        return Err(HeaderError::BufferTooShort { have: buf.len(), need: HEADER_LEN });
    }

    let mut magic = [0u8; 4];
    magic.copy_from_slice(&buf[0..4]);
    if magic != MAGIC_FCF1 {
        return Err(HeaderError::InvalidMagic { have: magic, need: MAGIC_FCF1 });
    }

    let version = buf[4];
    if version != FORMAT_V1 {
        return Err(HeaderError::UnsupportedVersion { have: version });
    }

    let mut tag = [0u8; 4];
    tag.copy_from_slice(&buf[5..9]);

    let h = FileHeader { version, tag: AlgorithmTag(tag) };
    h.validate()?;
    Ok(h)
}

/// Consume exactly `HEADER_LEN` bytes from a stream and parse them.
///
/// A short stream maps to `BufferTooShort` ("truncated container") rather
/// than a bare I/O error so decrypt paths can distinguish it.
pub fn read_header<R: Read>(r: &mut R) -> Result<FileHeader, HeaderError> {
    let mut buf = [0u8; HEADER_LEN];
    let mut have = 0usize;
    while have < HEADER_LEN {
        let n = r
            .read(&mut buf[have..])
            .map_err(|_| HeaderError::BufferTooShort { have, need: HEADER_LEN })?;
        if n == 0 {
            return Err(HeaderError::BufferTooShort { have, need: HEADER_LEN });
        }
        have += n;
    }
    decode_header(&buf)
}
