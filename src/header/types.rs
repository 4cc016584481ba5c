//! Core header struct and its validation errors.
//!
//! Design notes:
//! - Fixed field sizes keep the wire format binary-stable across versions.
//! - Reserved bytes allow future fields without changing size; always zero.
//! - The algorithm tag is 4 ASCII bytes, right-padded with `_`.

use std::fmt;

use crate::cipher::identity::AlgorithmTag;
use crate::constants::{FORMAT_V1, HEADER_LEN};

/// Parsed container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub version: u8,
    pub tag: AlgorithmTag,
}

impl FileHeader {
    pub const LEN: usize = HEADER_LEN;

    pub fn new(tag: AlgorithmTag) -> Self {
        Self { version: FORMAT_V1, tag }
    }

    pub fn validate(&self) -> Result<(), HeaderError> {
        if self.version != FORMAT_V1 {
            return Err(HeaderError::UnsupportedVersion { have: self.version });
        }
        if !self.tag.0.iter().all(|b| b.is_ascii_graphic()) {
            return Err(HeaderError::InvalidTag { raw: self.tag.0 });
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum HeaderError {
    /// Buffer or stream too short to contain a full header.
    BufferTooShort { have: usize, need: usize },

    /// Invalid magic marker (expected "FCF1").
    InvalidMagic { have: [u8; 4], need: [u8; 4] },

    /// Version byte not understood by this build.
    UnsupportedVersion { have: u8 },

    /// Tag region holds non-printable bytes.
    InvalidTag { raw: [u8; 4] },
}

pub fn fmt_bytes(b: &[u8]) -> String {
    if b.iter().all(|&c| c.is_ascii_graphic() || c == b' ') {
        format!("b\"{}\"", String::from_utf8_lossy(b))
    } else {
        format!("0x{}", hex::encode(b))
    }
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use HeaderError::*;
        match self {
            BufferTooShort { have, need } => {
                write!(f, "header buffer too short: {} < {}", have, need)
            }
            InvalidMagic { have, need } => {
                write!(f, "invalid magic: expected {}, got {}", fmt_bytes(need), fmt_bytes(have))
            }
            UnsupportedVersion { have } => write!(f, "unsupported container version: {}", have),
            InvalidTag { raw } => write!(f, "invalid algorithm tag: {}", fmt_bytes(raw)),
        }
    }
}

impl std::error::Error for HeaderError {}
