//! 32-byte key material and size normalization.
//!
//! Normalization contract:
//! - empty input is rejected;
//! - exactly 32 bytes pass through;
//! - shorter input is zero-extended, then every extended position takes
//!   `in[i % len] ^ 0x5C`;
//! - longer input collapses to its SHA-256 digest.
//!
//! The operation is idempotent: a normalized key normalizes to itself.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{KEY_EXTEND_MASK, KEY_LEN};
use crate::key::KeyError;

/// Normalized symmetric key. Always exactly 32 bytes; wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Key([u8; KEY_LEN]);

impl Key {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn as_array(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Uppercase hex, no separators: the persistence format.
    pub fn to_hex_upper(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Key bytes never reach logs.
        f.write_str("Key(32 bytes)")
    }
}

/// Normalize arbitrary key material to exactly [`KEY_LEN`] bytes.
pub fn normalize_key(raw: &[u8]) -> Result<Key, KeyError> {
    if raw.is_empty() {
        return Err(KeyError::Empty);
    }

    if raw.len() == KEY_LEN {
        let mut out = [0u8; KEY_LEN];
        out.copy_from_slice(raw);
        return Ok(Key(out));
    }

    if raw.len() < KEY_LEN {
        let mut out = [0u8; KEY_LEN];
        out[..raw.len()].copy_from_slice(raw);
        for i in raw.len()..KEY_LEN {
            out[i] = raw[i % raw.len()] ^ KEY_EXTEND_MASK;
        }
        return Ok(Key(out));
    }

    let digest = Sha256::digest(raw);
    let mut out = [0u8; KEY_LEN];
    out.copy_from_slice(&digest);
    Ok(Key(out))
}
