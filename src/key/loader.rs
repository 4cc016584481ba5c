//! Key file loading and persistence.
//!
//! Format sniffing, in order: hex, Base64, raw bytes. The order is
//! load-bearing: Base64 strings made only of hex characters must decode as
//! hex, so keep hex first.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

use crate::key::material::{normalize_key, Key};
use crate::key::KeyError;

/// Load key material from a file and normalize it to 32 bytes.
pub fn load_key(path: &Path) -> Result<Key, KeyError> {
    if !path.exists() {
        return Err(KeyError::NotFound(path.to_path_buf()));
    }
    let raw = fs::read(path)?;

    // 1) hex: trimmed text made only of hex digits, odd length 0-prefixed
    if let Ok(text) = std::str::from_utf8(&raw) {
        let trimmed = text.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            let mut digits: String =
                trimmed.chars().filter(|c| c.is_ascii_hexdigit()).collect();
            if digits.len() % 2 == 1 {
                digits.insert(0, '0');
            }
            if let Ok(bytes) = hex::decode(&digits) {
                debug!(path = %path.display(), "key file parsed as hex");
                return normalize_key(&bytes);
            }
        }

        // 2) Base64: standard alphabet; fall through on decode failure
        if !trimmed.is_empty() {
            if let Ok(bytes) = STANDARD.decode(trimmed) {
                debug!(path = %path.display(), "key file parsed as Base64");
                return normalize_key(&bytes);
            }
        }
    }

    // 3) raw bytes
    debug!(path = %path.display(), "key file treated as raw bytes");
    normalize_key(&raw)
}

/// Persist a key as uppercase hex without separators.
pub fn save_key(path: &Path, key: &Key) -> Result<(), KeyError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, key.to_hex_upper())?;
    Ok(())
}
