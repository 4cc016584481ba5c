//! Cipher catalog.
//!
//! A cipher is anything that can generate a key, seal bytes, open bytes, and
//! name itself with a 4-character tag. The pipeline treats ciphers as opaque
//! transforms; the only structural requirement is that ciphertext length is
//! a *deterministic* function of plaintext length (`sealed_len`), which is
//! what lets chunked and segmented modes compute absolute output offsets
//! before any task completes.

pub mod aesgcm;
pub mod chacha;
pub mod identity;
pub mod salsa;
pub mod xchacha;

use std::fmt;
use std::sync::OnceLock;

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::constants::KEY_LEN;
use crate::key::Key;
use crate::padding::PaddingSpec;
use identity::AlgorithmTag;

#[derive(Debug)]
pub enum CipherError {
    /// Key length did not match the cipher's requirement.
    InvalidKeyLen { expected: usize, actual: usize },

    /// Ciphertext shorter than the cipher's minimum sealed size.
    CiphertextTooShort { have: usize, need: usize },

    /// Authentication tag mismatch (AEAD catalog entries).
    TagMismatch,

    /// Transform failure with context.
    Failure(String),
}

impl fmt::Display for CipherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CipherError::*;
        match self {
            InvalidKeyLen { expected, actual } => {
                write!(f, "invalid key length: expected={}, actual={}", expected, actual)
            }
            CiphertextTooShort { have, need } => {
                write!(f, "ciphertext too short: {} < {}", have, need)
            }
            TagMismatch => write!(f, "authentication tag mismatch"),
            Failure(msg) => write!(f, "cipher failure: {}", msg),
        }
    }
}

impl std::error::Error for CipherError {}

/// Capability surface every catalog entry satisfies.
pub trait FileCipher: Send + Sync {
    /// On-disk identity embedded in the container header.
    fn tag(&self) -> AlgorithmTag;

    /// Seal one plaintext unit. Total for well-formed 32-byte keys.
    fn encrypt(&self, plaintext: &[u8], key: &Key) -> Result<Vec<u8>, CipherError>;

    /// Open one ciphertext unit.
    fn decrypt(&self, ciphertext: &[u8], key: &Key) -> Result<Vec<u8>, CipherError>;

    /// Fresh random 32-byte key.
    fn generate_key(&self) -> Key {
        let mut bytes = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut bytes);
        Key::from_bytes(bytes)
    }

    /// Padding behavior; `PaddingSpec::NONE` for stream and AEAD entries.
    fn padding(&self) -> PaddingSpec {
        PaddingSpec::NONE
    }

    /// Deterministic ciphertext length for a plaintext of `plaintext_len`
    /// bytes. Identity for stream ciphers; fixed `+16` for the AEAD
    /// entries; padded-up for block ciphers.
    fn sealed_len(&self, plaintext_len: usize) -> usize {
        plaintext_len
    }
}

/// Derive a per-cipher nonce from the key.
///
/// The container stores no nonce and per-chunk nonces are out of scope, so
/// every cipher invocation under one (cipher, key) pair reuses the same
/// derived value. Binding the tag keeps distinct ciphers on distinct
/// keystreams for the same key.
pub(crate) fn derive_nonce<const N: usize>(tag: AlgorithmTag, key: &Key) -> [u8; N] {
    let mut hasher = Sha256::new();
    hasher.update(tag.0);
    hasher.update(key.as_bytes());
    let digest = hasher.finalize();
    let mut out = [0u8; N];
    out.copy_from_slice(&digest[..N]);
    out
}

/// Built-in catalog, constructed once per process.
pub fn catalog() -> &'static [&'static dyn FileCipher] {
    static CATALOG: OnceLock<Vec<&'static dyn FileCipher>> = OnceLock::new();
    CATALOG
        .get_or_init(|| {
            vec![
                &chacha::ChaCha20Cipher as &'static dyn FileCipher,
                &salsa::Salsa20Cipher as &'static dyn FileCipher,
                &xchacha::XChaCha20Poly1305Cipher as &'static dyn FileCipher,
                &aesgcm::Aes256GcmCipher as &'static dyn FileCipher,
            ]
        })
        .as_slice()
}

/// Look up a catalog cipher by its header tag.
pub fn cipher_for_tag(tag: AlgorithmTag) -> Option<&'static dyn FileCipher> {
    catalog().iter().copied().find(|c| c.tag() == tag)
}
