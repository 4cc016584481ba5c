//! ChaCha20 stream cipher (RFC 8439) with runtime-selected SIMD backends.
//!
//! Layering, leaves first:
//! - `util`: little-endian word helpers and the wide XOR application.
//! - `scalar`: portable quarter-round and single-block routine.
//! - `sse2` / `avx2`: 128-bit single-block and 256-bit dual-block kernels
//!   (x86-64 only).
//! - `backend`: one-shot CPU-feature probe and value-typed dispatch.
//! - `keystream`: resumable counter-tracking generator over the backends.

pub mod backend;
pub mod keystream;
pub mod scalar;
pub mod util;

#[cfg(target_arch = "x86_64")]
pub(crate) mod avx2;
#[cfg(target_arch = "x86_64")]
pub(crate) mod sse2;

pub use backend::Backend;
pub use keystream::KeyStream;

use crate::cipher::identity::{AlgorithmTag, TAG_CC20};
use crate::cipher::{derive_nonce, CipherError, FileCipher};
use crate::key::Key;

/// One keystream block.
pub const BLOCK_LEN: usize = 64;

/// ChaCha20 nonce length (96-bit IETF variant).
pub const NONCE_LEN: usize = 12;

/// Catalog entry: raw ChaCha20 keystream XOR, length-preserving.
pub struct ChaCha20Cipher;

impl ChaCha20Cipher {
    fn apply(&self, data: &[u8], key: &Key) -> Vec<u8> {
        let nonce: [u8; NONCE_LEN] = derive_nonce(TAG_CC20, key);
        let mut stream = KeyStream::new(key.as_array(), &nonce, 0);
        let mut buf = data.to_vec();
        stream.apply(&mut buf);
        buf
    }
}

impl FileCipher for ChaCha20Cipher {
    fn tag(&self) -> AlgorithmTag {
        TAG_CC20
    }

    fn encrypt(&self, plaintext: &[u8], key: &Key) -> Result<Vec<u8>, CipherError> {
        Ok(self.apply(plaintext, key))
    }

    fn decrypt(&self, ciphertext: &[u8], key: &Key) -> Result<Vec<u8>, CipherError> {
        Ok(self.apply(ciphertext, key))
    }
}
