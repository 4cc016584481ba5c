//! AES-256-GCM catalog entry.
//!
//! Design notes:
//! - 32-byte key, 12-byte derived nonce, 16-byte appended tag.
//! - Tag verification fails closed: no partial plaintext on mismatch.
//! - `sealed_len` is plaintext + 16, which is what lets the chunked and
//!   segmented modes place this cipher's output deterministically.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::cipher::identity::{AlgorithmTag, TAG_AESG};
use crate::cipher::{derive_nonce, CipherError, FileCipher};
use crate::constants::KEY_LEN;
use crate::key::Key;

/// Poly1305/GCM tag length appended to every sealed unit.
pub const TAG_OVERHEAD: usize = 16;

pub struct Aes256GcmCipher;

impl Aes256GcmCipher {
    fn instance(&self, key: &Key) -> Result<Aes256Gcm, CipherError> {
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| CipherError::InvalidKeyLen {
            expected: KEY_LEN,
            actual: key.as_bytes().len(),
        })
    }
}

impl FileCipher for Aes256GcmCipher {
    fn tag(&self) -> AlgorithmTag {
        TAG_AESG
    }

    fn encrypt(&self, plaintext: &[u8], key: &Key) -> Result<Vec<u8>, CipherError> {
        let nonce: [u8; 12] = derive_nonce(TAG_AESG, key);
        self.instance(key)?
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(|_| CipherError::Failure("AES-GCM seal failed".into()))
    }

    fn decrypt(&self, ciphertext: &[u8], key: &Key) -> Result<Vec<u8>, CipherError> {
        if ciphertext.len() < TAG_OVERHEAD {
            return Err(CipherError::CiphertextTooShort {
                have: ciphertext.len(),
                need: TAG_OVERHEAD,
            });
        }
        let nonce: [u8; 12] = derive_nonce(TAG_AESG, key);
        self.instance(key)?
            .decrypt(Nonce::from_slice(&nonce), ciphertext)
            .map_err(|_| CipherError::TagMismatch)
    }

    fn sealed_len(&self, plaintext_len: usize) -> usize {
        plaintext_len + TAG_OVERHEAD
    }
}
