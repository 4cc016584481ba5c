//! XChaCha20-Poly1305 catalog entry.
//!
//! Extended 24-byte derived nonce; otherwise the same AEAD shape as the
//! AES-GCM entry (32-byte key, 16-byte appended tag, fail-closed open).

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};

use crate::cipher::aesgcm::TAG_OVERHEAD;
use crate::cipher::identity::{AlgorithmTag, TAG_XCCH};
use crate::cipher::{derive_nonce, CipherError, FileCipher};
use crate::constants::KEY_LEN;
use crate::key::Key;

pub struct XChaCha20Poly1305Cipher;

impl XChaCha20Poly1305Cipher {
    fn instance(&self, key: &Key) -> Result<XChaCha20Poly1305, CipherError> {
        XChaCha20Poly1305::new_from_slice(key.as_bytes()).map_err(|_| {
            CipherError::InvalidKeyLen { expected: KEY_LEN, actual: key.as_bytes().len() }
        })
    }
}

impl FileCipher for XChaCha20Poly1305Cipher {
    fn tag(&self) -> AlgorithmTag {
        TAG_XCCH
    }

    fn encrypt(&self, plaintext: &[u8], key: &Key) -> Result<Vec<u8>, CipherError> {
        let nonce: [u8; 24] = derive_nonce(TAG_XCCH, key);
        self.instance(key)?
            .encrypt(XNonce::from_slice(&nonce), plaintext)
            .map_err(|_| CipherError::Failure("XChaCha20-Poly1305 seal failed".into()))
    }

    fn decrypt(&self, ciphertext: &[u8], key: &Key) -> Result<Vec<u8>, CipherError> {
        if ciphertext.len() < TAG_OVERHEAD {
            return Err(CipherError::CiphertextTooShort {
                have: ciphertext.len(),
                need: TAG_OVERHEAD,
            });
        }
        let nonce: [u8; 24] = derive_nonce(TAG_XCCH, key);
        self.instance(key)?
            .decrypt(XNonce::from_slice(&nonce), ciphertext)
            .map_err(|_| CipherError::TagMismatch)
    }

    fn sealed_len(&self, plaintext_len: usize) -> usize {
        plaintext_len + TAG_OVERHEAD
    }
}
