//! Resumable keystream generator.
//!
//! Owns the 16-word state and tracks the counter so that successive calls
//! continue where the last one stopped: after `m` bytes the counter word
//! equals `initial + ceil(m / 64)`.

use crate::cipher::chacha::backend::Backend;
use crate::cipher::chacha::scalar::{init_state, COUNTER_WORD};
use crate::cipher::chacha::util::xor_keystream;
use crate::cipher::chacha::{BLOCK_LEN, NONCE_LEN};
use crate::constants::KEY_LEN;

pub struct KeyStream {
    state: [u32; 16],
    backend: Backend,
}

impl KeyStream {
    /// Generator over the process-selected backend.
    pub fn new(key: &[u8; KEY_LEN], nonce: &[u8; NONCE_LEN], counter: u32) -> Self {
        Self::with_backend(key, nonce, counter, Backend::active())
    }

    /// Generator pinned to a specific backend (parity checks, benches).
    pub fn with_backend(
        key: &[u8; KEY_LEN],
        nonce: &[u8; NONCE_LEN],
        counter: u32,
        backend: Backend,
    ) -> Self {
        Self { state: init_state(key, nonce, counter), backend }
    }

    /// Counter of the next block to be produced.
    pub fn counter(&self) -> u32 {
        self.state[COUNTER_WORD]
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// XOR keystream over `data` in place (encrypt and decrypt are the same
    /// operation).
    ///
    /// Block pairs are processed while more than one block of input remains;
    /// the final partial-or-single block goes through the single-block
    /// routine.
    pub fn apply(&mut self, data: &mut [u8]) {
        let mut offset = 0usize;
        let mut pair = [0u8; 2 * BLOCK_LEN];
        while data.len() - offset > BLOCK_LEN {
            self.backend.block_pair(&self.state, &mut pair);
            let take = (data.len() - offset).min(2 * BLOCK_LEN);
            xor_keystream(&mut data[offset..offset + take], &pair[..take]);
            self.state[COUNTER_WORD] = self.state[COUNTER_WORD].wrapping_add(2);
            offset += take;
        }
        if offset < data.len() {
            let mut block = [0u8; BLOCK_LEN];
            self.backend.block(&self.state, &mut block);
            let take = data.len() - offset;
            xor_keystream(&mut data[offset..], &block[..take]);
            self.state[COUNTER_WORD] = self.state[COUNTER_WORD].wrapping_add(1);
        }
    }

    /// Produce `len` raw keystream bytes (XOR against zero).
    pub fn keystream(&mut self, len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len];
        self.apply(&mut out);
        out
    }
}
