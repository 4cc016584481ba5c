//! Salsa20 stream cipher, portable kernel.
//!
//! 32-byte key, 8-byte nonce, 64-bit block counter. Same ARX family as
//! ChaCha20 but with the original rotation constants (7, 9, 13, 18) and the
//! column/row round ordering.

use crate::cipher::chacha::util::{load_u32_le, store_u32_le, xor_keystream};
use crate::cipher::identity::{AlgorithmTag, TAG_SL20};
use crate::cipher::{derive_nonce, CipherError, FileCipher};
use crate::constants::KEY_LEN;
use crate::key::Key;

const BLOCK_LEN: usize = 64;
const NONCE_LEN: usize = 8;

/// "expand 32-byte k", split across state words 0, 5, 10, 15.
const TAU: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];

fn init_state(key: &[u8; KEY_LEN], nonce: &[u8; NONCE_LEN], counter: u64) -> [u32; 16] {
    let mut state = [0u32; 16];
    state[0] = TAU[0];
    for i in 0..4 {
        state[1 + i] = load_u32_le(&key[i * 4..]);
    }
    state[5] = TAU[1];
    state[6] = load_u32_le(&nonce[0..]);
    state[7] = load_u32_le(&nonce[4..]);
    state[8] = counter as u32;
    state[9] = (counter >> 32) as u32;
    state[10] = TAU[2];
    for i in 0..4 {
        state[11 + i] = load_u32_le(&key[16 + i * 4..]);
    }
    state[15] = TAU[3];
    state
}

#[inline]
fn rotl(a: u32, n: u32) -> u32 {
    (a << n) | (a >> (32 - n))
}

#[inline]
fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[b] ^= rotl(state[a].wrapping_add(state[d]), 7);
    state[c] ^= rotl(state[b].wrapping_add(state[a]), 9);
    state[d] ^= rotl(state[c].wrapping_add(state[b]), 13);
    state[a] ^= rotl(state[d].wrapping_add(state[c]), 18);
}

fn block(state: &[u32; 16], out: &mut [u8; BLOCK_LEN]) {
    let mut working = *state;
    for _ in 0..10 {
        // column
        quarter_round(&mut working, 0, 4, 8, 12);
        quarter_round(&mut working, 5, 9, 13, 1);
        quarter_round(&mut working, 10, 14, 2, 6);
        quarter_round(&mut working, 15, 3, 7, 11);
        // row
        quarter_round(&mut working, 0, 1, 2, 3);
        quarter_round(&mut working, 5, 6, 7, 4);
        quarter_round(&mut working, 10, 11, 8, 9);
        quarter_round(&mut working, 15, 12, 13, 14);
    }
    for (i, word) in working.iter_mut().enumerate() {
        *word = word.wrapping_add(state[i]);
        store_u32_le(*word, &mut out[i * 4..]);
    }
}

fn xor_in_place(key: &[u8; KEY_LEN], nonce: &[u8; NONCE_LEN], data: &mut [u8]) {
    let mut counter = 0u64;
    let mut block_buf = [0u8; BLOCK_LEN];
    let mut offset = 0usize;
    while offset < data.len() {
        let state = init_state(key, nonce, counter);
        block(&state, &mut block_buf);
        let take = (data.len() - offset).min(BLOCK_LEN);
        xor_keystream(&mut data[offset..offset + take], &block_buf[..take]);
        counter = counter.wrapping_add(1);
        offset += take;
    }
}

/// Catalog entry: raw Salsa20 keystream XOR, length-preserving.
pub struct Salsa20Cipher;

impl Salsa20Cipher {
    fn apply(&self, data: &[u8], key: &Key) -> Vec<u8> {
        let nonce: [u8; NONCE_LEN] = derive_nonce(TAG_SL20, key);
        let mut buf = data.to_vec();
        xor_in_place(key.as_array(), &nonce, &mut buf);
        buf
    }
}

impl FileCipher for Salsa20Cipher {
    fn tag(&self) -> AlgorithmTag {
        TAG_SL20
    }

    fn encrypt(&self, plaintext: &[u8], key: &Key) -> Result<Vec<u8>, CipherError> {
        Ok(self.apply(plaintext, key))
    }

    fn decrypt(&self, ciphertext: &[u8], key: &Key) -> Result<Vec<u8>, CipherError> {
        Ok(self.apply(ciphertext, key))
    }
}
