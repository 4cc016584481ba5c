//! Portable ChaCha20 kernel.
//!
//! 32-byte key, 12-byte nonce, 32-bit block counter at state word 12.

use crate::cipher::chacha::util::{load_u32_le, store_u32_le};
use crate::cipher::chacha::{BLOCK_LEN, NONCE_LEN};
use crate::constants::KEY_LEN;

/// "expand 32-byte k"
pub(crate) const SIGMA: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];

/// Counter word index in the canonical 16-word state.
pub(crate) const COUNTER_WORD: usize = 12;

/// Build the canonical 16-word state: constants, key, counter, nonce.
pub(crate) fn init_state(
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    counter: u32,
) -> [u32; 16] {
    let mut state = [0u32; 16];
    state[..4].copy_from_slice(&SIGMA);
    for i in 0..8 {
        state[4 + i] = load_u32_le(&key[i * 4..]);
    }
    state[COUNTER_WORD] = counter;
    state[13] = load_u32_le(&nonce[0..]);
    state[14] = load_u32_le(&nonce[4..]);
    state[15] = load_u32_le(&nonce[8..]);
    state
}

#[inline]
fn rotl(a: u32, n: u32) -> u32 {
    (a << n) | (a >> (32 - n))
}

#[inline]
pub(crate) fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = rotl(state[d], 16);
    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = rotl(state[b], 12);
    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = rotl(state[d], 8);
    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = rotl(state[b], 7);
}

/// One 64-byte keystream block from `state`. The counter in `state` is not
/// advanced; callers own counter progression.
pub(crate) fn block(state: &[u32; 16], out: &mut [u8; BLOCK_LEN]) {
    let mut working = *state;
    for _ in 0..10 {
        // column
        quarter_round(&mut working, 0, 4, 8, 12);
        quarter_round(&mut working, 1, 5, 9, 13);
        quarter_round(&mut working, 2, 6, 10, 14);
        quarter_round(&mut working, 3, 7, 11, 15);
        // diagonal
        quarter_round(&mut working, 0, 5, 10, 15);
        quarter_round(&mut working, 1, 6, 11, 12);
        quarter_round(&mut working, 2, 7, 8, 13);
        quarter_round(&mut working, 3, 4, 9, 14);
    }
    for (i, word) in working.iter_mut().enumerate() {
        *word = word.wrapping_add(state[i]);
        store_u32_le(*word, &mut out[i * 4..]);
    }
}
