//! 256-bit dual-block kernel.
//!
//! Two states interleaved across the 128-bit halves of four registers: lane
//! `j` of register `r` holds word `r*4+j` of block 0, lane `j+4` the same
//! word of block 1. The two states share key, nonce, and constants and
//! differ only in the counter word (`c` and `c+1`). `shuffle_epi32`
//! permutes within each half, so the diagonal phase of both blocks runs in
//! the same instruction.

#![allow(unsafe_code)]

use std::arch::x86_64::*;

use crate::cipher::chacha::BLOCK_LEN;

macro_rules! rotl_epi32 {
    ($x:expr, $n:literal) => {
        _mm256_or_si256(_mm256_slli_epi32($x, $n), _mm256_srli_epi32($x, 32 - $n))
    };
}

macro_rules! quarter_round_rows {
    ($a:ident, $b:ident, $c:ident, $d:ident) => {
        $a = _mm256_add_epi32($a, $b);
        $d = _mm256_xor_si256($d, $a);
        $d = rotl_epi32!($d, 16);

        $c = _mm256_add_epi32($c, $d);
        $b = _mm256_xor_si256($b, $c);
        $b = rotl_epi32!($b, 12);

        $a = _mm256_add_epi32($a, $b);
        $d = _mm256_xor_si256($d, $a);
        $d = rotl_epi32!($d, 8);

        $c = _mm256_add_epi32($c, $d);
        $b = _mm256_xor_si256($b, $c);
        $b = rotl_epi32!($b, 7);
    };
}

/// Two 64-byte keystream blocks for counters `c` and `c+1`, de-interleaved
/// into `out[0..64]` and `out[64..128]`.
///
/// # Safety
/// Requires AVX2, which backend selection verified before dispatching here.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn block_pair(state: &[u32; 16], out: &mut [u8; 2 * BLOCK_LEN]) {
    let p = state.as_ptr() as *const __m128i;
    let row0 = _mm_loadu_si128(p);
    let row1 = _mm_loadu_si128(p.add(1));
    let row2 = _mm_loadu_si128(p.add(2));
    let row3 = _mm_loadu_si128(p.add(3));
    // second block: counter word (lane 0 of row 3) bumped by one
    let row3_next = _mm_add_epi32(row3, _mm_set_epi32(0, 0, 0, 1));

    let orig0 = _mm256_set_m128i(row0, row0);
    let orig1 = _mm256_set_m128i(row1, row1);
    let orig2 = _mm256_set_m128i(row2, row2);
    let orig3 = _mm256_set_m128i(row3_next, row3);

    let mut a = orig0;
    let mut b = orig1;
    let mut c = orig2;
    let mut d = orig3;

    for _ in 0..10 {
        // column phase
        quarter_round_rows!(a, b, c, d);

        // diagonalize within each 128-bit half: rows 1/2/3 rotate 1/2/3
        b = _mm256_shuffle_epi32(b, 0b00_11_10_01);
        c = _mm256_shuffle_epi32(c, 0b01_00_11_10);
        d = _mm256_shuffle_epi32(d, 0b10_01_00_11);

        quarter_round_rows!(a, b, c, d);

        // inverse permutation
        b = _mm256_shuffle_epi32(b, 0b10_01_00_11);
        c = _mm256_shuffle_epi32(c, 0b01_00_11_10);
        d = _mm256_shuffle_epi32(d, 0b00_11_10_01);
    }

    a = _mm256_add_epi32(a, orig0);
    b = _mm256_add_epi32(b, orig1);
    c = _mm256_add_epi32(c, orig2);
    d = _mm256_add_epi32(d, orig3);

    // de-interleave: low halves compose block 0, high halves block 1
    let q = out.as_mut_ptr() as *mut __m128i;
    _mm_storeu_si128(q, _mm256_castsi256_si128(a));
    _mm_storeu_si128(q.add(1), _mm256_castsi256_si128(b));
    _mm_storeu_si128(q.add(2), _mm256_castsi256_si128(c));
    _mm_storeu_si128(q.add(3), _mm256_castsi256_si128(d));
    _mm_storeu_si128(q.add(4), _mm256_extracti128_si256(a, 1));
    _mm_storeu_si128(q.add(5), _mm256_extracti128_si256(b, 1));
    _mm_storeu_si128(q.add(6), _mm256_extracti128_si256(c, 1));
    _mm_storeu_si128(q.add(7), _mm256_extracti128_si256(d, 1));
}
