//! 128-bit single-block kernel.
//!
//! The state lives in four row registers; the diagonal phase is a lane
//! rotation of rows 1..3 via `shuffle_epi32`, undone after the second
//! quarter-round. Rotations use the shift-or emulation (SSE2 has no
//! 32-bit rotate).

#![allow(unsafe_code)]

use std::arch::x86_64::*;

use crate::cipher::chacha::BLOCK_LEN;

macro_rules! rotl_epi32 {
    ($x:expr, $n:literal) => {
        _mm_or_si128(_mm_slli_epi32($x, $n), _mm_srli_epi32($x, 32 - $n))
    };
}

macro_rules! quarter_round_rows {
    ($a:ident, $b:ident, $c:ident, $d:ident) => {
        $a = _mm_add_epi32($a, $b);
        $d = _mm_xor_si128($d, $a);
        $d = rotl_epi32!($d, 16);

        $c = _mm_add_epi32($c, $d);
        $b = _mm_xor_si128($b, $c);
        $b = rotl_epi32!($b, 12);

        $a = _mm_add_epi32($a, $b);
        $d = _mm_xor_si128($d, $a);
        $d = rotl_epi32!($d, 8);

        $c = _mm_add_epi32($c, $d);
        $b = _mm_xor_si128($b, $c);
        $b = rotl_epi32!($b, 7);
    };
}

/// One 64-byte keystream block.
///
/// # Safety
/// Requires SSE2, which backend selection verified before dispatching here.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn block(state: &[u32; 16], out: &mut [u8; BLOCK_LEN]) {
    let p = state.as_ptr() as *const __m128i;
    let orig0 = _mm_loadu_si128(p);
    let orig1 = _mm_loadu_si128(p.add(1));
    let orig2 = _mm_loadu_si128(p.add(2));
    let orig3 = _mm_loadu_si128(p.add(3));

    let mut a = orig0;
    let mut b = orig1;
    let mut c = orig2;
    let mut d = orig3;

    for _ in 0..10 {
        // column phase
        quarter_round_rows!(a, b, c, d);

        // diagonalize: rotate row 1 by 1 lane, row 2 by 2, row 3 by 3
        b = _mm_shuffle_epi32(b, 0b00_11_10_01);
        c = _mm_shuffle_epi32(c, 0b01_00_11_10);
        d = _mm_shuffle_epi32(d, 0b10_01_00_11);

        quarter_round_rows!(a, b, c, d);

        // inverse permutation
        b = _mm_shuffle_epi32(b, 0b10_01_00_11);
        c = _mm_shuffle_epi32(c, 0b01_00_11_10);
        d = _mm_shuffle_epi32(d, 0b00_11_10_01);
    }

    a = _mm_add_epi32(a, orig0);
    b = _mm_add_epi32(b, orig1);
    c = _mm_add_epi32(c, orig2);
    d = _mm_add_epi32(d, orig3);

    // 128-bit lane stores, row-major, words already little-endian
    let q = out.as_mut_ptr() as *mut __m128i;
    _mm_storeu_si128(q, a);
    _mm_storeu_si128(q.add(1), b);
    _mm_storeu_si128(q.add(2), c);
    _mm_storeu_si128(q.add(3), d);
}
