//! Runtime backend selection.
//!
//! An ordered candidate list is probed once per process; the supported
//! backend with the highest priority wins and is cached for the process
//! lifetime. Scalar always qualifies, so selection is total. Dispatch is a
//! direct match on a value-typed enum, never per-block dynamic dispatch.

// The SIMD kernels are `target_feature` functions; dispatching to them is
// sound only after `is_supported` verified the feature, which is exactly
// what selection does.
#![allow(unsafe_code)]

use std::sync::OnceLock;

use crate::cipher::chacha::scalar::{self, COUNTER_WORD};
use crate::cipher::chacha::BLOCK_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Portable fallback; always supported.
    Scalar,
    /// 128-bit single-block kernel.
    #[cfg(target_arch = "x86_64")]
    Sse2,
    /// 256-bit dual-block kernel.
    #[cfg(target_arch = "x86_64")]
    Avx2,
}

impl Backend {
    /// Higher wins at selection time.
    pub fn priority(self) -> u8 {
        match self {
            Backend::Scalar => 0,
            #[cfg(target_arch = "x86_64")]
            Backend::Sse2 => 1,
            #[cfg(target_arch = "x86_64")]
            Backend::Avx2 => 2,
        }
    }

    pub fn is_supported(self) -> bool {
        match self {
            Backend::Scalar => true,
            #[cfg(target_arch = "x86_64")]
            Backend::Sse2 => is_x86_feature_detected!("sse2"),
            #[cfg(target_arch = "x86_64")]
            Backend::Avx2 => is_x86_feature_detected!("avx2"),
        }
    }

    /// Every backend this build knows about.
    pub fn candidates() -> &'static [Backend] {
        #[cfg(target_arch = "x86_64")]
        {
            &[Backend::Scalar, Backend::Sse2, Backend::Avx2]
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            &[Backend::Scalar]
        }
    }

    /// Probe CPU features and pick the best supported backend.
    pub fn select() -> Backend {
        Backend::candidates()
            .iter()
            .copied()
            .filter(|b| b.is_supported())
            .max_by_key(|b| b.priority())
            .unwrap_or(Backend::Scalar)
    }

    /// Process-wide selection, probed on first use.
    pub fn active() -> Backend {
        static ACTIVE: OnceLock<Backend> = OnceLock::new();
        *ACTIVE.get_or_init(Backend::select)
    }

    /// One keystream block for the counter in `state`.
    pub(crate) fn block(self, state: &[u32; 16], out: &mut [u8; BLOCK_LEN]) {
        match self {
            Backend::Scalar => scalar::block(state, out),
            // AVX2 machines take the 128-bit path for single blocks; a
            // half-empty dual-block invocation is wasted work.
            #[cfg(target_arch = "x86_64")]
            Backend::Sse2 | Backend::Avx2 => unsafe { super::sse2::block(state, out) },
        }
    }

    /// Two keystream blocks for counters `c` and `c+1`, written to
    /// `out[0..64]` and `out[64..128]`.
    pub(crate) fn block_pair(self, state: &[u32; 16], out: &mut [u8; 2 * BLOCK_LEN]) {
        match self {
            #[cfg(target_arch = "x86_64")]
            Backend::Avx2 => unsafe { super::avx2::block_pair(state, out) },
            _ => {
                let mut tmp = [0u8; BLOCK_LEN];
                self.block(state, &mut tmp);
                out[..BLOCK_LEN].copy_from_slice(&tmp);
                let mut next = *state;
                next[COUNTER_WORD] = next[COUNTER_WORD].wrapping_add(1);
                self.block(&next, &mut tmp);
                out[BLOCK_LEN..].copy_from_slice(&tmp);
            }
        }
    }
}
