//! Block-cipher padding schemes and the post-decryption tail reconciliation.
//!
//! Reconciliation runs only on segmented-mode decryption output. It is
//! best-effort: any failure is logged and swallowed, and the decryption
//! result stands.

use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use num_enum::TryFromPrimitive;
use tracing::debug;

/// Padding schemes understood by the reconciliation pass.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum PaddingScheme {
    None = 0,
    Pkcs7 = 1,
    Zero = 2,
    Iso10126 = 3,
    AnsiX923 = 4,
}

/// Per-cipher padding behavior.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PaddingSpec {
    pub scheme: PaddingScheme,
    pub block_size: usize,
}

impl PaddingSpec {
    pub const NONE: PaddingSpec = PaddingSpec { scheme: PaddingScheme::None, block_size: 1 };

    pub fn new(scheme: PaddingScheme, block_size: usize) -> Self {
        Self { scheme, block_size }
    }

    /// Ciphertext length after padding a plaintext of `n` bytes.
    pub fn padded_len(&self, n: usize) -> usize {
        match self.scheme {
            PaddingScheme::None => n,
            // count-terminated schemes always add at least one byte
            PaddingScheme::Pkcs7 | PaddingScheme::Iso10126 | PaddingScheme::AnsiX923 => {
                (n / self.block_size + 1) * self.block_size
            }
            // zero padding only rounds up; aligned input is untouched
            PaddingScheme::Zero => n.div_ceil(self.block_size) * self.block_size,
        }
    }
}

/// Number of padding bytes present at the end of `tail`.
///
/// `tail` is the final bytes of the decrypted output, at least one block
/// where possible. Returns 0 when the tail does not look like valid padding;
/// reconciliation must never over-trim.
pub fn calculate_padding_length(tail: &[u8], scheme: PaddingScheme, block_size: usize) -> usize {
    if tail.is_empty() {
        return 0;
    }
    match scheme {
        PaddingScheme::None => 0,
        PaddingScheme::Pkcs7 => {
            let count = *tail.last().unwrap_or(&0) as usize;
            if count == 0 || count > block_size || count > tail.len() {
                return 0;
            }
            let pad = &tail[tail.len() - count..];
            if pad.iter().all(|&b| b as usize == count) {
                count
            } else {
                0
            }
        }
        PaddingScheme::AnsiX923 => {
            let count = *tail.last().unwrap_or(&0) as usize;
            if count == 0 || count > block_size || count > tail.len() {
                return 0;
            }
            let pad = &tail[tail.len() - count..tail.len() - 1];
            if pad.iter().all(|&b| b == 0) {
                count
            } else {
                0
            }
        }
        PaddingScheme::Iso10126 => {
            // filler bytes are random; only the count byte is meaningful
            let count = *tail.last().unwrap_or(&0) as usize;
            if count == 0 || count > block_size || count > tail.len() {
                0
            } else {
                count
            }
        }
        PaddingScheme::Zero => {
            // trailing zeros up to one block; zero padding never spans blocks
            tail.iter().rev().take_while(|&&b| b == 0).count().min(block_size - 1).min(tail.len())
        }
    }
}

/// New logical length of `buf` after stripping tail padding.
pub fn remove_padding(buf: &[u8], scheme: PaddingScheme, block_size: usize) -> usize {
    let window = buf.len().min(2 * block_size);
    let pad = calculate_padding_length(&buf[buf.len() - window..], scheme, block_size);
    buf.len() - pad
}

/// Trim tail padding from a decrypted file in place. Best-effort: logs and
/// swallows every failure.
///
/// Files at or below `small_threshold` are read whole and rewritten; larger
/// files read only the final window and shrink via `set_len`.
pub fn reconcile_file_tail(path: &Path, spec: &PaddingSpec, small_threshold: usize) {
    if spec.scheme == PaddingScheme::None {
        return;
    }
    if let Err(e) = reconcile_inner(path, spec, small_threshold) {
        debug!(path = %path.display(), error = %e, "padding reconciliation skipped");
    }
}

fn reconcile_inner(
    path: &Path,
    spec: &PaddingSpec,
    small_threshold: usize,
) -> std::io::Result<()> {
    let mut file = OpenOptions::new().read(true).write(true).open(path)?;
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(());
    }

    if len <= small_threshold as u64 {
        let mut buf = Vec::with_capacity(len as usize);
        file.read_to_end(&mut buf)?;
        let new_len = remove_padding(&buf, spec.scheme, spec.block_size);
        if new_len != buf.len() {
            file.set_len(new_len as u64)?;
        }
        return Ok(());
    }

    let window = (2 * spec.block_size as u64).min(len);
    let mut tail = vec![0u8; window as usize];
    file.seek(SeekFrom::Start(len - window))?;
    file.read_exact(&mut tail)?;
    let pad = calculate_padding_length(&tail, spec.scheme, spec.block_size) as u64;
    if pad > 0 {
        file.set_len(len - pad)?;
        file.flush()?;
    }
    Ok(())
}
