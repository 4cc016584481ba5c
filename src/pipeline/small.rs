//! Whole-file mode for payloads up to the large-file threshold.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::cipher::FileCipher;
use crate::constants::HEADER_LEN;
use crate::header::{decode_header, encode_header, FileHeader};
use crate::key::Key;
use crate::pipeline::cancel::CancelToken;
use crate::pipeline::progress::ProgressCounters;
use crate::types::EngineError;

pub(crate) fn encrypt(
    input: &Path,
    output: &Path,
    cipher: &dyn FileCipher,
    key: &Key,
    cancel: &CancelToken,
    counters: &mut ProgressCounters,
) -> Result<(), EngineError> {
    let plaintext = fs::read(input)?;
    cancel.check()?;

    let sealed = cipher.encrypt(&plaintext, key)?;
    cancel.check()?;

    let header = encode_header(&FileHeader::new(cipher.tag()));
    let mut out = Vec::with_capacity(HEADER_LEN + sealed.len());
    out.extend_from_slice(&header);
    out.extend_from_slice(&sealed);
    fs::write(output, &out)?;

    counters.add_unit(plaintext.len(), out.len());
    info!(input = %input.display(), bytes = plaintext.len(), "small-mode encrypt complete");
    Ok(())
}

pub(crate) fn decrypt(
    input: &Path,
    output: &Path,
    cipher: &dyn FileCipher,
    key: &Key,
    cancel: &CancelToken,
    counters: &mut ProgressCounters,
) -> Result<(), EngineError> {
    let container = fs::read(input)?;
    cancel.check()?;

    if container.len() < HEADER_LEN {
        return Err(EngineError::Header(crate::header::HeaderError::BufferTooShort {
            have: container.len(),
            need: HEADER_LEN,
        }));
    }
    decode_header(&container[..HEADER_LEN])?;

    let plaintext = cipher.decrypt(&container[HEADER_LEN..], key)?;
    cancel.check()?;
    fs::write(output, &plaintext)?;

    counters.add_unit(container.len(), plaintext.len());
    info!(input = %input.display(), bytes = plaintext.len(), "small-mode decrypt complete");
    Ok(())
}
