//! Algorithm detection: header first, file extension second.

use std::fs::File;
use std::path::Path;

use tracing::debug;

use crate::cipher::identity::{tag_for_extension, AlgorithmTag};
use crate::constants::HEADER_LEN;
use crate::header::{read_header, FileHeader};

/// Outcome of a detection probe. `tag` is `None` when nothing identified
/// the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Detection {
    pub tag: Option<AlgorithmTag>,
    pub header: Option<FileHeader>,
}

/// Identify the cipher that produced `path`.
///
/// Files too small for a header detect as nothing. A parseable header wins;
/// an invalid container falls back to the extension map. I/O failures are
/// logged at debug level and detect as nothing.
pub fn detect_algorithm(path: &Path) -> Detection {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "detection: open failed");
            return Detection::default();
        }
    };

    match file.metadata() {
        Ok(meta) if meta.len() >= HEADER_LEN as u64 => {}
        Ok(_) => return Detection::default(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "detection: metadata failed");
            return Detection::default();
        }
    }

    match read_header(&mut file) {
        Ok(header) => Detection { tag: Some(header.tag), header: Some(header) },
        Err(e) => {
            debug!(path = %path.display(), error = %e, "detection: falling back to extension");
            let tag = path
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(tag_for_extension);
            Detection { tag, header: None }
        }
    }
}
