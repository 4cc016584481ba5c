//! Algorithm identity: 4-character tag, display name, file extension.
//!
//! The tag is the on-disk identity embedded in the container header; the
//! extension is the fallback identity when a file carries no readable
//! header. Display falls back to the raw tag for unknown entries.

use std::fmt;
use std::path::{Path, PathBuf};

/// 4 ASCII bytes, right-padded with `_` when the logical name is shorter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlgorithmTag(pub [u8; 4]);

impl AlgorithmTag {
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Build a tag from a logical name, truncating to 4 and padding with `_`.
    pub fn from_name(name: &str) -> Self {
        let mut out = [b'_'; 4];
        for (dst, src) in out.iter_mut().zip(name.bytes()) {
            *dst = src;
        }
        Self(out)
    }

    pub fn as_str(&self) -> &str {
        // Tags are validated ASCII on every construction path.
        std::str::from_utf8(&self.0).unwrap_or("????")
    }
}

impl fmt::Display for AlgorithmTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const TAG_AESG: AlgorithmTag = AlgorithmTag::new(*b"AESG");
pub const TAG_CC20: AlgorithmTag = AlgorithmTag::new(*b"CC20");
pub const TAG_SL20: AlgorithmTag = AlgorithmTag::new(*b"SL20");
pub const TAG_3DES: AlgorithmTag = AlgorithmTag::new(*b"3DES");
pub const TAG_3FSH: AlgorithmTag = AlgorithmTag::new(*b"3FSH");
pub const TAG_RC2: AlgorithmTag = AlgorithmTag::new(*b"RC2_");
pub const TAG_XCCH: AlgorithmTag = AlgorithmTag::new(*b"XCCH");
pub const TAG_AES: AlgorithmTag = AlgorithmTag::new(*b"AES_");

/// One row of the identity table.
#[derive(Debug, Clone, Copy)]
pub struct AlgorithmInfo {
    pub tag: AlgorithmTag,
    pub display_name: &'static str,
    pub extension: &'static str,
}

/// The fixed identity table. Order is stable; tags never change meaning.
pub const ALGORITHMS: &[AlgorithmInfo] = &[
    AlgorithmInfo { tag: TAG_AESG, display_name: "AES-256-GCM", extension: "aesg" },
    AlgorithmInfo { tag: TAG_CC20, display_name: "ChaCha20", extension: "cc20" },
    AlgorithmInfo { tag: TAG_SL20, display_name: "Salsa20", extension: "sl20" },
    AlgorithmInfo { tag: TAG_3DES, display_name: "Triple DES", extension: "3des" },
    AlgorithmInfo { tag: TAG_3FSH, display_name: "Threefish", extension: "3fsh" },
    AlgorithmInfo { tag: TAG_RC2, display_name: "RC2", extension: "rc2" },
    AlgorithmInfo { tag: TAG_XCCH, display_name: "XChaCha20-Poly1305", extension: "xcch" },
    AlgorithmInfo { tag: TAG_AES, display_name: "AES-256-CBC", extension: "aes" },
];

pub fn info_for_tag(tag: AlgorithmTag) -> Option<&'static AlgorithmInfo> {
    ALGORITHMS.iter().find(|a| a.tag == tag)
}

/// Human-readable name; unknown tags display as themselves.
pub fn display_name(tag: AlgorithmTag) -> String {
    match info_for_tag(tag) {
        Some(info) => info.display_name.to_string(),
        None => tag.to_string(),
    }
}

pub fn extension_for(tag: AlgorithmTag) -> Option<&'static str> {
    info_for_tag(tag).map(|a| a.extension)
}

/// Reverse lookup used by extension-based detection.
pub fn tag_for_extension(ext: &str) -> Option<AlgorithmTag> {
    let ext = ext.trim_start_matches('.');
    ALGORITHMS.iter().find(|a| a.extension.eq_ignore_ascii_case(ext)).map(|a| a.tag)
}

/// Output path for an encrypted copy of `original`: the cipher's extension
/// is appended to the full file name (`report.txt` -> `report.txt.cc20`).
pub fn encrypted_path_for(original: &Path, tag: AlgorithmTag) -> PathBuf {
    let ext = extension_for(tag).unwrap_or("enc");
    let mut name = original
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.push('.');
    name.push_str(ext);
    original.with_file_name(name)
}
