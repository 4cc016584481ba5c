//! Key material: loading, normalization, persistence.

pub mod loader;
pub mod material;

pub use loader::{load_key, save_key};
pub use material::{normalize_key, Key};

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum KeyError {
    /// Key file does not exist.
    NotFound(PathBuf),

    /// Key material is empty after decoding.
    Empty,

    /// Key file could not be read.
    Io(io::Error),
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyError::NotFound(p) => write!(f, "key file not found: {}", p.display()),
            KeyError::Empty => write!(f, "invalid key: empty"),
            KeyError::Io(e) => write!(f, "key I/O error: {}", e),
        }
    }
}

impl std::error::Error for KeyError {}

impl From<io::Error> for KeyError {
    fn from(e: io::Error) -> Self {
        KeyError::Io(e)
    }
}
