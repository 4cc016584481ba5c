use std::io;
use std::path::PathBuf;

use crate::cipher::CipherError;
use crate::header::HeaderError;
use crate::key::KeyError;

/// Unified engine error covering I/O, container, key, cipher, and pipeline
/// failures.
/// - Ergonomic `From<T>` impls enable `?` across the pipeline.
/// - Messages aim to be stable and contextual for logs.
#[derive(Debug)]
pub enum EngineError {
    /// Input file does not exist. Always propagated to the caller.
    InputMissing(PathBuf),

    /// Container-level error (bad magic, unsupported version, truncation).
    Header(HeaderError),

    /// Key material error (empty, unparseable).
    Key(KeyError),

    /// Cipher failure (key length, authentication, transform).
    Cipher(CipherError),

    /// Operation observed a cancellation signal.
    Cancelled,

    /// Pipeline wiring error (closed channel, poisoned worker).
    Pipeline(&'static str),

    /// Underlying I/O error.
    Io(io::Error),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InputMissing(p) => write!(f, "input file not found: {}", p.display()),
            EngineError::Header(e) => write!(f, "container error: {}", e),
            EngineError::Key(e) => write!(f, "key error: {}", e),
            EngineError::Cipher(e) => write!(f, "cipher error: {}", e),
            EngineError::Cancelled => write!(f, "operation cancelled"),
            EngineError::Pipeline(msg) => write!(f, "pipeline error: {}", msg),
            EngineError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<io::Error> for EngineError {
    fn from(e: io::Error) -> Self {
        EngineError::Io(e)
    }
}

impl From<HeaderError> for EngineError {
    fn from(e: HeaderError) -> Self {
        EngineError::Header(e)
    }
}

impl From<KeyError> for EngineError {
    fn from(e: KeyError) -> Self {
        EngineError::Key(e)
    }
}

impl From<CipherError> for EngineError {
    fn from(e: CipherError) -> Self {
        EngineError::Cipher(e)
    }
}
