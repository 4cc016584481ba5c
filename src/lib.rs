//! filecrypt-core
//!
//! File encryption engine: size-dispatched parallel pipeline,
//! self-describing container format, pluggable cipher catalog with a
//! SIMD-accelerated ChaCha20.

#![deny(unsafe_code)] // SIMD kernels opt back in locally

// Shared and top level
pub mod config;
pub mod constants;
pub mod types;

// Domain modules
pub mod cipher;
pub mod detect;
pub mod header;
pub mod key;
pub mod padding;

// Pipeline
pub mod pipeline;

// -----------------------------------------------------------------------------
// Prelude
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::cipher::identity::{encrypted_path_for, AlgorithmTag};
    pub use crate::cipher::{catalog, cipher_for_tag, CipherError, FileCipher};
    pub use crate::config::EngineConfig;
    pub use crate::detect::{detect_algorithm, Detection};
    pub use crate::header::FileHeader;
    pub use crate::key::{load_key, save_key, Key};
    pub use crate::pipeline::{CancelToken, FilePipeline, ProcessingMode};
    pub use crate::types::EngineError;
}
