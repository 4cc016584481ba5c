//! Mode dispatch and the caller-facing pipeline operations.
//!
//! Failure policy:
//! - encryption surfaces every failure;
//! - decryption propagates only missing input and cancellation, and folds
//!   everything else into a logged `false` so callers branch on one boolean.

use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing::{error, info};

use crate::cipher::FileCipher;
use crate::config::EngineConfig;
use crate::key::{save_key, Key};
use crate::pipeline::cancel::CancelToken;
use crate::pipeline::progress::{ProgressCounters, ProgressSnapshot};
use crate::pipeline::{large, segmented, small, Direction};
use crate::types::EngineError;

/// Size-dispatched processing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingMode {
    Small,
    Large,
    VeryLarge,
}

impl ProcessingMode {
    pub fn name(self) -> &'static str {
        match self {
            ProcessingMode::Small => "small",
            ProcessingMode::Large => "large",
            ProcessingMode::VeryLarge => "very-large",
        }
    }
}

/// File pipeline over one immutable configuration.
#[derive(Debug, Clone, Default)]
pub struct FilePipeline {
    config: EngineConfig,
}

impl FilePipeline {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Mode for a payload of `len` bytes.
    pub fn mode_for(&self, len: u64) -> ProcessingMode {
        if len <= self.config.large_file_threshold {
            ProcessingMode::Small
        } else if len <= self.config.very_large_file_threshold {
            ProcessingMode::Large
        } else {
            ProcessingMode::VeryLarge
        }
    }

    /// Encrypt `input` into `output`.
    ///
    /// A missing key is generated by the cipher; when `key_output` is given
    /// the key is persisted there as uppercase hex. Returns the key that was
    /// used.
    pub fn encrypt_file(
        &self,
        input: &Path,
        output: &Path,
        cipher: &dyn FileCipher,
        key: Option<Key>,
        key_output: Option<&Path>,
        cancel: &CancelToken,
    ) -> Result<Key, EngineError> {
        let len = self.preflight(input, output)?;
        let key = key.unwrap_or_else(|| cipher.generate_key());

        let (mode, snapshot) =
            self.run(input, output, cipher, &key, Direction::Encrypt, len, cancel)?;
        info!(
            mode = mode.name(),
            tag = %cipher.tag(),
            bytes_out = snapshot.bytes_out,
            "encrypt finished"
        );

        if let Some(key_path) = key_output {
            save_key(key_path, &key)?;
        }
        Ok(key)
    }

    /// Decrypt `input` into `output`.
    ///
    /// `Ok(true)` on success; `Ok(false)` with the root cause logged for
    /// cipher and container failures. Missing input and cancellation
    /// propagate as errors so callers can tell them apart.
    pub fn decrypt_file(
        &self,
        input: &Path,
        output: &Path,
        cipher: &dyn FileCipher,
        key: &Key,
        cancel: &CancelToken,
    ) -> Result<bool, EngineError> {
        let len = self.preflight(input, output)?;
        // Dispatch on payload length, not container length, so both
        // directions pick the same chunk geometry.
        let payload_len = len.saturating_sub(crate::constants::HEADER_LEN as u64);

        match self.run(input, output, cipher, key, Direction::Decrypt, payload_len, cancel) {
            Ok((mode, snapshot)) => {
                info!(
                    mode = mode.name(),
                    tag = %cipher.tag(),
                    bytes_out = snapshot.bytes_out,
                    "decrypt finished"
                );
                Ok(true)
            }
            Err(e @ EngineError::InputMissing(_)) | Err(e @ EngineError::Cancelled) => Err(e),
            Err(e) => {
                error!(input = %input.display(), error = %e, "decrypt failed");
                Ok(false)
            }
        }
    }

    /// Common preconditions: input must exist, output directory is created.
    /// Returns the input length.
    fn preflight(&self, input: &Path, output: &Path) -> Result<u64, EngineError> {
        if !input.exists() {
            return Err(EngineError::InputMissing(input.to_path_buf()));
        }
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(fs::metadata(input)?.len())
    }

    #[allow(clippy::too_many_arguments)]
    fn run(
        &self,
        input: &Path,
        output: &Path,
        cipher: &dyn FileCipher,
        key: &Key,
        direction: Direction,
        payload_len: u64,
        cancel: &CancelToken,
    ) -> Result<(ProcessingMode, ProgressSnapshot), EngineError> {
        let mode = self.mode_for(payload_len);
        let started = Instant::now();
        let mut counters = ProgressCounters::default();

        match (mode, direction) {
            (ProcessingMode::Small, Direction::Encrypt) => {
                small::encrypt(input, output, cipher, key, cancel, &mut counters)?
            }
            (ProcessingMode::Small, Direction::Decrypt) => {
                small::decrypt(input, output, cipher, key, cancel, &mut counters)?
            }
            (ProcessingMode::Large, _) => large::process(
                input,
                output,
                cipher,
                key,
                direction,
                &self.config,
                cancel,
                &mut counters,
            )?,
            (ProcessingMode::VeryLarge, _) => segmented::process(
                input,
                output,
                cipher,
                key,
                direction,
                &self.config,
                cancel,
                &mut counters,
            )?,
        }

        Ok((mode, ProgressSnapshot::from_counters(mode.name(), &counters, started.elapsed())))
    }
}
