//! Cooperative cancellation.
//!
//! Every pipeline loop checks the token at its suspension points (reads,
//! cipher dispatch, writes, joins). Once the flag is observed no new work is
//! scheduled; in-flight tasks settle and `EngineError::Cancelled`
//! propagates. Partial output stays on disk with undefined contents.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::types::EngineError;

#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent, callable from any thread.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// `Err(Cancelled)` once the flag is set; used with `?` at suspension
    /// points.
    pub fn check(&self) -> Result<(), EngineError> {
        if self.is_cancelled() {
            Err(EngineError::Cancelled)
        } else {
            Ok(())
        }
    }
}
