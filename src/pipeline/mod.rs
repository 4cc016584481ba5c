//! File processing pipeline.
//!
//! Three size-dispatched modes over one cipher interface:
//! - `small`: whole file in memory, no parallelism;
//! - `large`: sequential chunked read, bounded-parallel cipher workers,
//!   completion-order positioned writes;
//! - `segmented`: fixed 64 MiB strides, per-segment file handles,
//!   pool-width concurrency, padding reconciliation on decrypt.
//!
//! The orchestrator owns dispatch, preconditions, and the decrypt
//! false-return policy.

pub mod cancel;
mod large;
pub mod orchestrator;
pub mod progress;
mod segmented;
mod small;

pub use cancel::CancelToken;
pub use orchestrator::{FilePipeline, ProcessingMode};
pub use progress::{ProgressCounters, ProgressSnapshot};

/// Direction of a pipeline run; decides header handling and offset math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Encrypt,
    Decrypt,
}
