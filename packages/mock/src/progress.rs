//! Progress reporting for batch generation.
//!
//! [`ProgressCallback`] keeps the generator independent of any terminal
//! rendering. The CLI plugs in an `indicatif` bar; library callers and
//! tests use [`NullProgress`].

/// Receives progress updates while a batch is generated.
pub trait ProgressCallback: Send + Sync {
    /// Set the total number of records to generate.
    fn set_total(&self, total: u64);

    /// Advance progress by `delta` records.
    fn inc(&self, delta: u64);

    /// Mark progress as complete with a final message.
    fn finish(&self, msg: String);
}

/// Ignores all progress updates.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn finish(&self, _msg: String) {}
}

