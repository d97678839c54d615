// src/progress.rs
/// Lightweight progress reporting for a batch run.
/// Frontends implement this to surface per-character status.
pub trait Progress {
    /// Called once with the number of characters selected.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One character written.
    fn item_done(&mut self, _slug: &str, _moves: usize) {}

    /// One character skipped; the batch carries on.
    fn item_failed(&mut self, _slug: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
