//! # Progress Module
//!
//! The progress sink the scheduler reports through: a direct,
//! synchronous callback. Callers pass a closure and get ticks as work
//! completes. [`ProgressSink`] serializes calls behind a single mutex so
//! the sink is never entered concurrently, even when the scheduler is
//! reporting from multiple worker threads.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Which phase of the pipeline a progress update belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Hash,
    Compare,
}

impl Phase {
    /// The wire-level name (`"hash"` / `"compare"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Hash => "hash",
            Phase::Compare => "compare",
        }
    }
}

/// The `detail` argument of the progress callback: either a single path
/// (hash phase), a pair of paths (compare phase), or nothing.
#[derive(Debug, Clone)]
pub enum ProgressDetail {
    Path(PathBuf),
    Pair(PathBuf, PathBuf),
    None,
}

impl ProgressDetail {
    pub fn path(p: &Path) -> Self {
        ProgressDetail::Path(p.to_path_buf())
    }

    pub fn pair(a: &Path, b: &Path) -> Self {
        ProgressDetail::Pair(a.to_path_buf(), b.to_path_buf())
    }
}

/// A serialized callback invoked as the scheduler makes progress.
///
/// `current` is 0-based and monotone within a phase; `total` is fixed
/// before the first update of that phase is emitted.
pub struct ProgressSink {
    callback: Mutex<Box<dyn FnMut(Phase, usize, usize, ProgressDetail, Option<f64>) + Send>>,
}

impl ProgressSink {
    /// Wrap a caller-supplied closure. The closure does not need to be
    /// `Sync` itself — the mutex provides that.
    pub fn new<F>(callback: F) -> Self
    where
        F: FnMut(Phase, usize, usize, ProgressDetail, Option<f64>) + Send + 'static,
    {
        Self {
            callback: Mutex::new(Box::new(callback)),
        }
    }

    /// Report one unit of progress. Safe to call from any worker thread;
    /// calls are serialized so the sink is never entered concurrently.
    pub fn report(&self, phase: Phase, current: usize, total: usize, detail: ProgressDetail, similarity: Option<f64>) {
        let mut callback = self.callback.lock().unwrap_or_else(|e| e.into_inner());
        callback(phase, current, total, detail, similarity);
    }
}
