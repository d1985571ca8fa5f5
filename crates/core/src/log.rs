//! Append-only observation log with time-based pruning.
//!
//! One log is shared per agent process: the ingest handler appends,
//! the pruner deletes aged-out entries, and the evaluator reads a
//! snapshot. The log itself is not synchronized; callers wrap it in
//! `Arc<Mutex<..>>` and hold the lock only for the duration of an
//! append, a prune pass, or a snapshot clone -- never across an await
//! point or an outbound call.

use crate::types::{Observation, Timestamp};

/// Insertion-ordered sequence of sensor observations.
///
/// Submissions are assumed monotonically non-decreasing in timestamp,
/// but nothing here enforces that; the evaluator tolerates out-of-order
/// entries defensively.
#[derive(Debug, Default)]
pub struct ObservationLog {
    entries: Vec<Observation>,
}

impl ObservationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one observation. O(1) amortized.
    pub fn append(&mut self, observation: Observation) {
        self.entries.push(observation);
    }

    /// Remove all observations strictly older than `cutoff`, keeping
    /// insertion order. Returns the number of entries removed.
    ///
    /// The pruning horizon must be at least the evaluation window so
    /// the evaluator is never starved of history it still needs.
    pub fn prune_older_than(&mut self, cutoff: Timestamp) -> usize {
        let before = self.entries.len();
        self.entries.retain(|o| o.timestamp >= cutoff);
        before - self.entries.len()
    }

    /// Clone the current entries so evaluation can proceed without
    /// holding the lock.
    pub fn snapshot(&self) -> Vec<Observation> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
