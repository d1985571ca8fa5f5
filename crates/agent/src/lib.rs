//! `spindown-agent` library crate.
//!
//! Re-exports internal modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod config;
pub mod ingest;
pub mod monitor;
pub mod notify;
pub mod registry;

use std::sync::{Arc, Mutex};

use spindown_core::ObservationLog;

/// The observation log shared between the ingest handler, the pruner,
/// and the evaluator. The lock is held only for an append, a prune
/// pass, or a snapshot clone.
pub type SharedLog = Arc<Mutex<ObservationLog>>;

/// Fresh, empty shared log.
pub fn new_shared_log() -> SharedLog {
    Arc::new(Mutex::new(ObservationLog::new()))
}
