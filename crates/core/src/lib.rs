//! `spindown-core` -- domain types and decision logic for the
//! spin-down appliance monitor.
//!
//! Holds the observation log and the windowed consistency evaluator
//! that decides when a washer or dryer has reliably stopped moving.
//! This crate performs no I/O; the HTTP surfaces live in
//! `spindown-api` and `spindown-agent`.

pub mod consistency;
pub mod error;
pub mod log;
pub mod types;

pub use consistency::{evaluate, ConsistencyPolicy, Inconsistency, Verdict};
pub use error::CoreError;
pub use log::ObservationLog;
pub use types::{AgentState, AgentStatus, Appliance, Observation, SensorState};
