//! Shared domain types.
//!
//! Wire forms are lowercase strings (`"vibrating"`, `"monitor"`, ...)
//! to stay compatible with the existing sensor bridge and dashboard
//! clients.

use serde::{Deserialize, Serialize};

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

// ---------------------------------------------------------------------------
// Sensor observations
// ---------------------------------------------------------------------------

/// Binary reading reported by the vibration sensor bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorState {
    Vibrating,
    Stationary,
}

impl std::fmt::Display for SensorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensorState::Vibrating => write!(f, "vibrating"),
            SensorState::Stationary => write!(f, "stationary"),
        }
    }
}

/// One timestamped sensor reading. Immutable once created; the
/// timestamp is assigned server-side at receipt, never by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub state: SensorState,
    pub timestamp: Timestamp,
}

impl Observation {
    pub fn new(state: SensorState, timestamp: Timestamp) -> Self {
        Self { state, timestamp }
    }
}

// ---------------------------------------------------------------------------
// Registry state
// ---------------------------------------------------------------------------

/// Whether an appliance cycle is actively being watched for completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Monitor,
    Idle,
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentStatus::Monitor => write!(f, "monitor"),
            AgentStatus::Idle => write!(f, "idle"),
        }
    }
}

/// Registry entry for one appliance: the monitor/idle flag and the
/// user who started monitoring. `user` is empty whenever the status
/// is idle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentState {
    pub status: AgentStatus,
    pub user: String,
}

impl Default for AgentState {
    fn default() -> Self {
        Self {
            status: AgentStatus::Idle,
            user: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Appliances
// ---------------------------------------------------------------------------

/// The monitored appliances. Each has its own registry entry and its
/// own agent process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appliance {
    Washer,
    Dryer,
}

impl Appliance {
    /// Human-readable completion message sent to users.
    pub fn finished_message(&self) -> &'static str {
        match self {
            Appliance::Washer => "\u{2705} Washer has finished running",
            Appliance::Dryer => "\u{2705} Dryer has finished running",
        }
    }
}

impl std::fmt::Display for Appliance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Appliance::Washer => write!(f, "washer"),
            Appliance::Dryer => write!(f, "dryer"),
        }
    }
}

impl std::str::FromStr for Appliance {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "washer" => Ok(Appliance::Washer),
            "dryer" => Ok(Appliance::Dryer),
            other => Err(crate::error::CoreError::Validation(format!(
                "Unknown appliance: '{other}'. Valid appliances: washer, dryer"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
