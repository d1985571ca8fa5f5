//! In-memory appliance status registry.
//!
//! Holds one [`AgentState`] per appliance: the monitor/idle flag and
//! the user who started monitoring. Agents poll this to decide whether
//! to evaluate, and write it back to `idle` when a cycle completes.
//! No persistence -- a restart resets every appliance to idle, which is
//! the safe direction (a stale `monitor` flag would eventually
//! re-notify; a stale `idle` just requires the user to re-arm).

use std::collections::HashMap;

use spindown_core::error::CoreError;
use spindown_core::types::{AgentState, AgentStatus, Appliance};

/// Registry of per-appliance monitor state.
#[derive(Debug, Default)]
pub struct StatusRegistry {
    states: HashMap<Appliance, AgentState>,
}

impl StatusRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state for an appliance. Appliances start idle with no
    /// user recorded.
    pub fn get(&self, appliance: Appliance) -> AgentState {
        self.states.get(&appliance).cloned().unwrap_or_default()
    }

    /// Start monitoring an appliance on behalf of `user`.
    ///
    /// A non-empty user is required: completion notifications need an
    /// owner to deliver to.
    pub fn set_monitor(&mut self, appliance: Appliance, user: &str) -> Result<AgentState, CoreError> {
        if user.trim().is_empty() {
            return Err(CoreError::Validation(
                "User is required when status is 'monitor'".into(),
            ));
        }
        let state = AgentState {
            status: AgentStatus::Monitor,
            user: user.trim().to_string(),
        };
        self.states.insert(appliance, state.clone());
        Ok(state)
    }

    /// Mark an appliance idle and clear its user.
    ///
    /// Idempotent: setting idle when already idle is a no-op success,
    /// so agents can signal completion without first reading the
    /// current state.
    pub fn set_idle(&mut self, appliance: Appliance) -> AgentState {
        let state = AgentState::default();
        self.states.insert(appliance, state.clone());
        state
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
