//! The periodic evaluation loop and log pruner.
//!
//! Every cycle: poll the registry, and if the appliance is being
//! monitored, snapshot the observation log, run the windowed
//! consistency check, and on a stationary verdict signal completion
//! (registry write + user notification). Downstream failures are
//! logged and the loop simply tries again next interval; no failure
//! in a single cycle is fatal.

use std::sync::PoisonError;
use std::time::Duration;

use chrono::Utc;
use spindown_core::consistency::{evaluate, ConsistencyPolicy, Inconsistency, Verdict};
use spindown_core::types::{AgentStatus, Appliance, SensorState, Timestamp};

use crate::notify::SmsNotifier;
use crate::registry::RegistryClient;
use crate::SharedLog;

/// Period between prune passes. Deliberately longer than the
/// evaluation window so a prune can never remove data the evaluator
/// still needs.
pub const PRUNE_PERIOD: Duration = Duration::from_secs(10 * 60);

/// Outcome of one evaluation cycle. Mostly useful for logging and for
/// exercising the cycle deterministically in tests, without a ticker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The registry could not be reached or answered with an error.
    RegistryUnavailable,
    /// The appliance is not being monitored; nothing to evaluate.
    NotMonitoring,
    /// The log did not support a decision this cycle.
    Undecided(Inconsistency),
    /// The appliance is consistently vibrating, i.e. still running.
    StillRunning,
    /// Completion detected and signalled.
    CycleFinished { user: String },
}

/// Owns everything one evaluation cycle needs.
pub struct Monitor {
    log: SharedLog,
    policy: ConsistencyPolicy,
    service_epoch: Timestamp,
    appliance: Appliance,
    registry: RegistryClient,
    notifier: Option<SmsNotifier>,
}

impl Monitor {
    pub fn new(
        log: SharedLog,
        service_epoch: Timestamp,
        appliance: Appliance,
        registry: RegistryClient,
        notifier: Option<SmsNotifier>,
    ) -> Self {
        Self {
            log,
            policy: ConsistencyPolicy::default(),
            service_epoch,
            appliance,
            registry,
            notifier,
        }
    }

    /// Run the evaluation loop indefinitely.
    pub async fn run(self, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let outcome = self.run_cycle(Utc::now()).await;
            tracing::debug!(?outcome, "Evaluation cycle finished");
        }
    }

    /// Execute a single evaluation cycle at `now`.
    ///
    /// The log lock is released before any outbound call, so a slow
    /// registry or SMS gateway never stalls sensor ingestion.
    pub async fn run_cycle(&self, now: Timestamp) -> CycleOutcome {
        let status = match self.registry.get_status().await {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to get agent status");
                return CycleOutcome::RegistryUnavailable;
            }
        };

        if status.status != AgentStatus::Monitor {
            tracing::debug!(status = %status.status, "Agent status is not 'monitor', skipping evaluation");
            return CycleOutcome::NotMonitoring;
        }

        match self.evaluate_now(now) {
            Verdict::Inconsistent(reason) => {
                tracing::debug!(reason = %reason, "State not yet consistent");
                CycleOutcome::Undecided(reason)
            }
            Verdict::Consistent(SensorState::Vibrating) => {
                tracing::debug!("Appliance is consistently vibrating, still running");
                CycleOutcome::StillRunning
            }
            Verdict::Consistent(SensorState::Stationary) => {
                tracing::info!(
                    appliance = %self.appliance,
                    user = %status.user,
                    "Stationary for a full window, signalling completion",
                );
                self.signal_completion(&status.user).await;
                CycleOutcome::CycleFinished { user: status.user }
            }
        }
    }

    /// Snapshot the log and run the consistency check. Split out from
    /// [`run_cycle`](Monitor::run_cycle) so the decision path is
    /// testable without a registry.
    pub fn evaluate_now(&self, now: Timestamp) -> Verdict {
        let snapshot = self
            .log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot();
        evaluate(&snapshot, now, self.service_epoch, &self.policy)
    }

    /// Mark the appliance idle and notify the monitor owner. Both
    /// calls are fire-and-forget: a failure is logged and the cycle
    /// ends; the next interval starts fresh.
    async fn signal_completion(&self, user: &str) {
        if let Err(e) = self.registry.set_idle().await {
            tracing::error!(error = %e, "Failed to update status to 'idle'");
        } else {
            tracing::info!("Successfully updated status to 'idle'");
        }

        match &self.notifier {
            Some(notifier) => {
                let message = self.appliance.finished_message();
                if let Err(e) = notifier.notify(user, message).await {
                    tracing::error!(error = %e, "Failed to send SMS");
                }
            }
            None => {
                tracing::info!("SMS gateway not configured, skipping notification");
            }
        }
    }
}

/// Run the pruner indefinitely: discard observations older than the
/// evaluation window on a fixed period.
pub async fn run_pruner(log: SharedLog, period: Duration) {
    let policy = ConsistencyPolicy::default();
    let mut ticker = tokio::time::interval(period);
    loop {
        ticker.tick().await;
        let cutoff = Utc::now() - policy.window;
        let (removed, kept) = {
            let mut log = log.lock().unwrap_or_else(PoisonError::into_inner);
            let removed = log.prune_older_than(cutoff);
            (removed, log.len())
        };
        tracing::info!(removed, kept, "Pruned old state submissions");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
