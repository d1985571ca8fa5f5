//! Windowed state-consistency evaluation.
//!
//! Decides whether an appliance has been reliably in a single sensor
//! state for a continuous trailing window, given a noisy stream of
//! timestamped observations. Rejections are deliberately fine-grained:
//! each [`Inconsistency`] variant names a distinct way the data fell
//! short, which is what makes the decision debuggable in production
//! logs. An inconsistent verdict is the expected majority case, not an
//! error.

use chrono::Duration;

use crate::types::{Observation, SensorState, Timestamp};

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Evaluation window length: the trailing span over which the state
/// must be uniform.
pub const WINDOW_SECS: i64 = 5 * 60;

/// Largest tolerable interval between consecutive observations before
/// the appliance's condition is considered unknown for that stretch.
pub const MAX_GAP_SECS: i64 = 15;

/// Process-wide evaluation constants. Fixed at startup, never
/// per-request.
#[derive(Debug, Clone, Copy)]
pub struct ConsistencyPolicy {
    pub window: Duration,
    pub max_gap: Duration,
}

impl Default for ConsistencyPolicy {
    fn default() -> Self {
        Self {
            window: Duration::seconds(WINDOW_SECS),
            max_gap: Duration::seconds(MAX_GAP_SECS),
        }
    }
}

impl ConsistencyPolicy {
    /// Minimum observations needed to span the window at the maximum
    /// allowed cadence. A cheap sanity floor layered on top of the gap
    /// and coverage checks.
    pub fn min_samples(&self) -> usize {
        (self.window.num_seconds() / self.max_gap.num_seconds()) as usize
    }

    /// How far the oldest in-window observation may trail the window
    /// boundary before the window counts as uncovered.
    ///
    /// The observation that anchored the boundary may have aged out of
    /// the window by up to one max-gap, and its successor may trail by
    /// up to another, so anything within two max-gaps of the boundary
    /// still counts as covered.
    pub fn coverage_slack(&self) -> Duration {
        self.max_gap * 2
    }
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Why an evaluation declined to report a consistent state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inconsistency {
    /// The service started less than one window ago; there cannot yet
    /// be enough history to judge, so no PASS is permitted.
    WarmUp,
    /// No observations fall inside the trailing window.
    NoRecentObservations,
    /// Two consecutive in-window observations disagree on state.
    StateChanged,
    /// Two consecutive in-window observations are further apart than
    /// the max gap.
    GapExceedsBound,
    /// The in-window data does not extend far enough back to cover the
    /// window, even though every individual gap is small.
    WindowNotCovered,
    /// Fewer observations than the window could possibly hold at the
    /// maximum allowed cadence.
    TooFewSamples,
}

impl std::fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Inconsistency::WarmUp => "warm-up: service has not run long enough",
            Inconsistency::NoRecentObservations => "no observations in window",
            Inconsistency::StateChanged => "state changed within window",
            Inconsistency::GapExceedsBound => "gap exceeds bound",
            Inconsistency::WindowNotCovered => "window not fully covered",
            Inconsistency::TooFewSamples => "insufficient sample count",
        };
        write!(f, "{reason}")
    }
}

/// Outcome of one evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Every in-window observation agreed on this state and the window
    /// was fully covered at an acceptable cadence.
    Consistent(SensorState),
    Inconsistent(Inconsistency),
}

impl Verdict {
    pub fn is_consistent(&self) -> bool {
        matches!(self, Verdict::Consistent(_))
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Evaluate the observation log against the policy.
///
/// `observations` is a read-only snapshot in submission order; nothing
/// here mutates or reorders it. Checks run cheapest-first: the warm-up
/// and emptiness checks are O(1), the single pass over in-window
/// entries handles state changes and gaps, and the coverage and
/// sample-count checks close out boundary artifacts.
///
/// Out-of-order arrivals are tolerated defensively: a negative delta
/// between consecutive entries is treated as a zero-length gap rather
/// than a violation.
pub fn evaluate(
    observations: &[Observation],
    now: Timestamp,
    service_epoch: Timestamp,
    policy: &ConsistencyPolicy,
) -> Verdict {
    // A freshly restarted service has an empty or partial log; judging
    // it would conflate "no data" with "genuinely stationary".
    if now - service_epoch < policy.window {
        return Verdict::Inconsistent(Inconsistency::WarmUp);
    }

    let window_start = now - policy.window;
    let recent: Vec<&Observation> = observations
        .iter()
        .filter(|o| o.timestamp >= window_start)
        .collect();

    let Some(first) = recent.first() else {
        return Verdict::Inconsistent(Inconsistency::NoRecentObservations);
    };

    let state = first.state;
    let mut previous = *first;
    for observation in recent.iter().skip(1) {
        if observation.state != state {
            return Verdict::Inconsistent(Inconsistency::StateChanged);
        }
        let gap = (observation.timestamp - previous.timestamp).max(Duration::zero());
        if gap > policy.max_gap {
            return Verdict::Inconsistent(Inconsistency::GapExceedsBound);
        }
        previous = *observation;
    }

    if first.timestamp - window_start > policy.coverage_slack() {
        return Verdict::Inconsistent(Inconsistency::WindowNotCovered);
    }

    if recent.len() < policy.min_samples() {
        return Verdict::Inconsistent(Inconsistency::TooFewSamples);
    }

    Verdict::Consistent(state)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;

    /// Build `count` observations of one state at a fixed cadence,
    /// ending exactly at `end`.
    fn cadence_log(
        state: SensorState,
        count: usize,
        spacing: Duration,
        end: Timestamp,
    ) -> Vec<Observation> {
        (0..count)
            .map(|i| {
                let back = spacing * (count - 1 - i) as i32;
                Observation::new(state, end - back)
            })
            .collect()
    }

    fn policy() -> ConsistencyPolicy {
        ConsistencyPolicy::default()
    }

    fn long_running_epoch(now: Timestamp) -> Timestamp {
        now - Duration::minutes(10)
    }

    // -- policy ---------------------------------------------------------------

    #[test]
    fn default_policy_matches_reference_constants() {
        let p = policy();
        assert_eq!(p.window, Duration::minutes(5));
        assert_eq!(p.max_gap, Duration::seconds(15));
        assert_eq!(p.min_samples(), 20);
    }

    // -- warm-up --------------------------------------------------------------

    #[test]
    fn warm_up_suppresses_pass_even_for_perfect_log() {
        let now = Utc::now();
        let log = cadence_log(SensorState::Stationary, 30, Duration::seconds(10), now);

        // Service started 2 minutes ago, window is 5 minutes.
        let verdict = evaluate(&log, now, now - Duration::minutes(2), &policy());

        assert_matches!(verdict, Verdict::Inconsistent(Inconsistency::WarmUp));
    }

    #[test]
    fn warm_up_ends_once_epoch_is_a_full_window_old() {
        let now = Utc::now();
        let log = cadence_log(SensorState::Stationary, 30, Duration::seconds(10), now);

        let verdict = evaluate(&log, now, now - Duration::minutes(5), &policy());

        assert_matches!(verdict, Verdict::Consistent(SensorState::Stationary));
    }

    // -- emptiness ------------------------------------------------------------

    #[test]
    fn empty_log_is_inconsistent() {
        let now = Utc::now();
        let verdict = evaluate(&[], now, long_running_epoch(now), &policy());

        assert_matches!(
            verdict,
            Verdict::Inconsistent(Inconsistency::NoRecentObservations)
        );
    }

    #[test]
    fn log_with_only_stale_entries_is_inconsistent() {
        let now = Utc::now();
        // Plenty of data, all of it older than the window.
        let log = cadence_log(
            SensorState::Stationary,
            30,
            Duration::seconds(10),
            now - Duration::minutes(6),
        );

        let verdict = evaluate(&log, now, long_running_epoch(now), &policy());

        assert_matches!(
            verdict,
            Verdict::Inconsistent(Inconsistency::NoRecentObservations)
        );
    }

    // -- state changes --------------------------------------------------------

    #[test]
    fn mid_window_state_change_is_inconsistent() {
        let now = Utc::now();
        let mut log = cadence_log(SensorState::Stationary, 30, Duration::seconds(10), now);
        log[15].state = SensorState::Vibrating;

        let verdict = evaluate(&log, now, long_running_epoch(now), &policy());

        assert_matches!(verdict, Verdict::Inconsistent(Inconsistency::StateChanged));
    }

    #[test]
    fn state_change_outside_window_is_ignored() {
        let now = Utc::now();
        let mut log = cadence_log(SensorState::Stationary, 40, Duration::seconds(10), now);
        // 40 entries at 10s spacing reach back 390s; index 0 is ~90s
        // outside the 300s window.
        log[0].state = SensorState::Vibrating;

        let verdict = evaluate(&log, now, long_running_epoch(now), &policy());

        assert_matches!(verdict, Verdict::Consistent(SensorState::Stationary));
    }

    // -- gaps -----------------------------------------------------------------

    #[test]
    fn gap_over_bound_is_inconsistent_even_when_states_match() {
        let now = Utc::now();
        let mut log = cadence_log(SensorState::Stationary, 21, Duration::seconds(14), now);
        // Widen the midpoint gap from 14s to 20s by shifting the older
        // half 6 seconds further back.
        for observation in &mut log[..11] {
            observation.timestamp -= Duration::seconds(6);
        }

        let verdict = evaluate(&log, now, long_running_epoch(now), &policy());

        assert_matches!(
            verdict,
            Verdict::Inconsistent(Inconsistency::GapExceedsBound)
        );
    }

    #[test]
    fn gap_exactly_at_bound_is_tolerated() {
        let now = Utc::now();
        let log = cadence_log(SensorState::Stationary, 21, Duration::seconds(15), now);

        let verdict = evaluate(&log, now, long_running_epoch(now), &policy());

        assert_matches!(verdict, Verdict::Consistent(SensorState::Stationary));
    }

    #[test]
    fn out_of_order_arrival_does_not_count_as_a_gap() {
        let now = Utc::now();
        let mut log = cadence_log(SensorState::Stationary, 60, Duration::seconds(5), now);
        // Swap two timestamps so one consecutive delta is negative. At
        // 5s cadence the surrounding positive deltas stay within the
        // 15s bound.
        let ts = log[10].timestamp;
        log[10].timestamp = log[11].timestamp;
        log[11].timestamp = ts;

        let verdict = evaluate(&log, now, long_running_epoch(now), &policy());

        assert_matches!(verdict, Verdict::Consistent(SensorState::Stationary));
    }

    // -- coverage and sample count --------------------------------------------

    #[test]
    fn window_must_be_covered_by_data() {
        let now = Utc::now();
        // 21 healthy observations, but the earliest is only 3 minutes
        // old: every gap is small yet the log does not reach back to
        // the window boundary.
        let log = cadence_log(SensorState::Stationary, 21, Duration::seconds(9), now);

        let verdict = evaluate(&log, now, long_running_epoch(now), &policy());

        assert_matches!(
            verdict,
            Verdict::Inconsistent(Inconsistency::WindowNotCovered)
        );
    }

    #[test]
    fn sparse_log_fails_the_sample_floor() {
        let now = Utc::now();
        // 19 observations at exactly the max cadence: the boundary is
        // within slack but one sample short of the floor.
        let log = cadence_log(SensorState::Stationary, 19, Duration::seconds(15), now);

        let verdict = evaluate(&log, now, long_running_epoch(now), &policy());

        assert_matches!(verdict, Verdict::Inconsistent(Inconsistency::TooFewSamples));
    }

    // -- reference scenarios --------------------------------------------------

    #[test]
    fn reference_scenario_max_cadence_stationary_passes() {
        let now = Utc::now();
        // window=5m, maxGap=15s, epoch=now-10m, 21 stationary
        // observations spaced exactly 14s apart ending at now.
        let log = cadence_log(SensorState::Stationary, 21, Duration::seconds(14), now);

        let verdict = evaluate(&log, now, now - Duration::minutes(10), &policy());

        assert_eq!(verdict, Verdict::Consistent(SensorState::Stationary));
    }

    #[test]
    fn consistent_vibration_is_reported_as_vibrating() {
        let now = Utc::now();
        let log = cadence_log(SensorState::Vibrating, 30, Duration::seconds(10), now);

        let verdict = evaluate(&log, now, long_running_epoch(now), &policy());

        assert_eq!(verdict, Verdict::Consistent(SensorState::Vibrating));
    }

    // -- reasons --------------------------------------------------------------

    #[test]
    fn rejection_reasons_are_distinct_strings() {
        let reasons = [
            Inconsistency::WarmUp,
            Inconsistency::NoRecentObservations,
            Inconsistency::StateChanged,
            Inconsistency::GapExceedsBound,
            Inconsistency::WindowNotCovered,
            Inconsistency::TooFewSamples,
        ];
        let rendered: Vec<String> = reasons.iter().map(ToString::to_string).collect();
        for (i, a) in rendered.iter().enumerate() {
            for b in rendered.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
        assert!(rendered[3].contains("gap"));
        assert!(rendered[4].contains("covered"));
    }
}
