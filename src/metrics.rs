// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Architecture Duel Arena - Per-Player Metrics
//
// Folds tick outcomes, in timeline order, into one fixed-shape record per
// player. Latches (first degradation, failure) are written at most once.

use serde::{Deserialize, Serialize};

use crate::types::{FailureComponent, TickOutcome};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMetrics {
    pub survived_ticks: u32,
    pub degraded_ticks: u32,
    pub max_latency_ms: f64,
    pub max_error_rate: f64,
    pub first_degraded_at_rps: Option<u32>,
    pub failed_at_rps: Option<u32>,
    pub failure_reason: Option<FailureComponent>,
}

impl PlayerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_failed(&self) -> bool {
        self.failed_at_rps.is_some()
    }

    /// Record one tick observed at `rps`.
    ///
    /// Ignored once the player has failed. A failing tick counts as degraded
    /// but not as survived, and its infinite latency is not folded into the
    /// maxima.
    pub fn record_tick(&mut self, rps: u32, outcome: &TickOutcome) {
        if self.has_failed() {
            return;
        }

        if outcome.degraded() {
            self.degraded_ticks += 1;
            self.first_degraded_at_rps.get_or_insert(rps);
        }

        if let Some(component) = outcome.failure_reason() {
            self.failed_at_rps = Some(rps);
            self.failure_reason = Some(component);
            return;
        }

        self.survived_ticks += 1;
        self.max_latency_ms = self.max_latency_ms.max(outcome.latency_ms());
        self.max_error_rate = self.max_error_rate.max(outcome.error_rate());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy(latency_ms: f64) -> TickOutcome {
        TickOutcome::serving(latency_ms, 0.0)
    }

    fn degraded(error_rate: f64) -> TickOutcome {
        let tick = TickOutcome::serving(125.0, error_rate);
        assert!(tick.degraded());
        tick
    }

    #[test]
    fn test_healthy_ticks_raise_maxima() {
        let mut m = PlayerMetrics::new();
        m.record_tick(10, &healthy(30.0));
        m.record_tick(20, &healthy(55.0));
        m.record_tick(30, &healthy(40.0));

        assert_eq!(m.survived_ticks, 3);
        assert_eq!(m.degraded_ticks, 0);
        assert_eq!(m.max_latency_ms, 55.0);
        assert_eq!(m.first_degraded_at_rps, None);
        assert!(!m.has_failed());
    }

    #[test]
    fn test_first_degradation_latches_once() {
        let mut m = PlayerMetrics::new();
        m.record_tick(100, &healthy(30.0));
        m.record_tick(118, &degraded(0.054));
        m.record_tick(150, &healthy(60.0));
        m.record_tick(160, &degraded(0.07));

        assert_eq!(m.first_degraded_at_rps, Some(118));
        assert_eq!(m.degraded_ticks, 2);
        assert_eq!(m.survived_ticks, 4);
        assert_eq!(m.max_error_rate, 0.07);
    }

    #[test]
    fn test_failure_latches_and_halts() {
        let mut m = PlayerMetrics::new();
        m.record_tick(50, &healthy(30.0));
        m.record_tick(170, &TickOutcome::failed(FailureComponent::Database));
        m.record_tick(20, &healthy(30.0));
        m.record_tick(400, &TickOutcome::failed(FailureComponent::Compute));

        assert_eq!(m.survived_ticks, 1);
        assert_eq!(m.failed_at_rps, Some(170));
        assert_eq!(m.failure_reason, Some(FailureComponent::Database));
        assert_eq!(m.degraded_ticks, 1);
        assert_eq!(m.first_degraded_at_rps, Some(170));
        assert_eq!(m.max_latency_ms, 30.0);
        assert_eq!(m.max_error_rate, 0.0);
    }

    #[test]
    fn test_failure_keeps_earlier_degradation() {
        let mut m = PlayerMetrics::new();
        m.record_tick(118, &degraded(0.054));
        m.record_tick(300, &TickOutcome::failed(FailureComponent::Compute));

        assert_eq!(m.first_degraded_at_rps, Some(118));
        assert_eq!(m.degraded_ticks, 2);
    }

    #[test]
    fn test_failure_reports_the_failing_component() {
        for component in [FailureComponent::Compute, FailureComponent::Database] {
            let mut m = PlayerMetrics::new();
            m.record_tick(240, &TickOutcome::failed(component));
            assert_eq!(m.failure_reason, Some(component));
            assert_eq!(m.failed_at_rps, Some(240));
        }
    }
}
