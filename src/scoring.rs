// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Architecture Duel Arena - Scoring Engine

//! Scoring engine: turns a player's metrics and design into an integer score.
//!
//! Fractional multipliers go through `Decimal` so equal inputs always floor to
//! the same total on every target.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::metrics::PlayerMetrics;
use crate::types::Architecture;

const POINTS_PER_TICK: i64 = 10;
const DEGRADED_TICK_PENALTY: Decimal = dec!(5);
const EARLY_PAIN_MULTIPLIER: Decimal = dec!(1.5);
const EARLY_PAIN_BELOW_RPS: u32 = 200;
const FREE_INSTANCES: u32 = 5;
const EXTRA_INSTANCE_PENALTY: i64 = 10;
const AUTOSCALE_PENALTY: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub total: i64,
    pub survival_score: i64,
    pub degradation_penalty: i64,
    pub inefficiency_penalty: i64,
}

pub fn compute_score(metrics: &PlayerMetrics, arch: &Architecture) -> ScoreBreakdown {
    let survival_score = survival_score(metrics);
    let degradation_penalty = degradation_penalty(metrics);
    let inefficiency_penalty = inefficiency_penalty(arch);

    ScoreBreakdown {
        total: survival_score - degradation_penalty - inefficiency_penalty,
        survival_score,
        degradation_penalty,
        inefficiency_penalty,
    }
}

fn survival_score(metrics: &PlayerMetrics) -> i64 {
    i64::from(metrics.survived_ticks) * POINTS_PER_TICK
}

/// Zero unless a first-degraded rate was recorded.
fn degradation_penalty(metrics: &PlayerMetrics) -> i64 {
    let Some(first_degraded) = metrics.first_degraded_at_rps else {
        return 0;
    };

    let multiplier = if first_degraded < EARLY_PAIN_BELOW_RPS {
        EARLY_PAIN_MULTIPLIER
    } else {
        Decimal::ONE
    };

    let penalty = Decimal::from(metrics.degraded_ticks) * DEGRADED_TICK_PENALTY * multiplier;
    // u32 ticks × 7.5 always fits in i64
    penalty.floor().to_i64().unwrap_or(i64::MAX)
}

fn inefficiency_penalty(arch: &Architecture) -> i64 {
    let mut penalty = 0;

    if arch.compute.instances > FREE_INSTANCES {
        penalty += i64::from(arch.compute.instances - FREE_INSTANCES) * EXTRA_INSTANCE_PENALTY;
    }
    if arch.compute.autoscale {
        penalty += AUTOSCALE_PENALTY;
    }

    penalty
}
