// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Architecture Duel Arena - Tick Simulator
//
// Coarse capacity model: each tier carries a load (rate / capacity). Load past
// the healthy band adds latency, load past the degraded band adds errors, and
// load past the failure band takes the player down.

use crate::capacity::{cache_hit_rate, compute_capacity, database_capacity};
use crate::threshold::*;
use crate::types::{Architecture, FailureComponent, TickOutcome};

/// Per-tier load for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierLoad {
    pub compute: f64,
    pub database: f64,
}

impl TierLoad {
    pub fn measure(rps: u32, arch: &Architecture, instances: u32) -> Self {
        let rate = f64::from(rps);
        let compute_cap = compute_capacity(instances, arch.compute.kind);
        let db_cap = database_capacity(arch.database.kind, arch.database.consistency);
        let hit_rate = cache_hit_rate(arch.cache.strategy);

        Self {
            compute: rate / compute_cap,
            database: rate * (1.0 - hit_rate) / db_cap,
        }
    }

    /// The overloaded component, if either tier is past its failure band.
    ///
    /// When both overload ratios are equal, compute is blamed.
    pub fn failure(&self) -> Option<FailureComponent> {
        let compute_over = self.compute / COMPUTE_FAILURE_LOAD;
        let db_over = self.database / DB_FAILURE_LOAD;

        if compute_over.max(db_over) <= 1.0 {
            return None;
        }
        if db_over > compute_over {
            Some(FailureComponent::Database)
        } else {
            Some(FailureComponent::Compute)
        }
    }
}

/// Evaluate `arch` running `instances` compute instances at `rps`.
pub fn simulate_tick(rps: u32, arch: &Architecture, instances: u32) -> TickOutcome {
    let load = TierLoad::measure(rps, arch, instances);

    if let Some(component) = load.failure() {
        return TickOutcome::failed(component);
    }

    let latency_ms = BASE_LATENCY_MS
        + (load.compute - HEALTHY_LOAD).max(0.0) * COMPUTE_LATENCY_WEIGHT_MS
        + (load.database - HEALTHY_LOAD).max(0.0) * DB_LATENCY_WEIGHT_MS;

    let error_rate = (load.compute - DEGRADED_LOAD).max(0.0) * COMPUTE_ERROR_WEIGHT
        + (load.database - DEGRADED_LOAD).max(0.0) * DB_ERROR_WEIGHT;

    TickOutcome::serving(latency_ms, error_rate)
}
