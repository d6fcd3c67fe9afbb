// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Architecture Duel Arena - Autoscale Controller
//
// Reacts to the tick that just happened, so scaling always lags load by at
// least one tick and never rescues the tick that triggered it.

use crate::threshold::{AUTOSCALE_COOLDOWN_TICKS, MAX_INSTANCES};
use crate::types::{Architecture, RuntimeComputeState, TickOutcome};

/// Compute the runtime state for the next tick.
pub fn next_state(
    outcome: &TickOutcome,
    runtime: RuntimeComputeState,
    arch: &Architecture,
) -> RuntimeComputeState {
    if !arch.compute.autoscale {
        return runtime;
    }

    if runtime.scale_cooldown > 0 {
        return RuntimeComputeState {
            scale_cooldown: runtime.scale_cooldown - 1,
            ..runtime
        };
    }

    if outcome.ok() && outcome.degraded() && runtime.instances < MAX_INSTANCES {
        return RuntimeComputeState {
            instances: runtime.instances + 1,
            scale_cooldown: AUTOSCALE_COOLDOWN_TICKS,
        };
    }

    runtime
}
