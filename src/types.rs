// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Architecture Duel Arena - Type Definitions

use serde::{Deserialize, Serialize};

use crate::threshold::{MAX_ACCEPTABLE_ERROR_RATE, MAX_ACCEPTABLE_LATENCY_MS};

// ─── Load Balancer ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LoadBalancer {
    RoundRobin,
    LeastConnections,
}

// ─── Compute ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ComputeType {
    Stateless,
    Stateful,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Compute {
    #[serde(rename = "type")]
    pub kind: ComputeType,
    pub instances: u32,
    pub autoscale: bool,
}

// ─── Database ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseType {
    Single,
    Replicated,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Consistency {
    Strong,
    Eventual,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Database {
    #[serde(rename = "type")]
    pub kind: DatabaseType,
    pub consistency: Consistency,
}

// ─── Cache ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CacheStrategy {
    Off,
    ReadThrough,
    WriteThrough,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Cache {
    pub strategy: CacheStrategy,
}

// ─── Architecture ───────────────────────────────────────────────────────────

/// A player's submitted system design. Immutable once the match is locked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Architecture {
    pub load_balancer: LoadBalancer,
    pub compute: Compute,
    pub database: Database,
    pub cache: Cache,
}

impl Architecture {
    /// Reference design that solo players are measured against.
    pub fn house() -> Self {
        Self {
            load_balancer: LoadBalancer::RoundRobin,
            compute: Compute {
                kind: ComputeType::Stateless,
                instances: 3,
                autoscale: true,
            },
            database: Database {
                kind: DatabaseType::Replicated,
                consistency: Consistency::Eventual,
            },
            cache: Cache {
                strategy: CacheStrategy::ReadThrough,
            },
        }
    }
}

// ─── Traffic Profile ────────────────────────────────────────────────────────

/// Request-rate envelope shared by both players of a match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct TrafficProfile {
    pub warmup_rps: u32,
    pub ramp_to_rps: u32,
    pub spike_rps: u32,
    pub sustain_rps: u32,
}

impl Default for TrafficProfile {
    fn default() -> Self {
        Self {
            warmup_rps: 50,
            ramp_to_rps: 200,
            spike_rps: 400,
            sustain_rps: 250,
        }
    }
}

// ─── Runtime Compute State ──────────────────────────────────────────────────

/// Per-player mutable compute state, owned by a single simulation run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeComputeState {
    pub instances: u32,
    pub scale_cooldown: u32,
}

impl RuntimeComputeState {
    pub fn initial(arch: &Architecture) -> Self {
        Self {
            instances: arch.compute.instances,
            scale_cooldown: 0,
        }
    }
}

// ─── Failure Component ──────────────────────────────────────────────────────

/// The component whose overload ended a player's run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FailureComponent {
    Compute,
    Database,
}

impl FailureComponent {
    /// Human-readable failure reason.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Compute => "Compute saturated",
            Self::Database => "Database overloaded",
        }
    }
}

// ─── TickOutcome ────────────────────────────────────────────────────────────

/// Result of evaluating one architecture at one request rate.
///
/// Built only through [`TickOutcome::serving`] and [`TickOutcome::failed`], so
/// a tick that is not ok always names the component that failed.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TickOutcome {
    ok: bool,
    degraded: bool,
    latency_ms: f64,
    error_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure_reason: Option<FailureComponent>,
}

impl TickOutcome {
    /// A tick the system survived. Degraded when either user-facing limit is
    /// exceeded.
    pub fn serving(latency_ms: f64, error_rate: f64) -> Self {
        Self {
            ok: true,
            degraded: latency_ms > MAX_ACCEPTABLE_LATENCY_MS
                || error_rate > MAX_ACCEPTABLE_ERROR_RATE,
            latency_ms,
            error_rate,
            failure_reason: None,
        }
    }

    pub fn failed(component: FailureComponent) -> Self {
        Self {
            ok: false,
            degraded: true,
            latency_ms: f64::INFINITY,
            error_rate: 1.0,
            failure_reason: Some(component),
        }
    }

    /// System is still serving. `false` is terminal for the player.
    pub fn ok(&self) -> bool {
        self.ok
    }

    /// User-visible pain. Always true for a failed tick.
    pub fn degraded(&self) -> bool {
        self.degraded
    }

    pub fn latency_ms(&self) -> f64 {
        self.latency_ms
    }

    pub fn error_rate(&self) -> f64 {
        self.error_rate
    }

    /// The component that failed, present exactly when the tick is not ok.
    pub fn failure_reason(&self) -> Option<FailureComponent> {
        self.failure_reason
    }
}
