// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Architecture Duel Arena - Post-Mortem Analyzer
//
// Diagnostic report derived from a player's architecture and final metrics.
// Rules are independent checks evaluated in a fixed order.

use serde::{Deserialize, Serialize};

use crate::metrics::PlayerMetrics;
use crate::types::{Architecture, CacheStrategy, ComputeType, Consistency, FailureComponent};

pub const RECOMMEND_STATELESS: &str = "Move toward stateless compute to enable horizontal scaling";
pub const RECOMMEND_CACHE: &str = "Introduce a cache to reduce database load";
pub const RECOMMEND_EVENTUAL: &str = "Consider eventual consistency to improve write throughput";
pub const RECOMMEND_AUTOSCALE: &str = "Enable autoscaling to handle sustained traffic growth";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bottleneck {
    pub component: FailureComponent,
    pub reason: String,
    pub first_seen_at_rps: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMortemTimeline {
    pub first_degraded_at_rps: Option<u32>,
    pub failed_at_rps: Option<u32>,
    pub survived_ticks: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetrics {
    pub max_latency_ms: f64,
    pub max_error_rate: f64,
    pub degraded_ticks: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMortem {
    pub summary: String,
    pub timeline: PostMortemTimeline,
    pub bottlenecks: Vec<Bottleneck>,
    pub key_metrics: KeyMetrics,
    pub recommendations: Vec<String>,
}

/// Build the post-mortem for one player.
pub fn analyze(arch: &Architecture, metrics: &PlayerMetrics) -> PostMortem {
    let summary = match metrics.failure_reason {
        Some(component) => format!(
            "System failed due to {}",
            component.reason().to_lowercase()
        ),
        None => "System survived the entire traffic profile".to_string(),
    };

    PostMortem {
        summary,
        timeline: PostMortemTimeline {
            first_degraded_at_rps: metrics.first_degraded_at_rps,
            failed_at_rps: metrics.failed_at_rps,
            survived_ticks: metrics.survived_ticks,
        },
        bottlenecks: bottlenecks(metrics),
        key_metrics: KeyMetrics {
            max_latency_ms: metrics.max_latency_ms,
            max_error_rate: metrics.max_error_rate,
            degraded_ticks: metrics.degraded_ticks,
        },
        recommendations: recommendations(arch, metrics.failure_reason),
    }
}

fn bottlenecks(metrics: &PlayerMetrics) -> Vec<Bottleneck> {
    let Some(component) = metrics.failure_reason else {
        return Vec::new();
    };

    let reason = match component {
        FailureComponent::Compute => "Compute capacity could not keep up with incoming load",
        FailureComponent::Database => "Database throughput became the limiting factor",
    };

    vec![Bottleneck {
        component,
        reason: reason.to_string(),
        first_seen_at_rps: metrics.first_degraded_at_rps.unwrap_or(0),
    }]
}

/// Recommendations for a failed run. A surviving run gets none.
fn recommendations(arch: &Architecture, failure: Option<FailureComponent>) -> Vec<String> {
    let Some(component) = failure else {
        return Vec::new();
    };

    let compute_failed = component == FailureComponent::Compute;
    let database_failed = component == FailureComponent::Database;

    let rules = [
        (
            compute_failed && arch.compute.kind == ComputeType::Stateful,
            RECOMMEND_STATELESS,
        ),
        (
            database_failed && arch.cache.strategy == CacheStrategy::Off,
            RECOMMEND_CACHE,
        ),
        (
            database_failed && arch.database.consistency == Consistency::Strong,
            RECOMMEND_EVENTUAL,
        ),
        (!arch.compute.autoscale, RECOMMEND_AUTOSCALE),
    ];

    rules
        .into_iter()
        .filter(|(fires, _)| *fires)
        .map(|(_, text)| text.to_string())
        .collect()
}
