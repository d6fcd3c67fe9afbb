// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Architecture Duel Arena - Match Orchestrator

use serde::{Deserialize, Serialize};

use crate::autoscale;
use crate::metrics::PlayerMetrics;
use crate::postmortem::{self, PostMortem};
use crate::scoring::{self, ScoreBreakdown};
use crate::tick;
use crate::traffic;
use crate::types::{Architecture, RuntimeComputeState, TrafficProfile};

// ─── Result Types ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Winner {
    A,
    B,
    #[serde(rename = "DRAW")]
    Draw,
}

impl Winner {
    /// Strictly greater total wins. Equal totals draw.
    pub fn decide(total_a: i64, total_b: i64) -> Self {
        match total_a.cmp(&total_b) {
            std::cmp::Ordering::Greater => Self::A,
            std::cmp::Ordering::Less => Self::B,
            std::cmp::Ordering::Equal => Self::Draw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResult {
    #[serde(flatten)]
    pub metrics: PlayerMetrics,
    pub post_mortem: PostMortem,
    pub score: ScoreBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub winner: Winner,
    pub player_a: PlayerResult,
    pub player_b: PlayerResult,
}

// ─── Orchestration ──────────────────────────────────────────────────────────

/// Run one player's architecture over `timeline` until it fails or the
/// timeline ends. Runtime compute state is owned by this call alone.
pub fn simulate_player(arch: &Architecture, timeline: &[u32]) -> PlayerMetrics {
    let mut metrics = PlayerMetrics::new();
    let mut runtime = RuntimeComputeState::initial(arch);

    for &rps in timeline {
        if metrics.has_failed() {
            break;
        }
        let outcome = tick::simulate_tick(rps, arch, runtime.instances);
        metrics.record_tick(rps, &outcome);
        runtime = autoscale::next_state(&outcome, runtime, arch);
    }

    metrics
}

/// Score a finished run and attach its post-mortem.
pub fn finalize_player(arch: &Architecture, metrics: PlayerMetrics) -> PlayerResult {
    PlayerResult {
        post_mortem: postmortem::analyze(arch, &metrics),
        score: scoring::compute_score(&metrics, arch),
        metrics,
    }
}

/// Pit two architectures against the same traffic profile.
///
/// Pure and total: the same inputs always produce an equal result, and one
/// player's failure never cuts the other's run short.
pub fn run_match_simulation(
    player_a: &Architecture,
    player_b: &Architecture,
    profile: &TrafficProfile,
) -> MatchResult {
    let timeline = traffic::build_timeline(profile);

    let result_a = finalize_player(player_a, simulate_player(player_a, &timeline));
    let result_b = finalize_player(player_b, simulate_player(player_b, &timeline));

    MatchResult {
        winner: Winner::decide(result_a.score.total, result_b.score.total),
        player_a: result_a,
        player_b: result_b,
    }
}
