// Benchmark Report Types
// Structured JSON output for scenario results, the seeded sweep, and job replay

use serde::Serialize;

use duel_engine::{FailureComponent, TrafficProfile, Winner};

// ─── Statistics (per-metric sweep aggregation) ──────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        Self {
            mean,
            std_dev: variance.sqrt(),
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }
}

// ─── Scenario Result ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct PlayerSummary {
    pub score: i64,
    pub survived_ticks: u32,
    pub degraded_ticks: u32,
    pub failed_at_rps: Option<u32>,
    pub failure_reason: Option<FailureComponent>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub label: String,
    pub category: String,
    pub profile: TrafficProfile,
    pub winner: Winner,
    pub expected: Option<Winner>,
    pub pass: bool,
    pub player_a: PlayerSummary,
    pub player_b: PlayerSummary,
    pub elapsed_us: u128,
}

// ─── Sweep Result ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize)]
pub struct FailureCounts {
    pub compute: usize,
    pub database: usize,
    pub survived: usize,
}

impl FailureCounts {
    pub fn record(&mut self, reason: Option<FailureComponent>) {
        match reason {
            Some(FailureComponent::Compute) => self.compute += 1,
            Some(FailureComponent::Database) => self.database += 1,
            None => self.survived += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub runs: usize,
    pub seed: u64,
    pub wins_a: usize,
    pub wins_b: usize,
    pub draws: usize,
    pub determinism_violations: usize,
    pub reflexivity_violations: usize,
    pub symmetry_violations: usize,
    pub failures: FailureCounts,
    pub total_score: Stats,
    pub survived_ticks: Stats,
    pub elapsed_ms: u128,
}

impl SweepReport {
    pub fn holds(&self) -> bool {
        self.determinism_violations == 0
            && self.reflexivity_violations == 0
            && self.symmetry_violations == 0
    }
}

// ─── Job Replay Result ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplayReport {
    pub matches: usize,
    pub finished: usize,
    pub redeliveries_skipped: usize,
    pub errors: Vec<String>,
}

impl ReplayReport {
    pub fn holds(&self) -> bool {
        self.errors.is_empty()
            && self.finished == self.matches
            && self.redeliveries_skipped == self.matches
    }
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub profile: TrafficProfile,
    pub summary: Summary,
    pub scenarios: Vec<ScenarioReport>,
    pub sweep: SweepReport,
    pub replay: ReplayReport,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub sweep_holds: bool,
    pub replay_holds: bool,
}
