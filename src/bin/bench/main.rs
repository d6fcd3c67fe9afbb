// Duel Benchmark Runner: scenario roster, seeded property sweep, job replay
// ChaCha8Rng architecture sampling, per-scenario expectations, JSON report
//
// Usage:
//   cargo run --release --bin bench                                # Everything, 200 sweep runs
//   cargo run --release --bin bench -- --runs 20                   # Quick sweep
//   cargo run --release --bin bench -- duel                        # Filter scenarios
//   cargo run --release --bin bench -- --profile 50,300,600,350    # Custom traffic
//   cargo run --release --bin bench -- --json bench.json           # Write JSON report

mod replay;
mod report;
mod scenarios;
mod sweep;

use clap::Parser;
use duel_engine::validation::validate_profile;
use duel_engine::*;
use report::*;
use scenarios::*;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ─── CLI ────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "bench")]
#[command(about = "Run architecture duel scenarios and a seeded property sweep", long_about = None)]
struct Args {
    /// Random architecture pairs in the sweep
    #[arg(long, default_value = "200")]
    runs: usize,

    /// Base seed for architecture sampling
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Traffic profile as warmup,ramp,spike,sustain (rps)
    #[arg(long, value_parser = parse_profile)]
    profile: Option<TrafficProfile>,

    /// Write the full report to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Only run scenarios whose name, label, or category contains this
    filter: Option<String>,
}

fn parse_profile(s: &str) -> Result<TrafficProfile, String> {
    let rates = s
        .split(',')
        .map(|part| part.trim().parse::<u32>().map_err(|e| format!("`{part}`: {e}")))
        .collect::<Result<Vec<_>, _>>()?;

    let &[warmup_rps, ramp_to_rps, spike_rps, sustain_rps] = rates.as_slice() else {
        return Err(format!("expected 4 comma-separated rates, got {}", rates.len()));
    };
    let profile = TrafficProfile { warmup_rps, ramp_to_rps, spike_rps, sustain_rps };
    validate_profile(&profile).map_err(|e| e.to_string())?;
    Ok(profile)
}

fn summarize(player: &PlayerResult) -> PlayerSummary {
    PlayerSummary {
        score: player.score.total,
        survived_ticks: player.metrics.survived_ticks,
        degraded_ticks: player.metrics.degraded_ticks,
        failed_at_rps: player.metrics.failed_at_rps,
        failure_reason: player.metrics.failure_reason,
        recommendations: player.post_mortem.recommendations.clone(),
    }
}

fn failure_cell(player: &PlayerSummary) -> String {
    match (player.failed_at_rps, player.failure_reason) {
        (Some(rps), Some(reason)) => format!("{rps}/{}", reason.reason()),
        _ => "-".to_string(),
    }
}

fn run_scenario(scenario: &Scenario, default_profile: &TrafficProfile) -> ScenarioReport {
    let profile = scenario.profile.unwrap_or(*default_profile);
    // expectations assume the reference profile unless the scenario pins its own
    let expected = if scenario.profile.is_some() || profile == TrafficProfile::default() {
        scenario.expect
    } else {
        None
    };
    let start = Instant::now();
    let result = run_match_simulation(&scenario.player_a, &scenario.player_b, &profile);
    let elapsed_us = start.elapsed().as_micros();

    ScenarioReport {
        name: scenario.name.to_string(),
        label: scenario.label.to_string(),
        category: scenario.category.to_string(),
        profile,
        winner: result.winner,
        expected,
        pass: expected.map_or(true, |w| w == result.winner),
        player_a: summarize(&result.player_a),
        player_b: summarize(&result.player_b),
        elapsed_us,
    }
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let profile = args.profile.unwrap_or_default();
    let all_scenarios = scenarios();
    let to_run = select(&all_scenarios, args.filter.as_deref());

    if to_run.is_empty() {
        eprintln!("No scenarios match filter: {:?}", args.filter);
        return ExitCode::FAILURE;
    }

    println!("\n  Duel Benchmark Runner v0.2.0");
    println!("  Profile: {:?}", profile);
    println!("  PRNG: ChaCha8Rng | Sweep runs: {} | Base seed: {}", args.runs, args.seed);
    println!("  Running {} scenario(s)...\n", to_run.len());
    println!("  {:<30} {:>6} {:>6} {:>6}  {:<24} {:<24}",
        "Scenario", "Winner", "A", "B", "A failed", "B failed");
    println!("  {}", "-".repeat(100));

    let mut scenario_reports = Vec::new();
    for scenario in &to_run {
        let report = run_scenario(scenario, &profile);
        let status = match (report.pass, report.expected) {
            (true, Some(_)) => "PASS",
            (true, None) => "INFO",
            (false, _) => "FAIL",
        };
        println!("  {:<30} {:>6} {:>6} {:>6}  {:<24} {:<24} {}",
            report.label,
            format!("{:?}", report.winner),
            report.player_a.score,
            report.player_b.score,
            failure_cell(&report.player_a),
            failure_cell(&report.player_b),
            status,
        );
        scenario_reports.push(report);
    }

    // ─── Sweep ──────────────────────────────────────────────────────────

    let sweep = sweep::run_sweep(args.runs, args.seed, &profile);
    println!("  {}", "-".repeat(100));
    println!("  Sweep: A {} / B {} / draw {}  ({} ms)",
        sweep.wins_a, sweep.wins_b, sweep.draws, sweep.elapsed_ms);
    println!("    Score:     mean {:.1} ± {:.1}  [{:.0}, {:.0}]",
        sweep.total_score.mean, sweep.total_score.std_dev, sweep.total_score.min, sweep.total_score.max);
    println!("    Failures:  compute {}  database {}  survived {}",
        sweep.failures.compute, sweep.failures.database, sweep.failures.survived);
    println!("    Deterministic: {}  Reflexive: {}  Symmetric: {}",
        pass_fail(sweep.determinism_violations == 0),
        pass_fail(sweep.reflexivity_violations == 0),
        pass_fail(sweep.symmetry_violations == 0));

    // ─── Job Replay ─────────────────────────────────────────────────────

    let replay = replay::replay(&to_run, &profile);
    println!("  Job replay: {}/{} finished, {} redeliveries skipped  {}",
        replay.finished, replay.matches, replay.redeliveries_skipped, pass_fail(replay.holds()));
    for error in &replay.errors {
        println!("    {error}");
    }

    // ─── Summary ────────────────────────────────────────────────────────

    let total = scenario_reports.len();
    let passed = scenario_reports.iter().filter(|r| r.pass).count();
    let failed = total - passed;
    let summary = Summary {
        total,
        passed,
        failed,
        sweep_holds: sweep.holds(),
        replay_holds: replay.holds(),
    };
    println!("\n  Total: {}  Passed: {}  Failed: {}\n", total, passed, failed);

    let ok = failed == 0 && summary.sweep_holds && summary.replay_holds;

    if let Some(path) = &args.json {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let report = BenchReport {
            timestamp: ts.to_string(),
            version: env!("CARGO_PKG_VERSION"),
            prng: "ChaCha8Rng",
            profile,
            summary,
            scenarios: scenario_reports,
            sweep,
            replay,
        };
        if let Err(e) = write_report(path, &report) {
            eprintln!("  Failed to write {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
        println!("  Results saved to: {}\n", path.display());
    }

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn pass_fail(ok: bool) -> &'static str {
    if ok { "PASS" } else { "FAIL" }
}

fn write_report(path: &std::path::Path, report: &BenchReport) -> std::io::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
}
