// Seeded Sweep: random valid architecture pairs checked for engine properties
// ChaCha8Rng drives sampling only; every match itself is seedless

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use duel_engine::*;
use duel_engine::threshold::MAX_INSTANCES;
use duel_engine::validation::MIN_INSTANCES;

use crate::report::*;

use std::time::Instant;

/// Draw an architecture that passes validation.
pub fn sample_architecture(rng: &mut ChaCha8Rng) -> Architecture {
    let kind = if rng.gen_bool(0.5) { ComputeType::Stateless } else { ComputeType::Stateful };
    let autoscale = kind == ComputeType::Stateless && rng.gen_bool(0.5);
    let db = if rng.gen_bool(0.5) { DatabaseType::Single } else { DatabaseType::Replicated };
    let consistency = if db == DatabaseType::Replicated && rng.gen_bool(0.5) {
        Consistency::Eventual
    } else {
        Consistency::Strong
    };
    let strategy = match rng.gen_range(0..3) {
        0 => CacheStrategy::Off,
        1 => CacheStrategy::ReadThrough,
        _ => CacheStrategy::WriteThrough,
    };
    let load_balancer = if rng.gen_bool(0.5) {
        LoadBalancer::RoundRobin
    } else {
        LoadBalancer::LeastConnections
    };

    Architecture {
        load_balancer,
        compute: Compute {
            kind,
            instances: rng.gen_range(MIN_INSTANCES..=MAX_INSTANCES),
            autoscale,
        },
        database: Database { kind: db, consistency },
        cache: Cache { strategy },
    }
}

fn mirrored(winner: Winner) -> Winner {
    match winner {
        Winner::A => Winner::B,
        Winner::B => Winner::A,
        Winner::Draw => Winner::Draw,
    }
}

/// Run `runs` random duels on `profile`, checking determinism, reflexivity,
/// and seat symmetry for each.
pub fn run_sweep(runs: usize, seed: u64, profile: &TrafficProfile) -> SweepReport {
    let start = Instant::now();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut wins_a = 0;
    let mut wins_b = 0;
    let mut draws = 0;
    let mut determinism_violations = 0;
    let mut reflexivity_violations = 0;
    let mut symmetry_violations = 0;
    let mut failures = FailureCounts::default();
    let mut totals = Vec::with_capacity(runs * 2);
    let mut survived = Vec::with_capacity(runs * 2);

    for run in 0..runs {
        let a = sample_architecture(&mut rng);
        let b = sample_architecture(&mut rng);

        let first = run_match_simulation(&a, &b, profile);
        let second = run_match_simulation(&a, &b, profile);
        if first != second {
            tracing::error!(run, ?a, ?b, "repeated match produced a different result");
            determinism_violations += 1;
        }

        let mirror = run_match_simulation(&a, &a, profile);
        if mirror.winner != Winner::Draw {
            tracing::error!(run, ?a, "architecture did not draw against itself");
            reflexivity_violations += 1;
        }

        let swapped = run_match_simulation(&b, &a, profile);
        if swapped.winner != mirrored(first.winner) {
            tracing::warn!(run, ?a, ?b, "swapping seats changed the outcome");
            symmetry_violations += 1;
        }

        match first.winner {
            Winner::A => wins_a += 1,
            Winner::B => wins_b += 1,
            Winner::Draw => draws += 1,
        }
        for player in [&first.player_a, &first.player_b] {
            failures.record(player.metrics.failure_reason);
            totals.push(player.score.total as f64);
            survived.push(f64::from(player.metrics.survived_ticks));
        }
    }

    SweepReport {
        runs,
        seed,
        wins_a,
        wins_b,
        draws,
        determinism_violations,
        reflexivity_violations,
        symmetry_violations,
        failures,
        total_score: Stats::from_samples(&totals),
        survived_ticks: Stats::from_samples(&survived),
        elapsed_ms: start.elapsed().as_millis(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_engine::validation::validate_architecture;

    #[test]
    fn test_samples_are_valid() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let arch = sample_architecture(&mut rng);
            assert_eq!(validate_architecture(&arch), Ok(()));
        }
    }

    #[test]
    fn test_sweep_is_seed_stable() {
        let profile = TrafficProfile::default();
        let a = run_sweep(40, 3, &profile);
        let b = run_sweep(40, 3, &profile);

        assert!(a.holds());
        assert_eq!(a.wins_a, b.wins_a);
        assert_eq!(a.wins_b, b.wins_b);
        assert_eq!(a.draws, b.draws);
        assert_eq!(a.wins_a + a.wins_b + a.draws, 40);
    }
}
