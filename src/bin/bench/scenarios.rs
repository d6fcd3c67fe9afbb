// Scenario Definitions: named duels with known outcomes
// Each scenario pairs two architectures; profile None means the CLI profile

use duel_engine::*;

// ─── Scenario Configuration ─────────────────────────────────────────────────

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub player_a: Architecture,
    pub player_b: Architecture,
    pub profile: Option<TrafficProfile>,
    /// Winner the scenario must produce. None runs it report-only.
    pub expect: Option<Winner>,
}

// ─── Architecture Builders ──────────────────────────────────────────────────

fn arch(
    kind: ComputeType,
    instances: u32,
    autoscale: bool,
    db: DatabaseType,
    consistency: Consistency,
    cache: CacheStrategy,
) -> Architecture {
    Architecture {
        load_balancer: LoadBalancer::RoundRobin,
        compute: Compute { kind, instances, autoscale },
        database: Database { kind: db, consistency },
        cache: Cache { strategy: cache },
    }
}

fn stateless_fleet() -> Architecture {
    arch(ComputeType::Stateless, 4, false,
        DatabaseType::Replicated, Consistency::Eventual, CacheStrategy::ReadThrough)
}

fn legacy_monolith() -> Architecture {
    arch(ComputeType::Stateful, 2, false,
        DatabaseType::Single, Consistency::Strong, CacheStrategy::Off)
}

fn brute_force() -> Architecture {
    arch(ComputeType::Stateless, 8, false,
        DatabaseType::Single, Consistency::Strong, CacheStrategy::Off)
}

fn lean_autoscaler(instances: u32, cache: CacheStrategy) -> Architecture {
    arch(ComputeType::Stateless, instances, true,
        DatabaseType::Replicated, Consistency::Eventual, cache)
}

fn cached(strategy: CacheStrategy) -> Architecture {
    arch(ComputeType::Stateless, 5, false,
        DatabaseType::Replicated, Consistency::Strong, strategy)
}

const SINGLE_SPIKE: TrafficProfile = TrafficProfile {
    warmup_rps: 10,
    ramp_to_rps: 10,
    spike_rps: 118,
    sustain_rps: 118,
};

// ─── Roster ─────────────────────────────────────────────────────────────────

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario { name: "STATELESS_VS_LEGACY", label: "Stateless Fleet vs Legacy", category: "duel",
            player_a: stateless_fleet(), player_b: legacy_monolith(),
            profile: None, expect: Some(Winner::A) },
        Scenario { name: "BRUTE_VS_EFFICIENT", label: "Brute Force vs Efficient", category: "duel",
            player_a: brute_force(), player_b: lean_autoscaler(3, CacheStrategy::ReadThrough),
            profile: None, expect: Some(Winner::B) },
        Scenario { name: "CACHE_VS_NO_CACHE", label: "Write-Through vs No Cache", category: "duel",
            player_a: cached(CacheStrategy::WriteThrough), player_b: cached(CacheStrategy::Off),
            profile: None, expect: Some(Winner::A) },
        Scenario { name: "MIRROR_MATCH", label: "Mirror Match", category: "solo",
            player_a: Architecture::house(), player_b: Architecture::house(),
            profile: None, expect: Some(Winner::Draw) },
        Scenario { name: "LEGACY_VS_HOUSE", label: "Legacy vs House", category: "solo",
            player_a: legacy_monolith(), player_b: Architecture::house(),
            profile: None, expect: None },
        Scenario { name: "AUTOSCALE_RECOVERY", label: "Autoscale Recovery", category: "autoscale",
            player_a: lean_autoscaler(1, CacheStrategy::WriteThrough),
            player_b: arch(ComputeType::Stateless, 1, false,
                DatabaseType::Replicated, Consistency::Eventual, CacheStrategy::WriteThrough),
            profile: Some(SINGLE_SPIKE), expect: Some(Winner::A) },
    ]
}

/// Keep scenarios whose name, label, or category contains `filter`.
pub fn select<'a>(all: &'a [Scenario], filter: Option<&str>) -> Vec<&'a Scenario> {
    match filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all.iter()
                .filter(|s| s.name.to_lowercase().contains(&f_lower)
                          || s.label.to_lowercase().contains(&f_lower)
                          || s.category.to_lowercase().contains(&f_lower))
                .collect()
        }
        None => all.iter().collect(),
    }
}
