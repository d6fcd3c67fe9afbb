// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Architecture Duel Arena - Capacity Model

use crate::threshold::*;
use crate::types::{CacheStrategy, ComputeType, Consistency, DatabaseType};

/// Requests per second the compute tier absorbs at load 1.0.
pub fn compute_capacity(instances: u32, kind: ComputeType) -> f64 {
    let multiplier = match kind {
        ComputeType::Stateless => STATELESS_MULTIPLIER,
        ComputeType::Stateful => STATEFUL_MULTIPLIER,
    };
    f64::from(instances) * BASE_CAPACITY_PER_INSTANCE * multiplier
}

/// Requests per second the database absorbs at load 1.0.
pub fn database_capacity(kind: DatabaseType, consistency: Consistency) -> f64 {
    match (kind, consistency) {
        (DatabaseType::Single, _) => DB_CAPACITY_SINGLE,
        (DatabaseType::Replicated, Consistency::Strong) => DB_CAPACITY_REPLICATED_STRONG,
        (DatabaseType::Replicated, Consistency::Eventual) => DB_CAPACITY_REPLICATED_EVENTUAL,
    }
}

/// Fraction of requests served without touching the database.
pub fn cache_hit_rate(strategy: CacheStrategy) -> f64 {
    match strategy {
        CacheStrategy::Off => 0.0,
        CacheStrategy::ReadThrough => CACHE_HIT_READ_THROUGH,
        CacheStrategy::WriteThrough => CACHE_HIT_WRITE_THROUGH,
    }
}
