// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Architecture Duel Arena - Load Thresholds & Tuning Constants

// ─── Capacity ───────────────────────────────────────────────────────────────

/// Requests per second one stateless instance absorbs at load 1.0.
pub const BASE_CAPACITY_PER_INSTANCE: f64 = 100.0;

pub const STATELESS_MULTIPLIER: f64 = 1.0;
pub const STATEFUL_MULTIPLIER: f64 = 0.6;

pub const DB_CAPACITY_SINGLE: f64 = 200.0;
pub const DB_CAPACITY_REPLICATED_STRONG: f64 = 300.0;
pub const DB_CAPACITY_REPLICATED_EVENTUAL: f64 = 450.0;

pub const CACHE_HIT_READ_THROUGH: f64 = 0.4;
pub const CACHE_HIT_WRITE_THROUGH: f64 = 0.75;

// ─── Load bands ─────────────────────────────────────────────────────────────

/// Below this load a component adds no latency.
pub const HEALTHY_LOAD: f64 = 0.7;
/// Above this load a component starts dropping requests.
pub const DEGRADED_LOAD: f64 = 1.0;

pub const COMPUTE_FAILURE_LOAD: f64 = 1.2;
pub const DB_FAILURE_LOAD: f64 = 1.2;

// ─── Latency / error model ──────────────────────────────────────────────────

pub const BASE_LATENCY_MS: f64 = 30.0;
pub const COMPUTE_LATENCY_WEIGHT_MS: f64 = 200.0;
pub const DB_LATENCY_WEIGHT_MS: f64 = 600.0;

pub const COMPUTE_ERROR_WEIGHT: f64 = 0.3;
pub const DB_ERROR_WEIGHT: f64 = 0.15;

pub const MAX_ACCEPTABLE_LATENCY_MS: f64 = 800.0;
pub const MAX_ACCEPTABLE_ERROR_RATE: f64 = 0.05;

// ─── Autoscaling ────────────────────────────────────────────────────────────

pub const AUTOSCALE_COOLDOWN_TICKS: u32 = 2;
pub const MAX_INSTANCES: u32 = 10;

// ─── Traffic timeline ───────────────────────────────────────────────────────

pub const WARMUP_STEP_RPS: u32 = 10;
pub const RAMP_STEP_RPS: u32 = 40;
pub const SUSTAIN_TICKS: usize = 10;

/// Highest rate a profile may request. Keeps every timeline under 300 ticks.
pub const MAX_RPS: u32 = 2_000;
