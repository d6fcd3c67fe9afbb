// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Architecture Duel Arena - Persistence
//
// Capabilities the job processor is built with:
//
// - MatchStore: load a match, compare-and-set its lifecycle state
// - ResultStore: write-once, idempotent-by-value result persistence
//
// In-memory implementations back tests, the bench, and single-process use.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{LifecycleError, StoreError};
pub use memory::{InMemoryMatchStore, InMemoryResultStore};
pub use traits::{MatchStore, ResultStore, SaveOutcome};
