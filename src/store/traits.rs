// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Architecture Duel Arena - Store Traits

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::lifecycle::{Match, MatchId, MatchState};
use crate::simulation::MatchResult;
use crate::store::error::StoreError;

/// Outcome of an idempotent result write.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SaveOutcome {
    /// First write for this match.
    Written,
    /// An equal result was already stored. Nothing changed.
    AlreadyWritten,
    /// A different result is stored. Nothing changed.
    Conflict,
}

pub trait MatchStore {
    fn load(&self, id: &MatchId) -> Result<Option<Match>, StoreError>;

    /// Move `id` from `from` to `to` only if it is currently in `from`.
    ///
    /// Returns `Ok(false)`, not an error, when the match is absent, is in
    /// another state, or `from → to` is not a lifecycle edge.
    fn try_transition(
        &self,
        id: &MatchId,
        from: MatchState,
        to: MatchState,
    ) -> Result<bool, StoreError>;
}

pub trait ResultStore {
    /// Store `result` unless one already exists. An existing record is
    /// compared by value and never overwritten.
    fn save(&self, id: &MatchId, result: &MatchResult) -> Result<SaveOutcome, StoreError>;

    fn load(&self, id: &MatchId) -> Result<Option<MatchResult>, StoreError>;
}

impl<T: MatchStore + ?Sized> MatchStore for &T {
    fn load(&self, id: &MatchId) -> Result<Option<Match>, StoreError> {
        (**self).load(id)
    }

    fn try_transition(
        &self,
        id: &MatchId,
        from: MatchState,
        to: MatchState,
    ) -> Result<bool, StoreError> {
        (**self).try_transition(id, from, to)
    }
}

impl<T: MatchStore + ?Sized> MatchStore for Arc<T> {
    fn load(&self, id: &MatchId) -> Result<Option<Match>, StoreError> {
        (**self).load(id)
    }

    fn try_transition(
        &self,
        id: &MatchId,
        from: MatchState,
        to: MatchState,
    ) -> Result<bool, StoreError> {
        (**self).try_transition(id, from, to)
    }
}

impl<T: ResultStore + ?Sized> ResultStore for &T {
    fn save(&self, id: &MatchId, result: &MatchResult) -> Result<SaveOutcome, StoreError> {
        (**self).save(id, result)
    }

    fn load(&self, id: &MatchId) -> Result<Option<MatchResult>, StoreError> {
        (**self).load(id)
    }
}

impl<T: ResultStore + ?Sized> ResultStore for Arc<T> {
    fn save(&self, id: &MatchId, result: &MatchResult) -> Result<SaveOutcome, StoreError> {
        (**self).save(id, result)
    }

    fn load(&self, id: &MatchId) -> Result<Option<MatchResult>, StoreError> {
        (**self).load(id)
    }
}
