// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Architecture Duel Arena - In-Memory Stores

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};

use crate::lifecycle::{Match, MatchId, MatchMode, MatchState, Player};
use crate::simulation::MatchResult;
use crate::store::error::{LifecycleError, StoreError};
use crate::store::traits::{MatchStore, ResultStore, SaveOutcome};
use crate::types::{Architecture, TrafficProfile};
use crate::validation::{validate_architecture, validate_profile};

// ─── Matches ────────────────────────────────────────────────────────────────

/// Process-local match table. State changes go through a single write lock,
/// so compare-and-set is atomic across threads.
#[derive(Debug, Default)]
pub struct InMemoryMatchStore {
    matches: RwLock<HashMap<MatchId, Match>>,
    next_id: AtomicU64,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.matches.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.read().is_empty()
    }

    /// Insert or replace a match as-is.
    pub fn insert(&self, m: Match) {
        self.matches.write().insert(m.id.clone(), m);
    }

    pub fn state(&self, id: &MatchId) -> Option<MatchState> {
        self.matches.read().get(id).map(|m| m.state)
    }

    pub fn create(
        &self,
        mode: MatchMode,
        profile: TrafficProfile,
    ) -> Result<Match, LifecycleError> {
        validate_profile(&profile)?;

        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let m = Match::new(MatchId::new(format!("match-{n:06}")), mode, profile);
        self.insert(m.clone());

        tracing::info!(match_id = %m.id, ?mode, "match created");
        Ok(m)
    }

    /// Store `player`'s design. The first submission moves CREATED to DESIGNING.
    pub fn submit_architecture(
        &self,
        id: &MatchId,
        player: Player,
        arch: Architecture,
    ) -> Result<Match, LifecycleError> {
        validate_architecture(&arch)?;

        let mut matches = self.matches.write();
        let m = matches
            .get_mut(id)
            .ok_or_else(|| LifecycleError::NotFound(id.clone()))?;

        if !m.state.accepts_designs() {
            return Err(LifecycleError::InvalidState {
                id: id.clone(),
                state: m.state,
                action: "accept architectures",
            });
        }

        match player {
            Player::A => m.player_a = Some(arch),
            Player::B => m.player_b = Some(arch),
        }
        if m.state == MatchState::Created {
            m.state = MatchState::Designing;
        }

        tracing::debug!(match_id = %id, %player, "architecture submitted");
        Ok(m.clone())
    }

    /// Freeze the designs. Player A is always required; player B only in a duel.
    pub fn lock(&self, id: &MatchId) -> Result<Match, LifecycleError> {
        let mut matches = self.matches.write();
        let m = matches
            .get_mut(id)
            .ok_or_else(|| LifecycleError::NotFound(id.clone()))?;

        if !m.state.accepts_designs() {
            return Err(LifecycleError::InvalidState {
                id: id.clone(),
                state: m.state,
                action: "lock",
            });
        }
        m.contestants().map_err(LifecycleError::MissingArchitecture)?;

        m.state = MatchState::Locked;
        tracing::info!(match_id = %id, "match locked");
        Ok(m.clone())
    }
}

impl MatchStore for InMemoryMatchStore {
    fn load(&self, id: &MatchId) -> Result<Option<Match>, StoreError> {
        Ok(self.matches.read().get(id).cloned())
    }

    fn try_transition(
        &self,
        id: &MatchId,
        from: MatchState,
        to: MatchState,
    ) -> Result<bool, StoreError> {
        if !from.can_transition_to(to) {
            return Ok(false);
        }

        let mut matches = self.matches.write();
        match matches.get_mut(id) {
            Some(m) if m.state == from => {
                m.state = to;
                tracing::info!(match_id = %id, %from, %to, "state transition");
                Ok(true)
            }
            Some(m) => {
                tracing::debug!(match_id = %id, expected = %from, actual = %m.state, "transition skipped");
                Ok(false)
            }
            None => Ok(false),
        }
    }
}

// ─── Results ────────────────────────────────────────────────────────────────

/// Process-local result table holding each result's JSON encoding.
#[derive(Debug, Default)]
pub struct InMemoryResultStore {
    records: Mutex<HashMap<MatchId, String>>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Raw stored record.
    pub fn record(&self, id: &MatchId) -> Option<String> {
        self.records.lock().get(id).cloned()
    }
}

fn decode(id: &MatchId, record: &str) -> Result<MatchResult, StoreError> {
    serde_json::from_str(record).map_err(|source| StoreError::Corrupt {
        match_id: id.clone(),
        source,
    })
}

impl ResultStore for InMemoryResultStore {
    fn save(&self, id: &MatchId, result: &MatchResult) -> Result<SaveOutcome, StoreError> {
        let mut records = self.records.lock();

        if let Some(existing) = records.get(id) {
            let stored = decode(id, existing)?;
            return Ok(if stored == *result {
                SaveOutcome::AlreadyWritten
            } else {
                SaveOutcome::Conflict
            });
        }

        let encoded = serde_json::to_string(result).map_err(|source| StoreError::Encode {
            match_id: id.clone(),
            source,
        })?;
        records.insert(id.clone(), encoded);
        Ok(SaveOutcome::Written)
    }

    fn load(&self, id: &MatchId) -> Result<Option<MatchResult>, StoreError> {
        let records = self.records.lock();
        records.get(id).map(|r| decode(id, r)).transpose()
    }
}
