// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Architecture Duel Arena - Store Errors

use crate::lifecycle::{MatchId, MatchState, Player};
use crate::validation::ValidationError;

/// Backend failure. Transient from the caller's point of view.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("failed to encode record for match {match_id}: {source}")]
    Encode {
        match_id: MatchId,
        #[source]
        source: serde_json::Error,
    },

    #[error("corrupt record for match {match_id}: {source}")]
    Corrupt {
        match_id: MatchId,
        #[source]
        source: serde_json::Error,
    },
}

/// Rejections from the API-side match operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("match {0} not found")]
    NotFound(MatchId),

    #[error("match {id} cannot {action} while {state}")]
    InvalidState {
        id: MatchId,
        state: MatchState,
        action: &'static str,
    },

    #[error("player {0} architecture not submitted")]
    MissingArchitecture(Player),

    #[error("invalid input: {0}")]
    Invalid(#[from] ValidationError),
}
