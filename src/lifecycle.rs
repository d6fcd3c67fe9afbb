// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Architecture Duel Arena - Match Lifecycle
//
// CREATED → DESIGNING → LOCKED → RUNNING → FINISHED | FAILED
// (CREATED may lock directly). FINISHED and FAILED are terminal.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Architecture, TrafficProfile};

// ─── Identity ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(String);

impl MatchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MatchId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for MatchId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ─── State ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchState {
    Created,
    Designing,
    Locked,
    Running,
    Finished,
    Failed,
}

impl MatchState {
    pub fn allowed_transitions(self) -> &'static [MatchState] {
        use MatchState::*;
        match self {
            Created => &[Designing, Locked],
            Designing => &[Locked],
            Locked => &[Running],
            Running => &[Finished, Failed],
            Finished | Failed => &[],
        }
    }

    pub fn can_transition_to(self, next: MatchState) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Architectures may still be submitted or replaced.
    pub fn accepts_designs(self) -> bool {
        matches!(self, Self::Created | Self::Designing)
    }
}

impl fmt::Display for MatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Created => "CREATED",
            Self::Designing => "DESIGNING",
            Self::Locked => "LOCKED",
            Self::Running => "RUNNING",
            Self::Finished => "FINISHED",
            Self::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

// ─── Match ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchMode {
    /// One player against the house architecture.
    Solo,
    Duel,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Player {
    A,
    B,
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub mode: MatchMode,
    pub state: MatchState,
    pub traffic_profile: TrafficProfile,
    pub player_a: Option<Architecture>,
    pub player_b: Option<Architecture>,
}

impl Match {
    pub fn new(id: MatchId, mode: MatchMode, traffic_profile: TrafficProfile) -> Self {
        Self {
            id,
            mode,
            state: MatchState::Created,
            traffic_profile,
            player_a: None,
            player_b: None,
        }
    }

    pub fn architecture(&self, player: Player) -> Option<&Architecture> {
        match player {
            Player::A => self.player_a.as_ref(),
            Player::B => self.player_b.as_ref(),
        }
    }

    /// The two architectures to simulate, or the first missing player.
    ///
    /// Solo matches without a player B design face the house architecture.
    pub fn contestants(&self) -> Result<(Architecture, Architecture), Player> {
        let a = self.player_a.ok_or(Player::A)?;
        let b = match (self.player_b, self.mode) {
            (Some(b), _) => b,
            (None, MatchMode::Solo) => Architecture::house(),
            (None, MatchMode::Duel) => return Err(Player::B),
        };
        Ok((a, b))
    }
}
