// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Architecture Duel Arena - Job Processor
//
// Handles one at-least-once delivery of a match id:
//
//   LOCKED ──CAS──▶ RUNNING ──simulate, save──▶ FINISHED
//                      │
//                      └── conflicting result ──▶ FAILED
//
// Every step is safe to repeat. The CAS admits one attempt out of LOCKED, the
// simulation is deterministic, and the result store accepts an equal rewrite
// as a no-op. Retry policy belongs to the delivery layer.

use crate::lifecycle::{MatchId, MatchState, Player};
use crate::simulation::{run_match_simulation, Winner};
use crate::store::{MatchStore, ResultStore, SaveOutcome, StoreError};

// ─── Outcomes ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotFound,
    AlreadyTerminal,
    /// Another delivery won the start, or the match is not locked yet.
    NotStarted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    Skipped(SkipReason),
    Finished {
        winner: Winner,
        persisted: SaveOutcome,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("non-deterministic simulation: stored result for match {match_id} differs")]
    ConflictingResult { match_id: MatchId },

    #[error("match {match_id} reached RUNNING without player {player} architecture")]
    IncompleteMatch { match_id: MatchId, player: Player },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl JobError {
    /// Only backend failures are worth redelivering.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

// ─── Processor ──────────────────────────────────────────────────────────────

pub struct JobProcessor<M, R> {
    matches: M,
    results: R,
}

impl<M: MatchStore, R: ResultStore> JobProcessor<M, R> {
    pub fn new(matches: M, results: R) -> Self {
        Self { matches, results }
    }

    pub fn matches(&self) -> &M {
        &self.matches
    }

    pub fn results(&self) -> &R {
        &self.results
    }

    #[tracing::instrument(level = "info", skip(self, id), fields(match_id = %id))]
    pub fn process(&self, id: &MatchId) -> Result<JobOutcome, JobError> {
        let Some(m) = self.matches.load(id)? else {
            tracing::warn!("match not found, dropping delivery");
            return Ok(JobOutcome::Skipped(SkipReason::NotFound));
        };

        if m.state.is_terminal() {
            tracing::debug!(state = %m.state, "match already terminal");
            return Ok(JobOutcome::Skipped(SkipReason::AlreadyTerminal));
        }

        match m.state {
            MatchState::Locked => {
                if !self
                    .matches
                    .try_transition(id, MatchState::Locked, MatchState::Running)?
                {
                    tracing::warn!("lost the race to start the match");
                    return Ok(JobOutcome::Skipped(SkipReason::NotStarted));
                }
            }
            // An earlier attempt started and never finished. Re-running is
            // pure and saving an equal result is a no-op, so resume it.
            MatchState::Running => {
                tracing::info!("resuming interrupted run");
            }
            state => {
                tracing::warn!(%state, "match not locked");
                return Ok(JobOutcome::Skipped(SkipReason::NotStarted));
            }
        }

        let (player_a, player_b) = match m.contestants() {
            Ok(pair) => pair,
            Err(player) => {
                tracing::error!(%player, "running match is missing an architecture");
                self.mark_failed(id);
                return Err(JobError::IncompleteMatch {
                    match_id: id.clone(),
                    player,
                });
            }
        };

        let result = run_match_simulation(&player_a, &player_b, &m.traffic_profile);
        tracing::debug!(
            winner = ?result.winner,
            score_a = result.player_a.score.total,
            score_b = result.player_b.score.total,
            failed_a = ?result.player_a.metrics.failed_at_rps,
            failed_b = ?result.player_b.metrics.failed_at_rps,
            "simulation complete"
        );

        let persisted = self.results.save(id, &result)?;
        if persisted == SaveOutcome::Conflict {
            tracing::error!("stored result differs from recomputed result");
            self.mark_failed(id);
            return Err(JobError::ConflictingResult {
                match_id: id.clone(),
            });
        }

        if !self
            .matches
            .try_transition(id, MatchState::Running, MatchState::Finished)?
        {
            // a concurrent attempt got there first
            tracing::debug!("match already left RUNNING");
        }

        tracing::info!(winner = ?result.winner, ?persisted, "match finished");
        Ok(JobOutcome::Finished {
            winner: result.winner,
            persisted,
        })
    }

    /// Best effort: the caller already has a fatal error to report.
    fn mark_failed(&self, id: &MatchId) {
        match self
            .matches
            .try_transition(id, MatchState::Running, MatchState::Failed)
        {
            Ok(true) => {}
            Ok(false) => tracing::warn!("match left RUNNING before it could be failed"),
            Err(e) => tracing::error!(error = %e, "could not mark match failed"),
        }
    }
}
