// Job Replay: drives every scenario through the match lifecycle and job
// processor, then redelivers each job to confirm it is a no-op

use duel_engine::store::{InMemoryMatchStore, InMemoryResultStore};
use duel_engine::*;

use crate::report::ReplayReport;
use crate::scenarios::Scenario;

pub fn replay(scenarios: &[&Scenario], default_profile: &TrafficProfile) -> ReplayReport {
    let processor = JobProcessor::new(InMemoryMatchStore::new(), InMemoryResultStore::new());
    let mut report = ReplayReport::default();

    for scenario in scenarios {
        let profile = scenario.profile.unwrap_or(*default_profile);
        let id = match stage(processor.matches(), scenario, profile) {
            Ok(id) => id,
            Err(e) => {
                report.errors.push(format!("{}: {e}", scenario.name));
                continue;
            }
        };
        report.matches += 1;

        match processor.process(&id) {
            Ok(JobOutcome::Finished { .. }) => report.finished += 1,
            Ok(other) => report.errors.push(format!("{}: unexpected {other:?}", scenario.name)),
            Err(e) => report.errors.push(format!("{}: {e}", scenario.name)),
        }

        match processor.process(&id) {
            Ok(JobOutcome::Skipped(SkipReason::AlreadyTerminal)) => report.redeliveries_skipped += 1,
            Ok(other) => report.errors.push(format!("{}: redelivery gave {other:?}", scenario.name)),
            Err(e) => report.errors.push(format!("{}: redelivery failed: {e}", scenario.name)),
        }
    }

    report
}

/// Create, design, and lock a duel for `scenario`.
fn stage(
    store: &InMemoryMatchStore,
    scenario: &Scenario,
    profile: TrafficProfile,
) -> Result<MatchId, duel_engine::store::LifecycleError> {
    let m = store.create(MatchMode::Duel, profile)?;
    store.submit_architecture(&m.id, Player::A, scenario.player_a)?;
    store.submit_architecture(&m.id, Player::B, scenario.player_b)?;
    store.lock(&m.id)?;
    Ok(m.id)
}
