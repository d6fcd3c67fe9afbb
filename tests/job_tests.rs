#![cfg(not(target_arch = "wasm32"))]

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use duel_engine::store::*;
    use duel_engine::*;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn legacy_monolith() -> Architecture {
        Architecture {
            load_balancer: LoadBalancer::LeastConnections,
            compute: Compute { kind: ComputeType::Stateful, instances: 2, autoscale: false },
            database: Database { kind: DatabaseType::Single, consistency: Consistency::Strong },
            cache: Cache { strategy: CacheStrategy::Off },
        }
    }

    /// Create, design, and lock a duel through the API-side operations.
    fn locked_duel(store: &InMemoryMatchStore) -> MatchId {
        let m = store.create(MatchMode::Duel, TrafficProfile::default()).unwrap();
        store.submit_architecture(&m.id, Player::A, Architecture::house()).unwrap();
        store.submit_architecture(&m.id, Player::B, legacy_monolith()).unwrap();
        store.lock(&m.id).unwrap();
        m.id
    }

    // ========== Fault Injection ==========

    /// Fails the first `n` saves without writing anything.
    struct FailingSaves<R> {
        inner: R,
        remaining: AtomicUsize,
    }

    /// Writes, then reports a failure for the first `n` saves (lost ack).
    struct LostAcks<R> {
        inner: R,
        remaining: AtomicUsize,
    }

    /// Fails the first `n` transitions into `target`.
    struct FailingTransitions<M> {
        inner: M,
        target: MatchState,
        remaining: AtomicUsize,
    }

    fn take(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    impl<R: ResultStore> ResultStore for FailingSaves<R> {
        fn save(&self, id: &MatchId, result: &MatchResult) -> Result<SaveOutcome, StoreError> {
            if take(&self.remaining) {
                return Err(StoreError::Unavailable("injected save failure".into()));
            }
            self.inner.save(id, result)
        }

        fn load(&self, id: &MatchId) -> Result<Option<MatchResult>, StoreError> {
            self.inner.load(id)
        }
    }

    impl<R: ResultStore> ResultStore for LostAcks<R> {
        fn save(&self, id: &MatchId, result: &MatchResult) -> Result<SaveOutcome, StoreError> {
            let outcome = self.inner.save(id, result)?;
            if take(&self.remaining) {
                return Err(StoreError::Unavailable("connection reset after write".into()));
            }
            Ok(outcome)
        }

        fn load(&self, id: &MatchId) -> Result<Option<MatchResult>, StoreError> {
            self.inner.load(id)
        }
    }

    impl<M: MatchStore> MatchStore for FailingTransitions<M> {
        fn load(&self, id: &MatchId) -> Result<Option<Match>, StoreError> {
            self.inner.load(id)
        }

        fn try_transition(&self, id: &MatchId, from: MatchState, to: MatchState) -> Result<bool, StoreError> {
            if to == self.target && take(&self.remaining) {
                return Err(StoreError::Unavailable("injected transition failure".into()));
            }
            self.inner.try_transition(id, from, to)
        }
    }

    // ========== Happy Path ==========

    #[test]
    fn test_locked_duel_runs_to_finished() {
        init_tracing();
        let matches = InMemoryMatchStore::new();
        let results = InMemoryResultStore::new();
        let id = locked_duel(&matches);
        let processor = JobProcessor::new(&matches, &results);

        let outcome = processor.process(&id).unwrap();
        assert_eq!(outcome, JobOutcome::Finished { winner: Winner::A, persisted: SaveOutcome::Written });
        assert_eq!(matches.state(&id), Some(MatchState::Finished));

        let expected = run_match_simulation(&Architecture::house(), &legacy_monolith(), &TrafficProfile::default());
        assert_eq!(results.load(&id).unwrap(), Some(expected));
    }

    #[test]
    fn test_solo_match_faces_house() {
        init_tracing();
        let matches = InMemoryMatchStore::new();
        let results = InMemoryResultStore::new();
        let m = matches.create(MatchMode::Solo, TrafficProfile::default()).unwrap();
        matches.submit_architecture(&m.id, Player::A, legacy_monolith()).unwrap();
        matches.lock(&m.id).unwrap();

        let outcome = JobProcessor::new(&matches, &results).process(&m.id).unwrap();
        assert_eq!(outcome, JobOutcome::Finished { winner: Winner::B, persisted: SaveOutcome::Written });

        let stored = results.load(&m.id).unwrap().unwrap();
        assert_eq!(stored.player_b.metrics.survived_ticks, 10);
    }

    #[test]
    fn test_redelivery_after_finish_is_noop() {
        init_tracing();
        let matches = InMemoryMatchStore::new();
        let results = InMemoryResultStore::new();
        let id = locked_duel(&matches);
        let processor = JobProcessor::new(&matches, &results);

        processor.process(&id).unwrap();
        let record = results.record(&id);

        for _ in 0..3 {
            assert_eq!(processor.process(&id).unwrap(), JobOutcome::Skipped(SkipReason::AlreadyTerminal));
        }
        assert_eq!(results.len(), 1);
        assert_eq!(results.record(&id), record);
    }

    #[test]
    fn test_unknown_match_is_dropped() {
        init_tracing();
        let processor = JobProcessor::new(InMemoryMatchStore::new(), InMemoryResultStore::new());
        assert_eq!(
            processor.process(&MatchId::from("missing")).unwrap(),
            JobOutcome::Skipped(SkipReason::NotFound)
        );
    }

    #[test]
    fn test_unlocked_match_is_not_started() {
        init_tracing();
        let matches = InMemoryMatchStore::new();
        let m = matches.create(MatchMode::Duel, TrafficProfile::default()).unwrap();
        matches.submit_architecture(&m.id, Player::A, Architecture::house()).unwrap();

        let processor = JobProcessor::new(&matches, InMemoryResultStore::new());
        assert_eq!(processor.process(&m.id).unwrap(), JobOutcome::Skipped(SkipReason::NotStarted));
        assert_eq!(matches.state(&m.id), Some(MatchState::Designing));
    }

    // ========== Concurrency ==========

    #[test]
    fn test_concurrent_start_admits_one() {
        let matches = InMemoryMatchStore::new();
        let id = locked_duel(&matches);

        let started = AtomicUsize::new(0);
        thread::scope(|s| {
            for _ in 0..16 {
                s.spawn(|| {
                    if matches.try_transition(&id, MatchState::Locked, MatchState::Running).unwrap() {
                        started.fetch_add(1, Ordering::SeqCst);
                    }
                });
            }
        });

        assert_eq!(started.load(Ordering::SeqCst), 1);
        assert_eq!(matches.state(&id), Some(MatchState::Running));
        assert!(!matches.try_transition(&id, MatchState::Locked, MatchState::Running).unwrap());
    }

    #[test]
    fn test_concurrent_deliveries_persist_once() {
        init_tracing();
        let matches = InMemoryMatchStore::new();
        let results = InMemoryResultStore::new();
        let id = locked_duel(&matches);
        let processor = JobProcessor::new(&matches, &results);

        let outcomes: Vec<JobOutcome> = thread::scope(|s| {
            let handles: Vec<_> = (0..8).map(|_| s.spawn(|| processor.process(&id).unwrap())).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let written = outcomes
            .iter()
            .filter(|o| matches!(o, JobOutcome::Finished { persisted: SaveOutcome::Written, .. }))
            .count();
        assert_eq!(written, 1);
        for outcome in &outcomes {
            match outcome {
                JobOutcome::Finished { winner, persisted } => {
                    assert_eq!(*winner, Winner::A);
                    assert_ne!(*persisted, SaveOutcome::Conflict);
                }
                JobOutcome::Skipped(reason) => {
                    assert!(matches!(reason, SkipReason::NotStarted | SkipReason::AlreadyTerminal));
                }
            }
        }
        assert_eq!(matches.state(&id), Some(MatchState::Finished));
        assert_eq!(results.len(), 1);
    }

    // ========== Crash Recovery ==========

    #[test]
    fn test_lost_ack_converges_without_rewrite() {
        init_tracing();
        let matches = InMemoryMatchStore::new();
        let id = locked_duel(&matches);
        let results = LostAcks { inner: InMemoryResultStore::new(), remaining: AtomicUsize::new(1) };
        let processor = JobProcessor::new(&matches, &results);

        let err = processor.process(&id).unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(matches.state(&id), Some(MatchState::Running));
        let record = results.inner.record(&id);
        assert!(record.is_some());

        let outcome = processor.process(&id).unwrap();
        assert_eq!(outcome, JobOutcome::Finished { winner: Winner::A, persisted: SaveOutcome::AlreadyWritten });
        assert_eq!(matches.state(&id), Some(MatchState::Finished));
        assert_eq!(results.inner.record(&id), record);
    }

    #[test]
    fn test_failed_save_is_retried() {
        init_tracing();
        let matches = InMemoryMatchStore::new();
        let id = locked_duel(&matches);
        let results = FailingSaves { inner: InMemoryResultStore::new(), remaining: AtomicUsize::new(2) };
        let processor = JobProcessor::new(&matches, &results);

        for _ in 0..2 {
            let err = processor.process(&id).unwrap_err();
            assert!(matches!(err, JobError::Store(StoreError::Unavailable(_))));
            assert!(results.inner.is_empty());
        }

        let outcome = processor.process(&id).unwrap();
        assert_eq!(outcome, JobOutcome::Finished { winner: Winner::A, persisted: SaveOutcome::Written });
        assert_eq!(matches.state(&id), Some(MatchState::Finished));
    }

    #[test]
    fn test_failed_finish_transition_converges() {
        init_tracing();
        let inner = InMemoryMatchStore::new();
        let id = locked_duel(&inner);
        let matches = FailingTransitions { inner, target: MatchState::Finished, remaining: AtomicUsize::new(1) };
        let results = InMemoryResultStore::new();
        let processor = JobProcessor::new(&matches, &results);

        assert!(processor.process(&id).unwrap_err().is_retryable());
        assert_eq!(matches.inner.state(&id), Some(MatchState::Running));
        assert_eq!(results.len(), 1);

        let outcome = processor.process(&id).unwrap();
        assert_eq!(outcome, JobOutcome::Finished { winner: Winner::A, persisted: SaveOutcome::AlreadyWritten });
        assert_eq!(matches.inner.state(&id), Some(MatchState::Finished));
    }

    // ========== Conflicts ==========

    #[test]
    fn test_conflicting_result_fails_match() {
        init_tracing();
        let matches = InMemoryMatchStore::new();
        let results = InMemoryResultStore::new();
        let id = locked_duel(&matches);

        // a different result already sits under this id
        let foreign = run_match_simulation(&legacy_monolith(), &legacy_monolith(), &TrafficProfile::default());
        assert_eq!(results.save(&id, &foreign).unwrap(), SaveOutcome::Written);
        let record = results.record(&id);

        let err = JobProcessor::new(&matches, &results).process(&id).unwrap_err();
        assert!(matches!(&err, JobError::ConflictingResult { match_id } if *match_id == id));
        assert!(!err.is_retryable());
        assert_eq!(matches.state(&id), Some(MatchState::Failed));
        assert_eq!(results.record(&id), record);
    }

    #[test]
    fn test_failed_match_is_terminal() {
        init_tracing();
        let matches = InMemoryMatchStore::new();
        let id = locked_duel(&matches);
        assert!(matches.try_transition(&id, MatchState::Locked, MatchState::Running).unwrap());
        assert!(matches.try_transition(&id, MatchState::Running, MatchState::Failed).unwrap());

        let processor = JobProcessor::new(&matches, InMemoryResultStore::new());
        assert_eq!(processor.process(&id).unwrap(), JobOutcome::Skipped(SkipReason::AlreadyTerminal));
        for next in [MatchState::Running, MatchState::Finished, MatchState::Locked] {
            assert!(!matches.try_transition(&id, MatchState::Failed, next).unwrap());
        }
    }
}
