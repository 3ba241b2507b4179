//! Commissions report controller
//!
//! Owns the date range and the single `QueryState`. Both the initial load
//! and the manual trigger go through `start_query`. Only the outcome of the
//! most recently issued query is ever applied.

use crate::model::query::{derive_view, QueryError, QueryState, RenderModel};
use crate::model::range::{self, DateRange};
use crate::services::{CommissionSource, QueryOutcome, QueryRunner};
use log::{debug, info, warn};
use std::sync::Arc;

pub struct CommissionsReport {
    /// Date inputs as currently typed
    pub range: DateRange,
    state: QueryState,
    /// Sequence number of the latest dispatched query (0 = none yet)
    latest_seq: u64,
    source: Arc<dyn CommissionSource>,
    runner: QueryRunner,
}

impl CommissionsReport {
    pub fn new(source: Arc<dyn CommissionSource>) -> Self {
        Self {
            range: DateRange::default(),
            state: QueryState::Idle,
            latest_seq: 0,
            source,
            runner: QueryRunner::new(),
        }
    }

    /// Set the starting range and run the first query
    pub fn initialize(&mut self, default_range: DateRange) {
        self.range = default_range;
        self.start_query();
    }

    /// Validate the current range and dispatch a query if it passes.
    ///
    /// Invalid input goes straight to `Failed` without touching the network.
    pub fn start_query(&mut self) {
        let valid = match range::validate(&self.range) {
            Ok(valid) => valid,
            Err(err) => {
                let err = QueryError::from(err);
                debug!("query not dispatched: {}", err);
                self.state = QueryState::Failed(err.to_string());
                return;
            }
        };

        self.latest_seq += 1;
        // Replacing the state drops any previous rows or error
        self.state = QueryState::Loading;
        info!("dispatching query #{} for {}", self.latest_seq, valid);
        self.runner
            .spawn(self.latest_seq, valid, Arc::clone(&self.source));
    }

    /// Apply a finished query. Returns false when the outcome was stale.
    pub fn apply_outcome(&mut self, outcome: QueryOutcome) -> bool {
        if outcome.seq != self.latest_seq || self.state != QueryState::Loading {
            debug!(
                "discarding stale outcome #{} (latest #{})",
                outcome.seq, self.latest_seq
            );
            return false;
        }

        self.state = match outcome.result {
            Ok(records) if records.is_empty() => QueryState::EmptySuccess,
            Ok(records) => QueryState::Success(records),
            Err(err) => {
                warn!("query #{} failed: {}", outcome.seq, err);
                QueryState::Failed(err.to_string())
            }
        };
        info!("query #{} settled: {}", outcome.seq, self.state.name());
        true
    }

    /// Drain finished queries, returns true if the state changed
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        for outcome in self.runner.poll() {
            changed |= self.apply_outcome(outcome);
        }
        changed
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn view(&self) -> RenderModel {
        derive_view(&self.state)
    }

    pub fn is_loading(&self) -> bool {
        self.state == QueryState::Loading
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::commission::CommissionRecord;
    use crate::model::query::{QueryError, NO_RESULTS_NOTICE};
    use crate::model::range::ValidRange;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::{Duration, Instant};

    /// Fake service that returns a fixed result and counts calls
    struct FakeSource {
        result: Result<Vec<CommissionRecord>, QueryError>,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn new(result: Result<Vec<CommissionRecord>, QueryError>) -> Arc<Self> {
            Arc::new(Self {
                result,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CommissionSource for FakeSource {
        fn fetch_commissions(
            &self,
            _range: &ValidRange,
        ) -> Result<Vec<CommissionRecord>, QueryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn ana_record() -> CommissionRecord {
        CommissionRecord {
            id: "v1".to_string(),
            sale_date: "2025-05-10".to_string(),
            salesperson: "Ana".to_string(),
            amount: 1000.0,
            applied_rate: 0.1,
            commission: 100.0,
        }
    }

    fn settle(report: &mut CommissionsReport) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while report.is_loading() && Instant::now() < deadline {
            report.poll();
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_starts_idle() {
        let report = CommissionsReport::new(FakeSource::new(Ok(vec![])));
        assert_eq!(report.state(), &QueryState::Idle);
        assert_eq!(report.latest_seq(), 0);
    }

    #[test]
    fn test_missing_date_never_calls_executor() {
        let source = FakeSource::new(Ok(vec![ana_record()]));
        let mut report = CommissionsReport::new(source.clone());

        report.initialize(DateRange::new("2025-05-01", ""));

        assert!(matches!(report.state(), QueryState::Failed(msg) if msg.contains("start")));
        assert_eq!(report.latest_seq(), 0);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(source.calls(), 0);
    }

    #[test]
    fn test_impossible_date_never_calls_executor() {
        let source = FakeSource::new(Ok(vec![ana_record()]));
        let mut report = CommissionsReport::new(source.clone());

        report.initialize(DateRange::new("2025-02-30", "2025-06-30"));

        assert!(matches!(report.state(), QueryState::Failed(msg) if msg.contains("2025-02-30")));
        assert_eq!(report.latest_seq(), 0);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(source.calls(), 0);
    }

    #[test]
    fn test_initialize_runs_query_to_success() {
        let source = FakeSource::new(Ok(vec![ana_record()]));
        let mut report = CommissionsReport::new(source.clone());

        report.initialize(DateRange::new("2025-05-01", "2025-06-30"));
        assert!(report.is_loading() || report.state().is_terminal());

        settle(&mut report);

        assert_eq!(source.calls(), 1);
        let view = report.view();
        assert_eq!(
            view.rows,
            vec![vec!["v1", "2025-05-10", "Ana", "$1000.00", "10.00%", "$100.00"]]
        );
        assert!(view.error.is_none());
    }

    #[test]
    fn test_empty_result_settles_empty() {
        let mut report = CommissionsReport::new(FakeSource::new(Ok(vec![])));
        report.initialize(DateRange::new("2025-05-01", "2025-06-30"));
        settle(&mut report);

        assert_eq!(report.state(), &QueryState::EmptySuccess);
        assert_eq!(report.view().notice.as_deref(), Some(NO_RESULTS_NOTICE));
    }

    #[test]
    fn test_server_error_settles_failed() {
        let source = FakeSource::new(Err(QueryError::Server {
            status: 400,
            message: "bad range".to_string(),
        }));
        let mut report = CommissionsReport::new(source);
        report.initialize(DateRange::new("2025-05-01", "2025-06-30"));
        settle(&mut report);

        let error = report.view().error.unwrap();
        assert!(error.contains("400"));
        assert!(error.contains("bad range"));
    }

    #[test]
    fn test_loading_clears_previous_payload() {
        let mut report = CommissionsReport::new(FakeSource::new(Ok(vec![ana_record()])));
        report.initialize(DateRange::new("2025-05-01", "2025-06-30"));
        settle(&mut report);
        assert!(matches!(report.state(), QueryState::Success(_)));

        report.start_query();
        // Nothing polls until the next tick, so the new query is still loading
        report.runner = QueryRunner::new();

        assert_eq!(report.state(), &QueryState::Loading);
        assert!(report.view().rows.is_empty());
        assert!(report.view().totals.is_none());
        assert_eq!(report.latest_seq(), 2);
    }

    #[test]
    fn test_stale_outcome_is_discarded() {
        let mut report = CommissionsReport::new(FakeSource::new(Ok(vec![])));
        report.range = DateRange::new("2025-05-01", "2025-06-30");
        report.start_query();
        report.start_query();
        assert_eq!(report.latest_seq(), 2);
        // Drop whatever the real workers send; feed outcomes by hand
        report.runner = QueryRunner::new();
        report.state = QueryState::Loading;

        let stale = QueryOutcome {
            seq: 1,
            result: Ok(vec![ana_record()]),
        };
        assert!(!report.apply_outcome(stale));
        assert!(report.is_loading());

        let latest = QueryOutcome {
            seq: 2,
            result: Err(QueryError::NoResponse("connection refused".to_string())),
        };
        assert!(report.apply_outcome(latest));
        assert!(matches!(report.state(), QueryState::Failed(msg) if msg.contains("No response")));
    }

    #[test]
    fn test_late_outcome_after_settle_is_ignored() {
        let mut report = CommissionsReport::new(FakeSource::new(Ok(vec![])));
        report.range = DateRange::new("2025-05-01", "2025-06-30");
        report.start_query();
        report.runner = QueryRunner::new();

        assert!(report.apply_outcome(QueryOutcome {
            seq: 1,
            result: Ok(vec![]),
        }));
        assert!(!report.apply_outcome(QueryOutcome {
            seq: 1,
            result: Ok(vec![ana_record()]),
        }));
        assert_eq!(report.state(), &QueryState::EmptySuccess);
    }

    #[test]
    fn test_validation_failure_after_success_replaces_rows() {
        let mut report = CommissionsReport::new(FakeSource::new(Ok(vec![ana_record()])));
        report.initialize(DateRange::new("2025-05-01", "2025-06-30"));
        settle(&mut report);

        report.range.end.clear();
        report.start_query();

        let view = report.view();
        assert!(view.rows.is_empty());
        assert!(view.error.is_some());
    }
}
