//! Background query runner
//!
//! Runs each fetch on its own thread and hands the result back over a
//! channel, so the UI loop never blocks on the network. Every fetch carries
//! the sequence number it was issued with.

use crate::model::commission::CommissionRecord;
use crate::model::query::QueryError;
use crate::model::range::ValidRange;
use crate::services::CommissionSource;
use log::debug;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

/// Result of one fetch, tagged with the query it belongs to
#[derive(Debug)]
pub struct QueryOutcome {
    pub seq: u64,
    pub result: Result<Vec<CommissionRecord>, QueryError>,
}

/// Spawns fetches and collects their outcomes
pub struct QueryRunner {
    tx: Sender<QueryOutcome>,
    rx: Receiver<QueryOutcome>,
}

impl Default for QueryRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryRunner {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// Start a fetch in the background
    ///
    /// Earlier fetches are not cancelled; they finish and report as usual.
    pub fn spawn(&self, seq: u64, range: ValidRange, source: Arc<dyn CommissionSource>) {
        let tx = self.tx.clone();

        thread::spawn(move || {
            debug!("query #{} started for {}", seq, range);
            let result = source.fetch_commissions(&range);
            // Receiver gone means the app is shutting down
            let _ = tx.send(QueryOutcome { seq, result });
        });
    }

    /// Collect every outcome that has arrived so far, without blocking
    pub fn poll(&self) -> Vec<QueryOutcome> {
        let mut outcomes = Vec::new();

        loop {
            match self.rx.try_recv() {
                Ok(outcome) => outcomes.push(outcome),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::range::{validate, DateRange};
    use std::time::{Duration, Instant};

    struct EchoSource;

    impl CommissionSource for EchoSource {
        fn fetch_commissions(
            &self,
            range: &ValidRange,
        ) -> Result<Vec<CommissionRecord>, QueryError> {
            Ok(vec![CommissionRecord {
                id: range.start.to_string(),
                sale_date: range.end.to_string(),
                salesperson: "Echo".to_string(),
                amount: 1.0,
                applied_rate: 0.5,
                commission: 0.5,
            }])
        }
    }

    fn wait_for(runner: &QueryRunner, count: usize) -> Vec<QueryOutcome> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut outcomes = Vec::new();
        while outcomes.len() < count && Instant::now() < deadline {
            outcomes.extend(runner.poll());
            thread::sleep(Duration::from_millis(5));
        }
        outcomes
    }

    #[test]
    fn test_poll_empty_runner() {
        let runner = QueryRunner::new();
        assert!(runner.poll().is_empty());
    }

    #[test]
    fn test_outcomes_carry_sequence_numbers() {
        let runner = QueryRunner::new();
        let range = validate(&DateRange::new("2025-05-01", "2025-06-30")).unwrap();
        let source: Arc<dyn CommissionSource> = Arc::new(EchoSource);

        runner.spawn(1, range, Arc::clone(&source));
        runner.spawn(2, range, source);

        let mut outcomes = wait_for(&runner, 2);
        outcomes.sort_by_key(|o| o.seq);

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].seq, 1);
        assert_eq!(outcomes[1].seq, 2);
        let records = outcomes[1].result.as_ref().unwrap();
        assert_eq!(records[0].id, "2025-05-01");
    }
}
