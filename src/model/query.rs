//! Query lifecycle state and view derivation
//!
//! A single `QueryState` value replaces separate loading/error/results
//! flags, so only one of them can ever be shown. `derive_view` projects it
//! into what the results panel renders.

use super::commission::{CommissionRecord, ReportTotals};
use super::range::ValidationError;
use thiserror::Error;

/// Notice shown when the service returns an empty array
pub const NO_RESULTS_NOTICE: &str = "No commissions found for the selected date range.";

/// Lifecycle of the current query
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryState {
    /// Nothing attempted yet
    #[default]
    Idle,
    /// Request in flight
    Loading,
    /// Service returned at least one record
    Success(Vec<CommissionRecord>),
    /// Service answered with zero records
    EmptySuccess,
    /// Validation or request failure, with the message to display
    Failed(String),
}

impl QueryState {
    pub fn name(&self) -> &'static str {
        match self {
            QueryState::Idle => "idle",
            QueryState::Loading => "loading",
            QueryState::Success(_) => "success",
            QueryState::EmptySuccess => "empty",
            QueryState::Failed(_) => "failed",
        }
    }

    /// Whether this query cycle has settled
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            QueryState::Success(_) | QueryState::EmptySuccess | QueryState::Failed(_)
        )
    }
}

/// Everything that can end a query cycle without records
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The service answered with a non-2xx status
    #[error("Server error: {status} - {message}")]
    Server { status: u16, message: String },

    /// The request went out but nothing came back
    #[error(
        "No response received from the server. Make sure the backend is running and reachable. ({0})"
    )]
    NoResponse(String),

    /// The request could not be built or sent
    #[error("Error sending the request: {0}")]
    Request(String),

    /// 2xx response whose body is not a list of commission records
    #[error("Unexpected response from the server: {0}")]
    Decode(String),
}

/// What the results panel should show for a given state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderModel {
    pub loading: bool,
    pub error: Option<String>,
    /// Table rows, only populated on success
    pub rows: Vec<Vec<String>>,
    pub notice: Option<String>,
    pub totals: Option<ReportTotals>,
    pub trigger_enabled: bool,
}

/// Project the query state into a render model
pub fn derive_view(state: &QueryState) -> RenderModel {
    match state {
        QueryState::Idle => RenderModel {
            trigger_enabled: true,
            ..RenderModel::default()
        },
        QueryState::Loading => RenderModel {
            loading: true,
            trigger_enabled: false,
            ..RenderModel::default()
        },
        QueryState::Success(records) => RenderModel {
            rows: records.iter().map(CommissionRecord::table_row).collect(),
            totals: Some(ReportTotals::from_records(records)),
            trigger_enabled: true,
            ..RenderModel::default()
        },
        QueryState::EmptySuccess => RenderModel {
            notice: Some(NO_RESULTS_NOTICE.to_string()),
            trigger_enabled: true,
            ..RenderModel::default()
        },
        QueryState::Failed(message) => RenderModel {
            error: Some(message.clone()),
            trigger_enabled: true,
            ..RenderModel::default()
        },
    }
}
