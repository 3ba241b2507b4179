//! External service interactions
//!
//! - Commissions service HTTP client
//! - Background query execution

pub mod commissions_api;
pub mod query_runner;

pub use commissions_api::{CommissionSource, HttpCommissionSource};
pub use query_runner::{QueryOutcome, QueryRunner};
