//! Model layer
//!
//! - `range` - Date range input and validation
//! - `commission` - Commission records and their display formatting
//! - `query` - Query lifecycle state and view derivation
//! - `modal` - Modal overlay management

pub mod commission;
pub mod modal;
pub mod query;
pub mod range;
