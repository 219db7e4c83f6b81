//! Error taxonomy for the journal core.
//!
//! Nothing here is fatal to the process: a validation failure is reported
//! back to the caller as a reason list, a persistence failure leaves the
//! caller's form state intact for retry, and a sync lapse leaves consumers
//! on their last-known-good snapshot.

use thiserror::Error;

/// A builder rejected the input. No record was emitted and no store call
/// was made.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid entry: {}", reasons.join("; "))]
pub struct ValidationError {
    /// Human-readable reasons, one per failed rule.
    pub reasons: Vec<String>,
}

impl ValidationError {
    pub fn new(reasons: Vec<String>) -> Self {
        Self { reasons }
    }
}

#[derive(Debug, Error)]
pub enum JournalError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store write failed. The command that produced the records is
    /// untouched, so the caller can retry without re-entering data.
    #[error("failed to persist entry: {0}")]
    Persistence(anyhow::Error),

    /// The live subscription lapsed. Non-fatal; the last delivered
    /// snapshot remains valid.
    #[error("live subscription error: {0}")]
    Sync(String),
}
