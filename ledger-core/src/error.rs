use thiserror::Error;

/// A raw event that cannot be interpreted. Such events are skipped by both
/// the normalizer and the balance walk.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EventError {
    #[error("event has no signature")]
    MissingSignature,

    #[error("event {signature} has invalid timestamp {timestamp}")]
    InvalidTimestamp { signature: String, timestamp: i64 },

    #[error("event {signature} has invalid amount in {field}: {value}")]
    InvalidAmount {
        signature: String,
        field: String,
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("no raw events and no current balance supplied")]
    MissingInput,

    #[error("current balance must be a finite non-negative number, got {0}")]
    InvalidBalance(f64),

    #[error("unsupported time window: {0} days (expected one of 1, 3, 5, 10, 30)")]
    UnsupportedWindow(u32),

    #[error("invalid time window {0:?}")]
    InvalidWindow(String),
}
