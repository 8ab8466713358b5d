//! Error types for the booking assistant.
//!
//! The transition function and the response generator are total and never
//! produce these; only the collectors, the session shell and the CLI do.

use crate::booking::collectors::CollectorKind;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation failures from the structured collectors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectorError {
    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a valid phone number")]
    InvalidPhone,

    #[error("Date {date} is in the past (earliest is {earliest})")]
    DateInPast { date: String, earliest: String },

    #[error("Date {date} is too far ahead (latest is {latest})")]
    DateBeyondHorizon { date: String, latest: String },

    #[error("Unknown time slot: {0}")]
    UnknownTimeSlot(String),

    #[error("Could not read a date from {0:?} (expected YYYY-MM-DD)")]
    UnparseableDate(String),
}

/// Turn-cycle misuse detected by the booking session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Waiting for the {0} picker, free text is not accepted right now")]
    CollectorPending(CollectorKind),

    #[error("No picker is open")]
    NoCollectorPending,

    #[error("Expected the {expected} picker, got {got}")]
    WrongCollector {
        expected: CollectorKind,
        got: CollectorKind,
    },

    #[error("Option {index} does not exist (the last message offers {available})")]
    NoSuchOption { index: usize, available: usize },

    #[error(transparent)]
    Rejected(#[from] CollectorError),
}

/// Terminal I/O errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to render transcript: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for the booking assistant.
pub type Result<T> = std::result::Result<T, Error>;
