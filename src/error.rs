//! Error types
//!
//! Everything here is a programmer or configuration mistake surfaced
//! immediately. Nothing in the simulation is retried.

use thiserror::Error;

/// Errors raised by the math helpers and the simulation core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DodgeError {
    /// A degenerate argument, e.g. a remap whose source range is empty
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Division by a zero scalar or by a vector with a zero component
    #[error("division by zero in {what}")]
    DivisionByZero { what: &'static str },
}

/// Errors raised while loading or validating a [`crate::GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
