//! Error types for command-line parsing and configuration.

use thiserror::Error;

/// Errors raised before any matching work starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A `KEY=VALUE` argument was missing its `=` or key.
    #[error("expected KEY=VALUE, got '{0}'")]
    InvalidPair(String),
}
