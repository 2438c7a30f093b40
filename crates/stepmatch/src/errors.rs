//! Error types shared by the definition parsing and configuration modules.

use std::fmt;
use thiserror::Error;

/// Additional context for a malformed placeholder in a step definition.
///
/// # Examples
/// ```
/// use stepmatch::PlaceholderErrorInfo;
/// let info = PlaceholderErrorInfo::new("missing closing '}' for placeholder", 3, Some("{url".into()));
/// assert_eq!(info.token.as_deref(), Some("{url"));
/// assert_eq!(info.position, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderErrorInfo {
    /// Human-readable description of the defect.
    pub message: &'static str,
    /// Zero-based byte offset into the definition.
    pub position: usize,
    /// Offending token text, when one could be isolated.
    pub token: Option<String>,
}

impl PlaceholderErrorInfo {
    /// Create a new error description for a placeholder failure.
    #[must_use]
    pub const fn new(message: &'static str, position: usize, token: Option<String>) -> Self {
        Self {
            message,
            position,
            token,
        }
    }
}

impl fmt::Display for PlaceholderErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.token {
            Some(token) => write!(
                f,
                "{} at `{}` (byte {}, zero-based)",
                self.message, token, self.position
            ),
            None => write!(f, "{} at byte {} (zero-based)", self.message, self.position),
        }
    }
}

/// Errors surfaced while turning a step definition into a match pattern.
///
/// A definition that fails here should be rejected when it is registered;
/// per-call matching never produces this error.
///
/// # Examples
/// ```
/// use stepmatch::{PatternError, PlaceholderErrorInfo};
/// let info = PlaceholderErrorInfo::new("empty placeholder", 4, Some("{}".into()));
/// let err = PatternError::Placeholder(info.clone());
/// assert_eq!(err.to_string(), info.to_string());
/// ```
#[derive(Debug, Error)]
pub enum PatternError {
    /// The definition contains malformed placeholder or brace syntax.
    #[error("{0}")]
    Placeholder(PlaceholderErrorInfo),
    /// The generated regular expression could not be compiled.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

pub(crate) fn placeholder_error(
    message: &'static str,
    position: usize,
    token: Option<String>,
) -> PatternError {
    PatternError::Placeholder(PlaceholderErrorInfo::new(message, position, token))
}

/// Errors raised while reading configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A configuration value was present but could not be interpreted.
    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue {
        /// The property or environment key.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },
}
