//! Front-end configuration parsed from environment variables.
//!
//! Settings can be overridden on the command line; see
//! [`CliConfig::apply_overrides`].

use std::env;
use std::str::FromStr;

use crate::error::CliError;

/// Environment variable selecting the log level.
pub const LOG_LEVEL_ENV: &str = "STEPMATCH_LOG_LEVEL";

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn` so normal output stays clean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Every event, including per-call mismatch reasons.
    Trace,
    /// Rejected definitions and other developer detail.
    Debug,
    /// Informational messages.
    Info,
    /// Warnings such as variable reference cycles.
    #[default]
    Warn,
    /// Failures only.
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub const fn as_filter_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Configuration for the command-line front end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log level for events written to stderr.
    pub log_level: LogLevel,
}

impl CliConfig {
    /// Load configuration from [`LOG_LEVEL_ENV`], falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidConfig`] if the variable holds an unknown
    /// level.
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CliError> {
        let log_level = lookup(LOG_LEVEL_ENV)
            .map_or_else(|| Ok(LogLevel::default()), |val| val.parse())?;
        Ok(Self { log_level })
    }

    /// Apply command-line overrides, which take precedence over the
    /// environment.
    #[must_use]
    pub fn apply_overrides(mut self, log_level: Option<LogLevel>) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self
    }
}
