//! Configuration consumed by the matcher and interpolator.
//!
//! The engine reads two things from configuration: keyword synonym lists and
//! global properties used as the interpolation fallback. Both are reached
//! through the [`ConfigProvider`] trait so callers can inject their own store;
//! [`PropertyBundle`] is the in-memory default.
//!
//! Providers are queried on every call and never cached by the engine, so
//! edits made through [`PropertyBundle::set_property`] are observed by the next
//! match.

use crate::errors::ConfigError;
use serde_json::Value;
use std::collections::HashMap;
use std::env;
use std::sync::{PoisonError, RwLock};

/// Prefix for environment variables loaded by [`PropertyBundle::from_env`].
pub const PROPERTY_ENV_PREFIX: &str = "STEPMATCH_PROP_";

/// Environment variable overriding [`MatchLimits::max_input_len`].
pub const MAX_INPUT_LEN_ENV: &str = "STEPMATCH_MAX_INPUT_LEN";

/// Separator between entries of a list-valued property.
const LIST_DELIMITER: char = ';';

/// Default upper bound on the length of calls and definitions, in bytes.
const DEFAULT_MAX_INPUT_LEN: usize = 64 * 1024;

/// Read-only view of the configuration the engine depends on.
///
/// Implementations must tolerate concurrent reads; the engine never writes.
pub trait ConfigProvider: Send + Sync {
    /// Synonyms configured for `keyword`, in declaration order.
    ///
    /// Absent configuration yields an empty list.
    fn synonyms(&self, keyword: &str) -> Vec<String>;

    /// Look up a global property by name.
    fn property(&self, name: &str) -> Option<Value>;
}

/// Thread-safe property store backed by JSON values.
///
/// Synonyms for a keyword live under the keyword's name, either as a
/// `;`-separated string or as a JSON array.
///
/// # Examples
/// ```
/// use stepmatch::{ConfigProvider, PropertyBundle};
///
/// let bundle = PropertyBundle::new();
/// bundle.set_property("Given", "Provided; GivenThat;;Assume");
/// assert_eq!(bundle.synonyms("Given"), ["Provided", "GivenThat", "Assume"]);
/// assert!(bundle.synonyms("When").is_empty());
/// ```
#[derive(Debug, Default)]
pub struct PropertyBundle {
    properties: RwLock<HashMap<String, Value>>,
}

impl PropertyBundle {
    /// Create an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bundle from key/value pairs.
    #[must_use]
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let properties = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            properties: RwLock::new(properties),
        }
    }

    /// Load every environment variable prefixed with [`PROPERTY_ENV_PREFIX`].
    ///
    /// The remainder of the variable name, verbatim, becomes the property key,
    /// so `STEPMATCH_PROP_Given=Provided;Assume` configures synonyms for
    /// `Given`. Values are stored as JSON strings.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(env::vars())
    }

    fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        Self::from_pairs(vars.into_iter().filter_map(|(key, value)| {
            key.strip_prefix(PROPERTY_ENV_PREFIX)
                .filter(|name| !name.is_empty())
                .map(|name| (name.to_owned(), value))
        }))
    }

    /// Insert or replace a property.
    pub fn set_property(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.properties
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), value.into());
    }

    /// Remove a property, returning its previous value.
    pub fn remove_property(&self, name: &str) -> Option<Value> {
        self.properties
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }
}

impl ConfigProvider for PropertyBundle {
    fn synonyms(&self, keyword: &str) -> Vec<String> {
        self.property(keyword)
            .map(|value| list_entries(&value))
            .unwrap_or_default()
    }

    fn property(&self, name: &str) -> Option<Value> {
        self.properties
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}

/// Split a list-valued property into trimmed, non-blank entries.
fn list_entries(value: &Value) -> Vec<String> {
    let raw: Vec<String> = match value {
        Value::Null => Vec::new(),
        Value::String(text) => text.split(LIST_DELIMITER).map(str::to_owned).collect(),
        Value::Array(items) => items.iter().map(value_text).collect(),
        other => vec![other.to_string()],
    };
    raw.into_iter()
        .map(|entry| entry.trim().to_owned())
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Render a JSON value as substitution text: strings verbatim, anything else
/// as compact JSON.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use stepmatch::value_text;
///
/// assert_eq!(value_text(&json!("a.b")), "a.b");
/// assert_eq!(value_text(&json!({"k": [1, 2]})), r#"{"k":[1,2]}"#);
/// assert_eq!(value_text(&json!(5)), "5");
/// ```
#[must_use]
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Input size bounds applied before any regex work.
///
/// Definitions also face [`MAX_COMPILED_PATTERN_SIZE`] when parsed. Each
/// placeholder compiles to a large automaton, so a definition with several
/// hundred placeholders is rejected well below the length limit here.
///
/// [`MAX_COMPILED_PATTERN_SIZE`]: crate::MAX_COMPILED_PATTERN_SIZE
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchLimits {
    /// Longest call or definition, in bytes, that may match.
    pub max_input_len: usize,
}

impl Default for MatchLimits {
    fn default() -> Self {
        Self {
            max_input_len: DEFAULT_MAX_INPUT_LEN,
        }
    }
}

impl MatchLimits {
    /// Load limits from [`MAX_INPUT_LEN_ENV`], falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the variable is set but is
    /// not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        lookup(MAX_INPUT_LEN_ENV).map_or_else(
            || Ok(Self::default()),
            |raw| Self::parse_max_input_len(&raw).map(|max_input_len| Self { max_input_len }),
        )
    }

    fn parse_max_input_len(raw: &str) -> Result<usize, ConfigError> {
        match raw.trim().parse::<usize>() {
            Ok(len) if len > 0 => Ok(len),
            _ => Err(ConfigError::InvalidValue {
                key: MAX_INPUT_LEN_ENV.to_owned(),
                reason: format!("'{raw}' is not a positive integer"),
            }),
        }
    }

    /// Whether `text` is short enough to be matched.
    #[must_use]
    pub const fn admits(&self, text: &str) -> bool {
        text.len() <= self.max_input_len
    }
}
