//! Step keywords and their configured synonyms.
//!
//! A step call may start with one of the fixed [`StepKeyword`]s or any synonym
//! configured for it. The [`KeywordRegistry`] asks its [`ConfigProvider`] for
//! synonyms on every query, so configuration edits take effect immediately.

use crate::config::ConfigProvider;
use regex::RegexBuilder;
use std::fmt;
use std::str::FromStr;

/// Leading token of a step call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKeyword {
    /// Setup preconditions.
    Given,
    /// Perform an action.
    When,
    /// Assert an outcome.
    Then,
    /// Continue the previous step's intent.
    And,
    /// Name the resource used by the step.
    Using,
    /// State a property the subject holds.
    Having,
    /// Attach extra detail to the step.
    With,
}

impl StepKeyword {
    /// Every keyword, in the order used to build the keyword pattern.
    pub const ALL: [Self; 7] = [
        Self::Given,
        Self::When,
        Self::Then,
        Self::And,
        Self::Using,
        Self::Having,
        Self::With,
    ];

    /// Return the keyword as a string slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepmatch::StepKeyword;
    ///
    /// assert_eq!(StepKeyword::Having.as_str(), "Having");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::Using => "Using",
            Self::Having => "Having",
            Self::With => "With",
        }
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`StepKeyword`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepKeywordParseError(pub String);

impl fmt::Display for StepKeywordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid step keyword: {}", self.0)
    }
}

impl std::error::Error for StepKeywordParseError {}

impl FromStr for StepKeyword {
    type Err = StepKeywordParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|kw| kw.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| StepKeywordParseError(trimmed.to_owned()))
    }
}

/// Keyword lookups backed by a live configuration provider.
///
/// # Examples
/// ```
/// use stepmatch::{KeywordRegistry, PropertyBundle};
///
/// let config = PropertyBundle::new();
/// config.set_property("Given", "GivenThat");
/// let registry = KeywordRegistry::new(&config);
/// assert_eq!(registry.leading_keyword("giventhat I log in"), Some("given"));
/// assert!(registry.all_keywords().contains(&"GivenThat".to_string()));
/// ```
#[derive(Clone, Copy)]
pub struct KeywordRegistry<'a> {
    config: &'a dyn ConfigProvider,
}

impl fmt::Debug for KeywordRegistry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeywordRegistry").finish_non_exhaustive()
    }
}

impl<'a> KeywordRegistry<'a> {
    /// Create a registry reading synonyms from `config`.
    #[must_use]
    pub fn new(config: &'a dyn ConfigProvider) -> Self {
        Self { config }
    }

    /// The provider this registry reads from.
    #[must_use]
    pub fn config(&self) -> &'a dyn ConfigProvider {
        self.config
    }

    /// Every keyword name, each followed by its configured synonyms.
    #[must_use]
    pub fn all_keywords(&self) -> Vec<String> {
        let mut keywords = Vec::with_capacity(StepKeyword::ALL.len());
        for keyword in StepKeyword::ALL {
            keywords.push(keyword.as_str().to_owned());
            keywords.extend(self.config.synonyms(keyword.as_str()));
        }
        keywords
    }

    /// Anchored alternation of all keywords and synonyms: `^(Given|When|...)`.
    ///
    /// Entries are regex-escaped. Callers apply case-insensitive matching.
    #[must_use]
    pub fn keyword_regex(&self) -> String {
        format!("^({})", self.alternation())
    }

    /// The keyword alternation without anchor or group.
    pub(crate) fn alternation(&self) -> String {
        self.all_keywords()
            .iter()
            .map(|keyword| regex::escape(keyword))
            .collect::<Vec<_>>()
            .join("|")
    }

    /// The keyword or synonym at the start of `text`, matched
    /// case-insensitively; `None` when the text does not start with one.
    ///
    /// Alternatives are tried in [`all_keywords`](Self::all_keywords) order,
    /// so a shorter keyword listed earlier wins over a longer synonym.
    #[must_use]
    pub fn leading_keyword<'t>(&self, text: &'t str) -> Option<&'t str> {
        let re = RegexBuilder::new(&self.keyword_regex())
            .case_insensitive(true)
            .build()
            .ok()?;
        re.find(text).map(|m| m.as_str())
    }
}
