//! Deciding whether a step call conforms to a step definition.
//!
//! A call matches when, ignoring case and an optional leading keyword, the
//! whole call fits the definition with each placeholder replaced by a legal
//! argument token, and extraction then yields one argument per placeholder.
//! Matching is fail-closed: any failure along the way is a plain mismatch.

use crate::config::{ConfigProvider, MatchLimits};
use crate::errors::PatternError;
use crate::extract::{Argument, args_from_call};
use crate::keyword::KeywordRegistry;
use crate::pattern::{StepDefinition, build_regex, call_regex_source};
use std::borrow::Cow;
use tracing::trace;

/// Matches calls against definitions using live keyword configuration.
///
/// # Examples
/// ```
/// use stepmatch::{DefinitionMatcher, PropertyBundle, StepDefinition};
///
/// let config = PropertyBundle::new();
/// config.set_property("Given", "GivenThat");
/// let matcher = DefinitionMatcher::new(&config);
/// let def = StepDefinition::parse("Given I am on {url}").expect("well formed");
///
/// assert!(matcher.matches(&def, "GivenThat I am on 'http://x'"));
/// config.remove_property("Given");
/// assert!(!matcher.matches(&def, "GivenThat I am on 'http://x'"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DefinitionMatcher<'a> {
    keywords: KeywordRegistry<'a>,
    limits: MatchLimits,
}

impl<'a> DefinitionMatcher<'a> {
    /// Create a matcher reading keyword synonyms from `config`.
    #[must_use]
    pub fn new(config: &'a dyn ConfigProvider) -> Self {
        Self {
            keywords: KeywordRegistry::new(config),
            limits: MatchLimits::default(),
        }
    }

    /// Replace the input size limits.
    #[must_use]
    pub const fn with_limits(mut self, limits: MatchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// The keyword registry used for prefix handling.
    #[must_use]
    pub const fn keywords(&self) -> &KeywordRegistry<'a> {
        &self.keywords
    }

    /// Whether `call` conforms to `definition`.
    #[must_use]
    pub fn matches(&self, definition: &StepDefinition, call: &str) -> bool {
        self.match_args(definition, call).is_some()
    }

    /// Match `call` and return its arguments in invocation order.
    ///
    /// Returns `None` on any mismatch: input too long, structural mismatch,
    /// extraction failure, or an argument count different from the number
    /// of placeholders.
    #[must_use]
    pub fn match_args(&self, definition: &StepDefinition, call: &str) -> Option<Vec<Argument>> {
        if !self.limits.admits(call) || !self.limits.admits(definition.as_str()) {
            trace!(
                limit = self.limits.max_input_len,
                "input exceeds match length limit"
            );
            return None;
        }

        let alternation = self.keywords.alternation();
        let definition = definition
            .strip_leading_keyword(&alternation)
            .map_or(Cow::Borrowed(definition), Cow::Owned);

        let source = call_regex_source(&alternation, definition.body_source());
        let structural = match build_regex(&source) {
            Ok(re) => re,
            Err(err) => {
                trace!(%err, "structural pattern failed to compile");
                return None;
            }
        };
        if !structural.is_match(call) {
            return None;
        }

        let args = args_from_call(&definition, call)?;
        if args.len() != definition.placeholder_count() {
            trace!(
                expected = definition.placeholder_count(),
                actual = args.len(),
                "argument count mismatch"
            );
            return None;
        }
        Some(args)
    }

    /// Parse `definition` and match `call` against it.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] when the definition is malformed; a mismatch
    /// is `Ok(false)`.
    pub fn matches_text(&self, definition: &str, call: &str) -> Result<bool, PatternError> {
        let definition = StepDefinition::parse(definition)?;
        Ok(self.matches(&definition, call))
    }
}

/// Whether `call` conforms to `definition`, reading keywords from `config`.
///
/// # Errors
///
/// Returns [`PatternError`] when the definition is malformed.
///
/// # Examples
/// ```
/// use stepmatch::{PropertyBundle, matches};
///
/// let config = PropertyBundle::new();
/// assert_eq!(matches("I pay {amount}", "When I pay 12.5", &config).ok(), Some(true));
/// assert_eq!(matches("I pay {amount}", "When I pay later", &config).ok(), Some(false));
/// assert!(matches("I pay {amount", "When I pay 1", &config).is_err());
/// ```
pub fn matches(
    definition: &str,
    call: &str,
    config: &dyn ConfigProvider,
) -> Result<bool, PatternError> {
    DefinitionMatcher::new(config).matches_text(definition, call)
}
