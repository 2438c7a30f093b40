//! A collection of step definitions with payloads, searched by call text.

use crate::config::{ConfigProvider, MatchLimits};
use crate::errors::PatternError;
use crate::extract::Argument;
use crate::matcher::DefinitionMatcher;
use crate::pattern::StepDefinition;
use crate::specificity::SpecificityScore;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

struct Entry<T> {
    definition: StepDefinition,
    specificity: SpecificityScore,
    payload: T,
}

/// The definition chosen for a call, with the arguments it extracted.
#[derive(Debug)]
pub struct StepMatch<'l, T> {
    /// The matching definition.
    pub definition: &'l StepDefinition,
    /// The payload registered alongside the definition.
    pub payload: &'l T,
    /// Arguments in invocation order, quotes stripped.
    pub args: Vec<Argument>,
}

/// Step definitions paired with caller payloads, such as implementation
/// handles.
///
/// Definitions are validated on [`register`](Self::register). Keyword
/// synonyms are read from the shared provider on every lookup.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use stepmatch::{PropertyBundle, StepLibrary};
///
/// let mut library = StepLibrary::new(Arc::new(PropertyBundle::new()));
/// library.register("I open {url}", "open").expect("well formed");
/// library.register("I open the home page", "home").expect("well formed");
///
/// let found = library.find("Given I open the home page").expect("a match");
/// assert_eq!(*found.payload, "home");
/// let found = library.find("When I open 'http://x'").expect("a match");
/// assert_eq!(found.args[0].value, "http://x");
/// ```
pub struct StepLibrary<T> {
    config: Arc<dyn ConfigProvider>,
    limits: MatchLimits,
    entries: Vec<Entry<T>>,
}

impl<T> fmt::Debug for StepLibrary<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepLibrary")
            .field("limits", &self.limits)
            .field("definitions", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<T> StepLibrary<T> {
    /// Create an empty library reading keyword synonyms from `config`.
    #[must_use]
    pub fn new(config: Arc<dyn ConfigProvider>) -> Self {
        Self {
            config,
            limits: MatchLimits::default(),
            entries: Vec::new(),
        }
    }

    /// Replace the input size limits applied by [`find`](Self::find).
    #[must_use]
    pub fn with_limits(mut self, limits: MatchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Validate `definition` and add it with `payload`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] when the definition is malformed; the library
    /// is left unchanged.
    pub fn register(&mut self, definition: &str, payload: T) -> Result<(), PatternError> {
        let definition = StepDefinition::parse(definition).inspect_err(|err| {
            debug!(definition, %err, "rejected step definition");
        })?;
        let specificity = SpecificityScore::of(&definition);
        self.entries.push(Entry {
            definition,
            specificity,
            payload,
        });
        Ok(())
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no definitions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered definitions in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &StepDefinition> {
        self.entries.iter().map(|entry| &entry.definition)
    }

    /// Find the definition matching `call`.
    ///
    /// When several match, the most specific wins; among equally specific
    /// definitions the one registered first wins.
    #[must_use]
    pub fn find(&self, call: &str) -> Option<StepMatch<'_, T>> {
        let matcher = DefinitionMatcher::new(self.config.as_ref()).with_limits(self.limits);
        let mut best: Option<(&Entry<T>, Vec<Argument>)> = None;
        for entry in &self.entries {
            if best
                .as_ref()
                .is_some_and(|(current, _)| current.specificity >= entry.specificity)
            {
                continue;
            }
            if let Some(args) = matcher.match_args(&entry.definition, call) {
                best = Some((entry, args));
            }
        }
        best.map(|(entry, args)| StepMatch {
            definition: &entry.definition,
            payload: &entry.payload,
            args,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PropertyBundle;

    fn library_of(definitions: &[(&str, u32)]) -> StepLibrary<u32> {
        let mut library = StepLibrary::new(Arc::new(PropertyBundle::new()));
        for (definition, payload) in definitions {
            if let Err(err) = library.register(definition, *payload) {
                panic!("definition {definition:?} should register: {err}");
            }
        }
        library
    }

    fn found(library: &StepLibrary<u32>, call: &str) -> Option<u32> {
        library.find(call).map(|m| *m.payload)
    }

    #[test]
    fn prefers_more_specific_definition() {
        let library = library_of(&[("the total is {n}", 1), ("the total is 5", 2)]);
        assert_eq!(found(&library, "Then the total is 5"), Some(2));
        assert_eq!(found(&library, "Then the total is 6"), Some(1));
    }

    #[test]
    fn earlier_registration_breaks_ties() {
        let library = library_of(&[
            ("copy {a} to {b}", 1),
            ("copy {1} to {0}", 2),
            ("copy {x} to {y}", 3),
        ]);
        assert_eq!(found(&library, "copy 'a' to 'b'"), Some(2));

        let library = library_of(&[("copy {a} to {b}", 1), ("copy {x} to {y}", 3)]);
        assert_eq!(found(&library, "copy 'a' to 'b'"), Some(1));
    }

    #[test]
    fn returns_none_without_match() {
        let library = library_of(&[("I log out", 1)]);
        assert_eq!(found(&library, "I log in"), None);
    }

    #[test]
    fn rejects_malformed_definitions() {
        let mut library = library_of(&[]);
        assert!(library.register("broken {", 1).is_err());
        assert!(library.is_empty());
        assert!(library.register("fine {x}", 1).is_ok());
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn match_carries_definition_and_args() {
        let library = library_of(&[("put {1} into {0}", 7)]);
        let Some(step) = library.find("When put 'a' into [1]") else {
            panic!("call should match");
        };
        assert_eq!(step.definition.as_str(), "put {1} into {0}");
        let values: Vec<_> = step.args.iter().map(|a| a.value.as_str()).collect();
        assert_eq!(values, ["[1]", "a"]);
    }

    #[test]
    fn lookups_follow_shared_configuration() {
        let config = Arc::new(PropertyBundle::new());
        let mut library = StepLibrary::new(Arc::clone(&config) as Arc<dyn ConfigProvider>);
        assert!(library.register("Given I log in", ()).is_ok());

        assert!(library.find("Assume I log in").is_none());
        config.set_property("Given", "Assume");
        assert!(library.find("Assume I log in").is_some());
    }
}
