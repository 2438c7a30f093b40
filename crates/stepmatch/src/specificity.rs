//! Definition specificity for choosing between overlapping matches.
//!
//! When several definitions accept the same call, the one with the most
//! literal text is preferred; placeholder counts break ties.

use crate::errors::PatternError;
use crate::pattern::{StepDefinition, Token};
use std::cmp::Ordering;

/// Specificity score for a step definition.
///
/// # Ordering
///
/// Definitions are compared by:
/// 1. More literal characters → more specific
/// 2. Fewer placeholders → more specific
/// 3. More explicitly indexed placeholders → more specific (tiebreaker)
///
/// # Examples
///
/// ```
/// use stepmatch::SpecificityScore;
///
/// let specific = SpecificityScore::calculate("the total is 5")
///     .expect("valid specific definition");
/// let generic = SpecificityScore::calculate("the total is {n}")
///     .expect("valid generic definition");
/// assert!(specific > generic);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecificityScore {
    /// Literal characters in the definition, after unescaping.
    pub literal_chars: usize,
    /// Number of placeholders.
    pub placeholder_count: usize,
    /// Placeholders carrying an explicit output index, e.g. `{0}`.
    pub indexed_placeholder_count: usize,
}

impl SpecificityScore {
    /// Calculate the score for a definition string.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the definition is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepmatch::SpecificityScore;
    ///
    /// let score = SpecificityScore::calculate("I have {0:count} apples")
    ///     .expect("valid definition");
    /// assert_eq!(score.literal_chars, 14); // "I have " + " apples"
    /// assert_eq!(score.placeholder_count, 1);
    /// assert_eq!(score.indexed_placeholder_count, 1);
    /// ```
    pub fn calculate(definition: &str) -> Result<Self, PatternError> {
        StepDefinition::parse(definition).map(|def| Self::of(&def))
    }

    /// Score an already parsed definition.
    #[must_use]
    pub fn of(definition: &StepDefinition) -> Self {
        let mut score = Self::default();
        for token in definition.tokens() {
            match token {
                Token::Literal(text) => score.literal_chars += text.chars().count(),
                Token::Placeholder(placeholder) => {
                    score.placeholder_count += 1;
                    if placeholder.index.is_some() {
                        score.indexed_placeholder_count += 1;
                    }
                }
            }
        }
        score
    }
}

impl Ord for SpecificityScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.literal_chars
            .cmp(&other.literal_chars)
            .then_with(|| other.placeholder_count.cmp(&self.placeholder_count))
            .then_with(|| {
                self.indexed_placeholder_count
                    .cmp(&other.indexed_placeholder_count)
            })
    }
}

impl PartialOrd for SpecificityScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
