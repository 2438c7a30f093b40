//! Step-definition lexing and compilation helpers.

mod compiler;
mod lexer;
mod placeholder;

use crate::errors::PatternError;
use compiler::Segment;
use regex::RegexBuilder;

pub use compiler::MAX_COMPILED_PATTERN_SIZE;
pub(crate) use compiler::{build_regex, call_regex_source};
pub(crate) use lexer::Token;
pub use placeholder::Placeholder;

/// A step definition validated and tokenised once, up front.
///
/// Constructing one rejects malformed placeholder syntax, so a library of
/// definitions fails fast at registration instead of mismatching every call.
/// The per-placeholder value patterns are compiled here as well and reused by
/// every match.
///
/// # Examples
/// ```
/// use stepmatch::StepDefinition;
///
/// let def = StepDefinition::parse("set {value} to {name}")
///     .expect("definition is well formed");
/// assert_eq!(def.arg_names(), ["{value}", "{name}"]);
/// assert!(StepDefinition::parse("broken {value").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct StepDefinition {
    text: String,
    tokens: Vec<Token>,
    body: String,
    segments: Vec<Segment>,
}

impl PartialEq for StepDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for StepDefinition {}

impl StepDefinition {
    /// Tokenise `text` and check the structural pattern compiles.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Placeholder`] for malformed braces and
    /// [`PatternError::Regex`] when the generated pattern cannot be compiled,
    /// including when it exceeds [`MAX_COMPILED_PATTERN_SIZE`].
    pub fn parse(text: impl Into<String>) -> Result<Self, PatternError> {
        let text = text.into();
        let tokens = lexer::lex_definition(&text)?;
        let body = compiler::body_regex_source(&tokens);
        build_regex(&format!("^(?:{body})$"))?;
        let segments = compiler::segments(&tokens)?;
        Ok(Self {
            text,
            tokens,
            body,
            segments,
        })
    }

    /// The definition text as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Placeholders in textual order.
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.tokens.iter().filter_map(|token| match token {
            Token::Placeholder(placeholder) => Some(placeholder),
            Token::Literal(_) => None,
        })
    }

    /// Number of declared placeholders.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.placeholders().count()
    }

    /// Raw placeholder tokens in textual order, e.g. `["{url}"]`.
    #[must_use]
    pub fn arg_names(&self) -> Vec<String> {
        self.placeholders().map(|p| p.token.clone()).collect()
    }

    pub(crate) fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Structural body pattern without anchors or keyword prefix.
    pub(crate) fn body_source(&self) -> &str {
        &self.body
    }

    pub(crate) fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// A copy with a leading keyword (and the whitespace after it) removed
    /// from the first literal, or `None` when the definition does not start
    /// with one of `keyword_alternation`.
    ///
    /// Placeholder offsets keep referring to the original text.
    pub(crate) fn strip_leading_keyword(&self, keyword_alternation: &str) -> Option<Self> {
        let Some(Token::Literal(first)) = self.tokens.first() else {
            return None;
        };
        let re = RegexBuilder::new(&format!(r"^(?:{keyword_alternation})\s+"))
            .case_insensitive(true)
            .build()
            .ok()?;
        let rest = first.get(re.find(first)?.end()..)?.to_owned();
        let mut segments = self.segments.clone();
        if let Some(head) = segments.first_mut() {
            head.lead.clone_from(&rest);
        }
        let mut tokens = self.tokens.clone();
        if rest.is_empty() {
            tokens.remove(0);
        } else if let Some(head) = tokens.first_mut() {
            *head = Token::Literal(rest);
        }
        let body = compiler::body_regex_source(&tokens);
        Some(Self {
            text: self.text.clone(),
            tokens,
            body,
            segments,
        })
    }
}

impl TryFrom<&str> for StepDefinition {
    type Error = PatternError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Placeholder tokens of `definition` in textual order.
///
/// # Errors
///
/// Returns [`PatternError`] when the definition is malformed.
///
/// # Examples
/// ```
/// use stepmatch::arg_names;
///
/// let names = arg_names(r"put \{not} {item} in {0}").expect("well formed");
/// assert_eq!(names, ["{item}", "{0}"]);
/// ```
pub fn arg_names(definition: &str) -> Result<Vec<String>, PatternError> {
    Ok(scan_placeholders(definition)?
        .into_iter()
        .map(|placeholder| placeholder.token)
        .collect())
}

/// Placeholders of `definition` in textual order, without compiling a
/// pattern.
pub(crate) fn scan_placeholders(definition: &str) -> Result<Vec<Placeholder>, PatternError> {
    Ok(lexer::lex_definition(definition)?
        .into_iter()
        .filter_map(|token| match token {
            Token::Placeholder(placeholder) => Some(placeholder),
            Token::Literal(_) => None,
        })
        .collect())
}
