//! Convert lexed tokens into regular-expression sources.

use crate::param_type::combined_value_regex;
use regex::{Regex, RegexBuilder};

use super::lexer::Token;

/// Ceiling on the compiled size of any definition pattern, in bytes.
///
/// Each placeholder compiles to a sizeable automaton, so definitions dense
/// with placeholders reach this ceiling long before the input length limit;
/// [`StepDefinition::parse`](super::StepDefinition::parse) rejects them.
pub const MAX_COMPILED_PATTERN_SIZE: usize = 32 * (1 << 20);

/// Compile `source` with the settings shared by validation and matching.
pub(crate) fn build_regex(source: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(source)
        .case_insensitive(true)
        .size_limit(MAX_COMPILED_PATTERN_SIZE)
        .build()
}

/// The literals around one placeholder and the pattern taking its value.
#[derive(Debug, Clone)]
pub(crate) struct Segment {
    /// Literal text directly before the placeholder.
    pub(crate) lead: String,
    /// Literal text directly after the placeholder.
    pub(crate) boundary: String,
    /// One argument token followed by `boundary`, captured as group 1.
    pub(crate) value: Regex,
}

/// Compile one [`Segment`] per placeholder, in textual order.
pub(crate) fn segments(tokens: &[Token]) -> Result<Vec<Segment>, regex::Error> {
    let literal_at = |index: Option<usize>| match index.and_then(|i| tokens.get(i)) {
        Some(Token::Literal(text)) => text.as_str(),
        _ => "",
    };
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| matches!(token, Token::Placeholder(_)))
        .map(|(i, _)| {
            let boundary = literal_at(i.checked_add(1));
            build_regex(&bounded_value_source(boundary)).map(|value| Segment {
                lead: literal_at(i.checked_sub(1)).to_owned(),
                boundary: boundary.to_owned(),
                value,
            })
        })
        .collect()
}

fn bounded_value_source(boundary: &str) -> String {
    format!("({}){}", combined_value_regex(), regex::escape(boundary))
}

/// Build the structural body of a definition: literals escaped, every
/// placeholder replaced by the combined argument-value alternation.
///
/// The result carries no anchors and no keyword prefix; see
/// [`call_regex_source`].
pub(crate) fn body_regex_source(tokens: &[Token]) -> String {
    let mut regex = String::new();
    for token in tokens {
        match token {
            Token::Literal(text) => regex.push_str(&regex::escape(text)),
            Token::Placeholder(_) => regex.push_str(combined_value_regex()),
        }
    }
    regex
}

/// Wrap a definition body with the optional keyword prefix and anchors.
///
/// The caller compiles the result case-insensitively.
pub(crate) fn call_regex_source(keyword_alternation: &str, body: &str) -> String {
    format!(r"^(?:(?:{keyword_alternation})\s)?(?:{body})$")
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests exercise lexing fallibility")]
mod tests {
    use super::*;
    use crate::pattern::lexer::lex_definition;

    #[test]
    fn escapes_literals_and_substitutes_placeholders() {
        let tokens = lex_definition("total (net) is {amount}").unwrap();
        assert_eq!(
            body_regex_source(&tokens),
            format!(r"total \(net\) is {}", combined_value_regex())
        );
    }

    #[test]
    fn wraps_body_with_keyword_prefix() {
        assert_eq!(
            call_regex_source("Given|When", "a b"),
            r"^(?:(?:Given|When)\s)?(?:a b)$"
        );
    }

    #[test]
    fn builds_one_segment_per_placeholder() {
        let tokens = lex_definition("copy {a} to {b}").unwrap();
        let segments = segments(&tokens).unwrap();
        let literals: Vec<_> = segments
            .iter()
            .map(|s| (s.lead.as_str(), s.boundary.as_str()))
            .collect();
        assert_eq!(literals, [("copy ", " to "), (" to ", "")]);
        let first = segments.first().unwrap();
        let caps = first.value.captures("'x' TO 'y'").unwrap();
        assert_eq!(caps.get(1).map(|m| m.as_str()), Some("'x'"));
    }

    #[test]
    fn shared_builder_ignores_case() {
        let re = build_regex("^abc$").unwrap();
        assert!(re.is_match("ABC"));
    }
}
