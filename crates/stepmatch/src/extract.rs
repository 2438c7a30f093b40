//! Argument extraction: aligning placeholders with substrings of a call.
//!
//! Extraction walks the definition's placeholders in order while a single
//! cursor moves forward through the call. For each placeholder the literal
//! text leading up to it is located and skipped, then the first legal
//! argument token followed by the next literal ("boundary") is taken as the
//! value. When a boundary occurs more than once, the first occurrence wins.

use crate::param_type::ParamType;
use crate::pattern::StepDefinition;
use std::ops::Range;
use tracing::trace;

/// One argument extracted from a step call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// Argument text. Raw from [`raw_args`]; quote-stripped from
    /// [`args_from_call`].
    pub value: String,
    /// Shape of the raw text, classified before any quote stripping.
    pub param_type: ParamType,
}

impl Argument {
    /// Pair a value with its classified type.
    #[must_use]
    pub fn new(value: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            value: value.into(),
            param_type,
        }
    }
}

/// First occurrence of `needle` in `haystack`, ignoring case.
fn find_ignoring_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    haystack.char_indices().find_map(|(start, _)| {
        let len = caseless_prefix_len(haystack.get(start..)?, needle)?;
        Some(start..start + len)
    })
}

/// Byte length of the prefix of `text` equal to `prefix` ignoring case.
fn caseless_prefix_len(text: &str, prefix: &str) -> Option<usize> {
    let mut chars = text.chars();
    for expected in prefix.chars() {
        let actual = chars.next()?;
        if actual != expected && !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    Some(text.len() - chars.as_str().len())
}

/// Extract raw, classified arguments from `call` in placeholder order.
///
/// Returns `None` when any lead text, boundary text or bounded value cannot be
/// located; callers treat that as a structural mismatch.
///
/// # Examples
/// ```
/// use stepmatch::{ParamType, StepDefinition, raw_args};
///
/// let def = StepDefinition::parse("set {value} to {name}").expect("well formed");
/// let args = raw_args(&def, "set 5 to 'x'").expect("call conforms");
/// assert_eq!(args[0].value, "5");
/// assert_eq!(args[1].value, "'x'");
/// assert_eq!(args[1].param_type, ParamType::String);
/// ```
#[must_use]
pub fn raw_args(definition: &StepDefinition, call: &str) -> Option<Vec<Argument>> {
    let mut cursor = 0usize;
    let mut args = Vec::new();

    for segment in definition.segments() {
        let (lead, boundary) = (segment.lead.as_str(), segment.boundary.as_str());
        if !lead.is_empty() {
            let remaining = call.get(cursor..)?;
            let Some(found) = find_ignoring_case(remaining, lead) else {
                trace!(lead, call, "lead text not found in call");
                return None;
            };
            cursor += found.end;
        }

        let remaining = call.get(cursor..)?;
        if !boundary.is_empty() && find_ignoring_case(remaining, boundary).is_none() {
            trace!(boundary, call, "boundary text not found in call");
            return None;
        }

        let Some(value) = segment
            .value
            .captures(remaining)
            .and_then(|caps| caps.get(1))
        else {
            trace!(boundary, call, "no argument value before boundary");
            return None;
        };
        let raw = value.as_str();
        args.push(Argument::new(raw, ParamType::classify(Some(raw))));
        cursor += value.end();
    }

    Some(args)
}

/// Extract arguments in the order the implementation expects.
///
/// Placeholders carrying an explicit index (`{1}`, `{0:name}`) move their
/// value to that position; the rest keep their textual position. Quoted
/// values are then unwrapped with [`process_arg`]. An explicit index outside
/// the argument range fails extraction.
///
/// # Examples
/// ```
/// use stepmatch::{StepDefinition, args_from_call};
///
/// let def = StepDefinition::parse("copy {1} from {0}").expect("well formed");
/// let args = args_from_call(&def, "copy 'b.txt' from 'dir'").expect("call conforms");
/// let values: Vec<_> = args.iter().map(|a| a.value.as_str()).collect();
/// assert_eq!(values, ["dir", "b.txt"]);
/// ```
#[must_use]
pub fn args_from_call(definition: &StepDefinition, call: &str) -> Option<Vec<Argument>> {
    let natural: Vec<Argument> = raw_args(definition, call)?
        .into_iter()
        .map(|arg| Argument {
            value: process_arg(&arg.value),
            ..arg
        })
        .collect();

    let mut ordered = natural.clone();
    for (position, placeholder) in definition.placeholders().enumerate() {
        let target = placeholder.index.unwrap_or(position);
        let Some(slot) = ordered.get_mut(target) else {
            trace!(
                token = placeholder.token.as_str(),
                target,
                "explicit argument index out of range"
            );
            return None;
        };
        *slot = natural.get(position)?.clone();
    }
    Some(ordered)
}

/// Strip one layer of matching single or double quotes and unescape the
/// matching escaped quote inside. Other values are returned unchanged.
///
/// # Examples
/// ```
/// use stepmatch::process_arg;
///
/// assert_eq!(process_arg(r"'it\'s'"), "it's");
/// assert_eq!(process_arg(r#""say \"hi\"""#), r#"say "hi""#);
/// assert_eq!(process_arg("'open"), "'open");
/// ```
#[must_use]
pub fn process_arg(value: &str) -> String {
    for quote in ['\'', '"'] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.replace(&format!("\\{quote}"), &quote.to_string());
        }
    }
    value.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn definition(text: &str) -> StepDefinition {
        match StepDefinition::parse(text) {
            Ok(def) => def,
            Err(err) => panic!("definition {text:?} should parse: {err}"),
        }
    }

    fn values(args: Option<Vec<Argument>>) -> Option<Vec<String>> {
        args.map(|list| list.into_iter().map(|a| a.value).collect())
    }

    #[test]
    fn extracts_raw_values_with_types() {
        let def = definition("store {map} and {list} as {n}");
        let args = raw_args(&def, "store {a:1} and [1,2] as 3.5");
        assert_eq!(
            args,
            Some(vec![
                Argument::new("{a:1}", ParamType::Map),
                Argument::new("[1,2]", ParamType::List),
                Argument::new("3.5", ParamType::Double),
            ])
        );
    }

    #[test]
    fn skips_leading_keyword_before_lead_text() {
        let def = definition("I am on {url}");
        let args = raw_args(&def, "Given I am on 'http://x'");
        assert_eq!(values(args), Some(vec!["'http://x'".to_owned()]));
    }

    #[test]
    fn lead_text_matches_case_insensitively() {
        let def = definition("I am on {url}");
        let args = raw_args(&def, "i AM on 'a'");
        assert_eq!(values(args), Some(vec!["'a'".to_owned()]));
    }

    #[test]
    fn quoted_value_may_contain_boundary_text() {
        let def = definition("{a} to {b}");
        let args = raw_args(&def, "'x to y' to 'z'");
        assert_eq!(
            values(args),
            Some(vec!["'x to y'".to_owned(), "'z'".to_owned()])
        );
    }

    #[test]
    fn map_value_extends_to_last_viable_boundary() {
        let def = definition("{a} and {b}");
        let args = raw_args(&def, "{p:1} and {q:2} and {r:3}");
        assert_eq!(
            values(args),
            Some(vec!["{p:1} and {q:2}".to_owned(), "{r:3}".to_owned()])
        );
    }

    #[rstest]
    #[case("set {v} now", "put 1 now")]
    #[case("set {v} now", "set 1 later")]
    #[case("set {v}", "set free text")]
    fn fails_when_structure_is_missing(#[case] def: &str, #[case] call: &str) {
        assert_eq!(raw_args(&definition(def), call), None);
    }

    #[test]
    fn reorders_by_explicit_index() {
        let def = definition("{1} goes after {0}");
        let args = args_from_call(&def, "'second' goes after 'first'");
        assert_eq!(
            values(args),
            Some(vec!["first".to_owned(), "second".to_owned()])
        );
    }

    #[test]
    fn later_placeholder_wins_duplicate_index() {
        let def = definition("{0} and {0:again} and {c}");
        let args = args_from_call(&def, "1 and 2 and 3");
        assert_eq!(
            values(args),
            Some(vec!["2".to_owned(), "2".to_owned(), "3".to_owned()])
        );
    }

    #[test]
    fn fails_on_out_of_range_index() {
        let def = definition("move {5}");
        assert_eq!(args_from_call(&def, "move 1"), None);
    }

    #[test]
    fn classification_sees_quotes_before_stripping() {
        let def = definition("count is {n}");
        let args = args_from_call(&def, "count is '42'");
        assert_eq!(args, Some(vec![Argument::new("42", ParamType::String)]));
    }

    #[rstest]
    #[case("I am on 'x'", "AM ON", Some(2..7))]
    #[case("straße", "STRASSE", None)]
    #[case("ÉTÉ chaud", "été", Some(0..5))]
    #[case("abc", "abcd", None)]
    #[case("a-b-c", "-c", Some(3..5))]
    fn finds_literals_ignoring_case(
        #[case] haystack: &str,
        #[case] needle: &str,
        #[case] expected: Option<Range<usize>>,
    ) {
        assert_eq!(find_ignoring_case(haystack, needle), expected);
    }

    #[test]
    fn boundary_text_matches_case_insensitively() {
        let def = definition("{a} TO {b}");
        let args = raw_args(&def, "'x' to 'y'");
        assert_eq!(values(args), Some(vec!["'x'".to_owned(), "'y'".to_owned()]));
    }

    #[rstest]
    #[case("'a'", "a")]
    #[case("\"a\"", "a")]
    #[case(r"'a\'b'", "a'b")]
    #[case(r#""a\"b""#, "a\"b")]
    #[case(r#"'"a"'"#, "\"a\"")]
    #[case("'", "'")]
    #[case("''", "")]
    #[case("plain", "plain")]
    fn strips_one_quote_layer(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(process_arg(raw), expected);
    }
}
