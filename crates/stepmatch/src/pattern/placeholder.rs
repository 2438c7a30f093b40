//! Placeholder parsing utilities used by the lexer.

use crate::errors::{PatternError, placeholder_error};

/// One `{…}` marker in a step definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Raw token text including both braces, e.g. `{url}` or `{1:name}`.
    pub token: String,
    /// Byte offset of the opening brace.
    pub start: usize,
    /// Byte offset just past the closing brace.
    pub end: usize,
    /// Output position forced by a leading number, e.g. `1` for `{1:name}`.
    pub index: Option<usize>,
}

/// Explicit output index encoded by a token whose first inner character is a
/// digit: the leading run of digits.
fn explicit_index(token: &str) -> Option<usize> {
    let digits: String = token
        .chars()
        .skip(1)
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Parse the placeholder whose opening brace sits at byte `start`.
///
/// A placeholder needs at least one character that is not `}` after the
/// opening brace and ends at the first `}` that follows.
pub(crate) fn parse_placeholder(text: &str, start: usize) -> Result<Placeholder, PatternError> {
    let rest = text.get(start..).unwrap_or_default();
    let mut chars = rest.char_indices().skip(1);
    match chars.next() {
        None => {
            return Err(placeholder_error(
                "missing closing '}' for placeholder",
                start,
                Some(rest.to_owned()),
            ));
        }
        Some((_, '}')) => {
            return Err(placeholder_error(
                "empty placeholder in step definition",
                start,
                Some("{}".to_owned()),
            ));
        }
        Some(_) => {}
    }

    let close = chars
        .find_map(|(offset, ch)| (ch == '}').then_some(offset))
        .ok_or_else(|| {
            placeholder_error(
                "missing closing '}' for placeholder",
                start,
                Some(rest.to_owned()),
            )
        })?;
    let end = start + close + 1;
    let token = text.get(start..end).unwrap_or_default().to_owned();
    let index = explicit_index(&token);
    Ok(Placeholder {
        token,
        start,
        end,
        index,
    })
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests exercise placeholder parser fallibility"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_basic_placeholder() {
        let parsed = parse_placeholder("on {url} now", 3).unwrap();
        assert_eq!(parsed.token, "{url}");
        assert_eq!((parsed.start, parsed.end), (3, 8));
        assert_eq!(parsed.index, None);
    }

    #[test]
    fn stops_at_first_closing_brace() {
        let parsed = parse_placeholder("{{a}}", 0).unwrap();
        assert_eq!(parsed.token, "{{a}");
    }

    #[rstest]
    #[case("{0}", Some(0))]
    #[case("{2:name}", Some(2))]
    #[case("{12th}", Some(12))]
    #[case("{name1}", None)]
    #[case("{-1}", None)]
    fn reads_explicit_index(#[case] text: &str, #[case] expected: Option<usize>) {
        assert_eq!(parse_placeholder(text, 0).unwrap().index, expected);
    }

    #[test]
    fn errors_on_missing_closing_brace() {
        let err = parse_placeholder("{value", 0).unwrap_err();
        assert!(err.to_string().contains("missing closing"));
    }

    #[test]
    fn errors_on_lone_trailing_brace() {
        let err = parse_placeholder("a {", 2).unwrap_err();
        assert!(err.to_string().contains("missing closing"));
    }

    #[test]
    fn errors_on_empty_placeholder() {
        let err = parse_placeholder("{}", 0).unwrap_err();
        assert!(err.to_string().contains("empty placeholder"));
    }

    #[test]
    fn handles_multibyte_content() {
        let parsed = parse_placeholder("é{café}", 2).unwrap();
        assert_eq!(parsed.token, "{café}");
        assert_eq!(parsed.end, "é{café}".len());
    }
}
