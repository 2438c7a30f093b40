//! Rendering definitions with concrete argument values for reports.

use crate::pattern::scan_placeholders;
use std::fmt::Display;

/// Fill each placeholder of `definition`, in textual order, with the
/// positional value wrapped in single quotes.
///
/// The definition is returned unchanged when `values` is empty, when its
/// length differs from the number of placeholders, or when the definition
/// is malformed. Text outside the placeholders, escapes included, is kept
/// as written.
///
/// # Examples
/// ```
/// use stepmatch::format_definition;
///
/// assert_eq!(format_definition("set {value} to {name}", &[&5, &"x"]), "set '5' to 'x'");
/// assert_eq!(format_definition("set {a}{b}", &[&1]), "set {a}{b}");
/// ```
#[must_use]
pub fn format_definition(definition: &str, values: &[&dyn Display]) -> String {
    let Ok(placeholders) = scan_placeholders(definition) else {
        return definition.to_owned();
    };
    if values.is_empty() || values.len() != placeholders.len() {
        return definition.to_owned();
    }

    let mut out = String::with_capacity(definition.len());
    let mut copied = 0;
    for (placeholder, value) in placeholders.iter().zip(values) {
        out.push_str(definition.get(copied..placeholder.start).unwrap_or_default());
        out.push('\'');
        out.push_str(&value.to_string());
        out.push('\'');
        copied = placeholder.end;
    }
    out.push_str(definition.get(copied..).unwrap_or_default());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_placeholders_in_order() {
        assert_eq!(
            format_definition("set {value} to {name}", &[&5, &"x"]),
            "set '5' to 'x'"
        );
    }

    #[test]
    fn fills_adjacent_and_repeated_tokens_positionally() {
        assert_eq!(
            format_definition("{a}{a} and {a}", &[&1, &2.5, &"z"]),
            "'1''2.5' and 'z'"
        );
    }

    #[test]
    fn keeps_escaped_braces_untouched() {
        assert_eq!(format_definition(r"\{v} is {v}", &[&"n"]), r"\{v} is 'n'");
    }

    #[test]
    fn count_mismatch_returns_definition() {
        assert_eq!(format_definition("set {a}{b}", &[&1]), "set {a}{b}");
        assert_eq!(format_definition("set {a}", &[&1, &2]), "set {a}");
    }

    #[test]
    fn empty_values_return_definition() {
        assert_eq!(format_definition("I log out", &[]), "I log out");
        assert_eq!(format_definition("set {a}", &[]), "set {a}");
    }

    #[test]
    fn malformed_definition_is_returned_unchanged() {
        assert_eq!(format_definition("set {a", &[&1]), "set {a");
    }
}
