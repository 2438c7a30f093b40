//! Argument shape classification.
//!
//! Every extracted argument is tagged with the [`ParamType`] whose shape it
//! matches. The shapes are tested in [`CLASSIFICATION_ORDER`]; a quoted
//! numeric-looking value must come out as a string, so the string, map and
//! list shapes are consulted before the numeric ones.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

const MAP_PATTERN: &str = r"\{.*\}";
const LIST_PATTERN: &str = r"\[.*\]";
const STRING_PATTERN: &str = r#"'(?:[^\\']|\\\\|\\')*'|"(?:[^\\"]|\\\\|\\")*""#;
const LONG_PATTERN: &str = r"[-+]?\d+";
const DOUBLE_PATTERN: &str = r"[-+]?\d+(?:\.\d+)?";
const ANY_PATTERN: &str = r".*";
const OPTIONAL_PATTERN: &str = r"\(\?:.*\)\?";

/// Alternation of every legal argument token, in priority order.
///
/// `LONG` is absent on purpose: the `DOUBLE` shape accepts integers too, and
/// listing `LONG` first would split `12.5` into `12` and `.5`.
const COMBINED_VALUE_PATTERN: &str = concat!(
    r"(?:",
    r"\{.*\}",
    "|",
    r"\[.*\]",
    "|",
    r#"'(?:[^\\']|\\\\|\\')*'|"(?:[^\\"]|\\\\|\\")*""#,
    "|",
    r"[-+]?\d+(?:\.\d+)?",
    ")"
);

/// Shape of an argument token extracted from a step call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// A single- or double-quoted string literal.
    String,
    /// A brace-delimited mapping literal such as `{a:1}`.
    Map,
    /// A bracket-delimited list literal such as `[1,2,3]`.
    List,
    /// A signed integer.
    Long,
    /// A signed integer or decimal number.
    Double,
    /// Anything that matched no other shape.
    Any,
    /// An absent argument.
    Optional,
}

/// The fixed order in which shapes are tested by [`ParamType::classify`].
///
/// `ANY` is the fallback and `OPTIONAL` is reserved for absent input, so
/// neither appears here.
pub const CLASSIFICATION_ORDER: [ParamType; 5] = [
    ParamType::Map,
    ParamType::List,
    ParamType::String,
    ParamType::Long,
    ParamType::Double,
];

static CLASSIFIERS: LazyLock<Vec<(Regex, ParamType)>> = LazyLock::new(|| {
    CLASSIFICATION_ORDER
        .iter()
        .map(|ty| {
            let anchored = format!("^(?:{})$", ty.value_pattern());
            let re = Regex::new(&anchored).unwrap_or_else(|_| unreachable!());
            (re, *ty)
        })
        .collect()
});

impl ParamType {
    /// Canonical upper-case tag, as reported to dispatchers.
    ///
    /// # Examples
    /// ```
    /// use stepmatch::ParamType;
    /// assert_eq!(ParamType::Double.as_str(), "DOUBLE");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Map => "MAP",
            Self::List => "LIST",
            Self::Long => "LONG",
            Self::Double => "DOUBLE",
            Self::Any => "ANY",
            Self::Optional => "OPTIONAL",
        }
    }

    /// Regular-expression source recognising this shape (unanchored).
    #[must_use]
    pub const fn value_pattern(self) -> &'static str {
        match self {
            Self::String => STRING_PATTERN,
            Self::Map => MAP_PATTERN,
            Self::List => LIST_PATTERN,
            Self::Long => LONG_PATTERN,
            Self::Double => DOUBLE_PATTERN,
            Self::Any => ANY_PATTERN,
            Self::Optional => OPTIONAL_PATTERN,
        }
    }

    /// Declared parameter signature an implementation method uses for this shape.
    #[must_use]
    pub const fn arg_signature(self) -> &'static str {
        match self {
            Self::String => "String str",
            Self::Map => "Map<Object,Object> mapObj",
            Self::List => "Object[] objArray",
            Self::Long => "long l",
            Self::Double => "double d",
            Self::Any => "Object anyObj",
            Self::Optional => "Object optionalObj",
        }
    }

    /// Classify the literal shape of `value`.
    ///
    /// `None` yields [`ParamType::Optional`]. Otherwise the first shape in
    /// [`CLASSIFICATION_ORDER`] matching the whole value wins, falling back to
    /// [`ParamType::Any`].
    ///
    /// # Examples
    /// ```
    /// use stepmatch::ParamType;
    /// assert_eq!(ParamType::classify(Some("'12'")), ParamType::String);
    /// assert_eq!(ParamType::classify(Some("12")), ParamType::Long);
    /// assert_eq!(ParamType::classify(Some("12.5")), ParamType::Double);
    /// assert_eq!(ParamType::classify(None), ParamType::Optional);
    /// ```
    #[must_use]
    pub fn classify(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::Optional;
        };
        CLASSIFIERS
            .iter()
            .find(|(re, _)| re.is_match(value))
            .map_or(Self::Any, |(_, ty)| *ty)
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alternation matching any legal argument token inside a larger string.
///
/// The group is non-capturing so it can be embedded in other patterns
/// without shifting their capture indices.
#[must_use]
pub const fn combined_value_regex() -> &'static str {
    COMBINED_VALUE_PATTERN
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("'text'", ParamType::String)]
    #[case("\"text\"", ParamType::String)]
    #[case("'it\\'s'", ParamType::String)]
    #[case("'12'", ParamType::String)]
    #[case("{a:1}", ParamType::Map)]
    #[case("{'a':[1,2]}", ParamType::Map)]
    #[case("[1,2,3]", ParamType::List)]
    #[case("123", ParamType::Long)]
    #[case("-7", ParamType::Long)]
    #[case("12.5", ParamType::Double)]
    #[case("+0.25", ParamType::Double)]
    #[case("free form", ParamType::Any)]
    #[case("12.", ParamType::Any)]
    #[case("", ParamType::Any)]
    fn classifies_by_shape(#[case] value: &str, #[case] expected: ParamType) {
        assert_eq!(ParamType::classify(Some(value)), expected);
    }

    #[test]
    fn absent_value_is_optional() {
        assert_eq!(ParamType::classify(None), ParamType::Optional);
    }

    #[test]
    fn unterminated_quote_is_not_a_string() {
        assert_eq!(ParamType::classify(Some("'open")), ParamType::Any);
    }

    #[test]
    fn combined_regex_preserves_priority_order() {
        let expected = format!(
            "(?:{}|{}|{}|{})",
            ParamType::Map.value_pattern(),
            ParamType::List.value_pattern(),
            ParamType::String.value_pattern(),
            ParamType::Double.value_pattern(),
        );
        assert_eq!(combined_value_regex(), expected);
    }

    #[test]
    fn combined_regex_keeps_decimals_whole() {
        #[expect(clippy::expect_used, reason = "test regex must compile")]
        let re = Regex::new(combined_value_regex()).expect("combined regex compiles");
        let found = re.find("value 12.5 here").map(|m| m.as_str());
        assert_eq!(found, Some("12.5"));
    }

    #[test]
    fn tags_render_upper_case() {
        assert_eq!(ParamType::Map.to_string(), "MAP");
        assert_eq!(ParamType::Optional.as_str(), "OPTIONAL");
        assert_eq!(ParamType::Long.arg_signature(), "long l");
    }
}
