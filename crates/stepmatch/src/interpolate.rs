//! Variable interpolation for step calls and stored definitions.
//!
//! Two reference syntaxes are understood. Angle-bracket parameters such as
//! `<user>` (the form used by outline examples) are first rewritten to
//! `${user}`; every `${name}` is then resolved against a call-local context,
//! falling back to the configuration provider's properties.
//!
//! Resolution rules:
//! - an unknown name is left as the literal `${name}`;
//! - a `${` directly after a double quote in the input is quoted text, not a
//!   reference;
//! - `$${name}` produces the literal text `${name}`;
//! - resolved values are interpolated in turn, and a reference cycle is
//!   left unresolved.

use crate::config::{ConfigProvider, value_text};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::warn;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+").unwrap_or_else(|_| unreachable!()));

static BARE_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$\{[\w.]*\}$").unwrap_or_else(|_| unreachable!()));

/// Rewrite `<name>` parameters to `${name}`.
///
/// A `<` preceded by a backslash is not a parameter; the backslash is
/// dropped so `\<` comes out as a plain `<`. A `<` with no closing `>` on
/// the same line, or directly followed by `>`, is kept as written.
///
/// # Examples
/// ```
/// use stepmatch::convert_placeholder_syntax;
///
/// assert_eq!(convert_placeholder_syntax(r"a <x> and \<y>"), "a ${x} and <y>");
/// assert_eq!(convert_placeholder_syntax("1 < 2"), "1 < 2");
/// ```
#[must_use]
pub fn convert_placeholder_syntax(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(['\\', '<']) {
        let (before, tail) = rest.split_at(pos);
        out.push_str(before);
        if let Some(after) = tail.strip_prefix("\\<") {
            out.push('<');
            rest = after;
        } else if let Some(after) = tail.strip_prefix('<') {
            let name = angle_parameter(after);
            out.push_str(&name.map_or_else(|| "<".to_owned(), |name| format!("${{{name}}}")));
            rest = name.map_or(after, |name| {
                after.get(name.len() + 1..).unwrap_or_default()
            });
        } else {
            out.push('\\');
            rest = tail.get(1..).unwrap_or_default();
        }
    }
    out.push_str(rest);
    out
}

/// The name of an angle-bracket parameter whose `<` has been consumed.
fn angle_parameter(after: &str) -> Option<&str> {
    let close = after.find('>')?;
    let name = after.get(..close)?;
    (!name.is_empty() && !name.contains('\n')).then_some(name)
}

/// Resolve variable references in `text`.
///
/// Names are looked up in `context` first and then through
/// [`ConfigProvider::property`]. Values are substituted with
/// [`value_text`]: strings verbatim, anything else as compact JSON. Text
/// without escapes is stable under repeated interpolation.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use std::collections::HashMap;
/// use stepmatch::{PropertyBundle, interpolate};
///
/// let config = PropertyBundle::from_pairs([("env", "qa")]);
/// let context = HashMap::from([("h".to_owned(), json!("a.b"))]);
///
/// assert_eq!(interpolate("host=${h}", &context, &config), "host=a.b");
/// assert_eq!(interpolate("on <env>", &context, &config), "on qa");
/// assert_eq!(interpolate("${missing}", &context, &config), "${missing}");
/// ```
#[must_use]
pub fn interpolate(
    text: &str,
    context: &HashMap<String, Value>,
    config: &dyn ConfigProvider,
) -> String {
    let resolver = Resolver { context, config };
    let mut active = Vec::new();
    resolver.substitute(
        &convert_placeholder_syntax(text),
        Quoting::Protect,
        &mut active,
    )
}

/// Whether `"${` in the text being substituted is protected from resolution.
///
/// Only the caller's text is protected; resolved values are expanded in full.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Quoting {
    Protect,
    Expand,
}

struct Resolver<'a> {
    context: &'a HashMap<String, Value>,
    config: &'a dyn ConfigProvider,
}

impl Resolver<'_> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.context
            .get(name)
            .cloned()
            .or_else(|| self.config.property(name))
            .map(|value| value_text(&value))
    }

    /// Substitute every reference in `text`; `active` holds the names being
    /// resolved further up the stack.
    fn substitute(&self, text: &str, quoting: Quoting, active: &mut Vec<String>) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(pos) = rest.find('$') {
            let (before, tail) = rest.split_at(pos);
            let offset = text.len() - tail.len();
            let quoted = quoting == Quoting::Protect
                && text.get(..offset).is_some_and(|source| source.ends_with('"'));
            out.push_str(before);

            if let Some(after) = tail.strip_prefix("$${") {
                out.push_str("${");
                rest = after;
            } else if let Some(after) = tail.strip_prefix("${") {
                match after.split_once('}') {
                    Some((name, remainder)) if !quoted => {
                        out.push_str(&self.reference(name, active));
                        rest = remainder;
                    }
                    _ => {
                        out.push_str("${");
                        rest = after;
                    }
                }
            } else {
                out.push('$');
                rest = tail.get(1..).unwrap_or_default();
            }
        }
        out.push_str(rest);
        out
    }

    fn reference(&self, name: &str, active: &mut Vec<String>) -> String {
        let verbatim = || format!("${{{name}}}");
        let Some(value) = self.lookup(name) else {
            return verbatim();
        };
        if active.iter().any(|seen| seen == name) {
            warn!(name, chain = ?active, "variable reference cycle left unresolved");
            return verbatim();
        }
        active.push(name.to_owned());
        let resolved = self.substitute(&value, Quoting::Expand, active);
        active.pop();
        resolved
    }
}

/// Wrap every whitespace-delimited `${name}` in single quotes so the value
/// substituted later parses as a string argument.
///
/// # Examples
/// ```
/// use stepmatch::quote_params;
///
/// assert_eq!(quote_params("set ${x} now"), "set '${x}' now");
/// assert_eq!(quote_params("keep pre${x} as is"), "keep pre${x} as is");
/// ```
#[must_use]
pub fn quote_params(call: &str) -> String {
    WORD.replace_all(call, |caps: &regex::Captures<'_>| {
        let word = caps.get(0).map_or("", |m| m.as_str());
        if BARE_REFERENCE.is_match(word) {
            format!("'{word}'")
        } else {
            word.to_owned()
        }
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PropertyBundle;
    use rstest::rstest;
    use serde_json::json;

    fn context(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    #[rstest]
    #[case(r"a <x> and \<y>", "a ${x} and <y>")]
    #[case("<a.b> and <c>", "${a.b} and ${c}")]
    #[case("p<a>ra", "p${a}ra")]
    #[case("x <> y", "x <> y")]
    #[case("open <", "open <")]
    #[case(r"path C:\dir", r"path C:\dir")]
    #[case(r"\\<x>", r"\<x>")]
    fn converts_angle_parameters(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(convert_placeholder_syntax(input), expected);
    }

    #[test]
    fn context_takes_precedence_over_properties() {
        let config = PropertyBundle::from_pairs([("h", "from-config"), ("p", "8080")]);
        let ctx = context(&[("h", json!("from-context"))]);
        assert_eq!(interpolate("${h}:${p}", &ctx, &config), "from-context:8080");
    }

    #[rstest]
    #[case(json!(5), "n=5")]
    #[case(json!(true), "n=true")]
    #[case(json!(null), "n=null")]
    #[case(json!([1, "a"]), r#"n=[1,"a"]"#)]
    #[case(json!({"k": 1}), r#"n={"k":1}"#)]
    fn serialises_non_string_values(#[case] value: Value, #[case] expected: &str) {
        let config = PropertyBundle::new();
        assert_eq!(interpolate("n=${n}", &context(&[("n", value)]), &config), expected);
    }

    #[test]
    fn unresolved_reference_is_left_verbatim_and_stable() {
        let config = PropertyBundle::new();
        let ctx = context(&[("a", json!("1"))]);
        let once = interpolate("${a} ${missing}", &ctx, &config);
        assert_eq!(once, "1 ${missing}");
        assert_eq!(interpolate(&once, &ctx, &config), once);
    }

    #[test]
    fn quoted_reference_is_not_resolved() {
        let config = PropertyBundle::new();
        let ctx = context(&[("x", json!("v"))]);
        assert_eq!(
            interpolate(r#"say "${x}" then ${x}"#, &ctx, &config),
            r#"say "${x}" then v"#
        );
    }

    #[test]
    fn value_ending_in_quote_does_not_protect_next_reference() {
        let config = PropertyBundle::new();
        let ctx = context(&[("a", json!("say \"")), ("b", json!("B"))]);
        assert_eq!(interpolate("${a}${b}", &ctx, &config), "say \"B");
    }

    #[test]
    fn quoted_references_inside_resolved_values_are_expanded() {
        let config = PropertyBundle::from_pairs([("inner", "v"), ("outer", "\"${inner}\"")]);
        assert_eq!(
            interpolate("x=${outer} y=\"${outer}\"", &HashMap::new(), &config),
            "x=\"v\" y=\"${outer}\""
        );
    }

    #[test]
    fn quoted_angle_parameter_is_not_resolved() {
        let config = PropertyBundle::new();
        let ctx = context(&[("x", json!("v"))]);
        assert_eq!(interpolate(r#"a "<x>""#, &ctx, &config), r#"a "${x}""#);
    }

    #[test]
    fn double_dollar_escapes_reference() {
        let config = PropertyBundle::new();
        let ctx = context(&[("x", json!("v"))]);
        assert_eq!(interpolate("$${x} is ${x}", &ctx, &config), "${x} is v");
    }

    #[test]
    fn lone_dollar_and_unclosed_reference_are_literal() {
        let config = PropertyBundle::new();
        let ctx = context(&[("x", json!("v"))]);
        assert_eq!(interpolate("cost $5 and ${x", &ctx, &config), "cost $5 and ${x");
    }

    #[test]
    fn resolves_nested_property_references() {
        let config = PropertyBundle::from_pairs([("base", "http://h"), ("url", "${base}/login")]);
        assert_eq!(
            interpolate("open ${url}", &HashMap::new(), &config),
            "open http://h/login"
        );
    }

    #[test]
    fn reference_cycle_is_left_unresolved() {
        let config = PropertyBundle::from_pairs([("a", "x${b}"), ("b", "y${a}")]);
        assert_eq!(interpolate("${a}", &HashMap::new(), &config), "xy${a}");
    }

    #[test]
    fn observes_property_edits() {
        let config = PropertyBundle::new();
        let ctx = HashMap::new();
        assert_eq!(interpolate("${k}", &ctx, &config), "${k}");
        config.set_property("k", "v");
        assert_eq!(interpolate("${k}", &ctx, &config), "v");
    }

    #[rstest]
    #[case("set ${x} now", "set '${x}' now")]
    #[case("${a.b}", "'${a.b}'")]
    #[case("${a} ${b}", "'${a}' '${b}'")]
    #[case("pre${x}", "pre${x}")]
    #[case("'${x}'", "'${x}'")]
    #[case("${x y}", "${x y}")]
    fn quotes_bare_references(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(quote_params(input), expected);
    }
}
