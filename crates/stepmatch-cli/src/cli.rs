//! Command-line argument definitions.

use clap::{Parser, Subcommand};

use crate::config::LogLevel;
use crate::error::CliError;

/// Match step calls against step definitions and resolve step variables.
#[derive(Parser, Debug)]
#[command(name = "stepmatch", version, about)]
pub(crate) struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Set a configuration property, e.g. `Given=GivenThat;Provided`.
    /// Overrides `STEPMATCH_PROP_*` variables of the same name.
    #[arg(
        long = "property",
        value_name = "KEY=VALUE",
        global = true,
        value_parser = parse_pair
    )]
    pub properties: Vec<(String, String)>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported commands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Match a call against a definition and print its arguments as JSON.
    ///
    /// Exits 0 on a match, 1 when the call does not match and 2 when the
    /// definition is malformed.
    Match {
        /// Step definition, e.g. `I am on {url}`.
        definition: String,
        /// Step call, e.g. `Given I am on 'http://x'`.
        call: String,
    },
    /// Fill a definition's placeholders with values.
    Format {
        /// Step definition.
        definition: String,
        /// One value per placeholder, in order.
        values: Vec<String>,
    },
    /// Resolve `<name>` and `${name}` references in text.
    Interpolate {
        /// Text to resolve.
        text: String,
        /// Bind a variable; JSON values are kept as JSON, anything else is a
        /// string.
        #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_pair)]
        vars: Vec<(String, String)>,
    },
    /// List every keyword followed by its configured synonyms.
    Keywords,
}

/// Split a `KEY=VALUE` argument at the first `=`.
pub(crate) fn parse_pair(raw: &str) -> Result<(String, String), CliError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_owned(), value.to_owned()))
        }
        _ => Err(CliError::InvalidPair(raw.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Given=GivenThat", Some(("Given", "GivenThat")))]
    #[case("url=http://x?a=b", Some(("url", "http://x?a=b")))]
    #[case("empty=", Some(("empty", "")))]
    #[case("Given", None)]
    #[case("=value", None)]
    fn splits_pairs(#[case] raw: &str, #[case] expected: Option<(&str, &str)>) {
        let parsed = parse_pair(raw).ok();
        assert_eq!(
            parsed.as_ref().map(|(k, v)| (k.as_str(), v.as_str())),
            expected
        );
    }

    #[test]
    fn parses_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "stepmatch",
            "match",
            "I am on {url}",
            "Given I am on 'x'",
            "--property",
            "Given=GivenThat",
            "--log-level",
            "debug",
        ]);
        let Ok(cli) = cli else {
            panic!("arguments should parse");
        };
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        assert_eq!(cli.properties, [("Given".to_owned(), "GivenThat".to_owned())]);
        assert!(matches!(cli.command, Commands::Match { .. }));
    }

    #[test]
    fn rejects_malformed_property() {
        assert!(Cli::try_parse_from(["stepmatch", "--property", "oops", "keywords"]).is_err());
    }
}
