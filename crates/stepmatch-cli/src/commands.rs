//! Command dispatch for the `stepmatch` entrypoint.

use std::collections::HashMap;
use std::fmt::Display;
use std::io::Write;
use std::process::ExitCode;

use eyre::{Context, Result};
use serde_json::Value;
use stepmatch::{
    DefinitionMatcher, KeywordRegistry, MatchLimits, PropertyBundle, StepDefinition,
    format_definition, interpolate,
};
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::output::{write_arguments, write_line, write_lines};

/// Result of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Success,
    NoMatch,
}

impl Outcome {
    pub(crate) fn exit_code(self) -> ExitCode {
        match self {
            Self::Success => ExitCode::SUCCESS,
            Self::NoMatch => ExitCode::from(1),
        }
    }
}

/// Run the parsed command, writing its output to `out`.
///
/// # Errors
///
/// Returns an error for malformed definitions, invalid limits from the
/// environment, or failed writes.
pub(crate) fn run(cli: Cli, out: &mut dyn Write) -> Result<Outcome> {
    let config = PropertyBundle::from_env();
    for (key, value) in cli.properties {
        config.set_property(key, value);
    }

    match cli.command {
        Commands::Match { definition, call } => run_match(&config, &definition, &call, out),
        Commands::Format { definition, values } => {
            let values: Vec<&dyn Display> = values.iter().map(|v| v as &dyn Display).collect();
            write_line(out, &format_definition(&definition, &values))?;
            Ok(Outcome::Success)
        }
        Commands::Interpolate { text, vars } => {
            let context: HashMap<String, Value> = vars
                .into_iter()
                .map(|(key, raw)| (key, variable_value(raw)))
                .collect();
            write_line(out, &interpolate(&text, &context, &config))?;
            Ok(Outcome::Success)
        }
        Commands::Keywords => {
            write_lines(out, KeywordRegistry::new(&config).all_keywords())?;
            Ok(Outcome::Success)
        }
    }
}

fn run_match(
    config: &PropertyBundle,
    definition: &str,
    call: &str,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let parsed = StepDefinition::parse(definition)
        .wrap_err_with(|| format!("invalid step definition '{definition}'"))?;
    let limits = MatchLimits::from_env().wrap_err("invalid match limits")?;
    let matcher = DefinitionMatcher::new(config).with_limits(limits);

    let Some(args) = matcher.match_args(&parsed, call) else {
        debug!(definition, call, "call does not match definition");
        return Ok(Outcome::NoMatch);
    };
    write_arguments(out, &args)?;
    Ok(Outcome::Success)
}

/// Interpret a `--var` value as JSON when it parses, otherwise as a string.
fn variable_value(raw: String) -> Value {
    serde_json::from_str(&raw).unwrap_or_else(|_| Value::String(raw))
}
