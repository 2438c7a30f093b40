//! Matching of free-text BDD step calls against step definitions.
//!
//! A step definition is a template such as `set {value} to {name}`. A call
//! such as `When set 5 to 'x'` matches it when, ignoring case and an
//! optional leading keyword (or a configured synonym of one), the call fits
//! the template with every placeholder replaced by a quoted string, a map,
//! a list or a number. Matching yields the arguments in invocation order,
//! each tagged with its [`ParamType`].
//!
//! ```
//! use stepmatch::{DefinitionMatcher, ParamType, PropertyBundle, StepDefinition};
//!
//! let config = PropertyBundle::new();
//! let matcher = DefinitionMatcher::new(&config);
//! let def = StepDefinition::parse("set {value} to {name}").expect("well formed");
//!
//! let args = matcher.match_args(&def, "When set 5 to 'x'").expect("call matches");
//! assert_eq!(args[0].value, "5");
//! assert_eq!(args[0].param_type, ParamType::Long);
//! assert_eq!(args[1].value, "x");
//! ```
//!
//! The crate also resolves `${name}` and `<name>` variable references in
//! calls ([`interpolate`]) and renders definitions with concrete values for
//! reporting ([`format_definition`]).

mod config;
mod errors;
mod extract;
mod format;
mod interpolate;
mod keyword;
mod library;
mod matcher;
mod param_type;
mod pattern;
mod specificity;

pub use config::{
    ConfigProvider, MAX_INPUT_LEN_ENV, MatchLimits, PROPERTY_ENV_PREFIX, PropertyBundle,
    value_text,
};
pub use errors::{ConfigError, PatternError, PlaceholderErrorInfo};
pub use extract::{Argument, args_from_call, process_arg, raw_args};
pub use format::format_definition;
pub use interpolate::{convert_placeholder_syntax, interpolate, quote_params};
pub use keyword::{KeywordRegistry, StepKeyword, StepKeywordParseError};
pub use library::{StepLibrary, StepMatch};
pub use matcher::{DefinitionMatcher, matches};
pub use param_type::{CLASSIFICATION_ORDER, ParamType, combined_value_regex};
pub use pattern::{MAX_COMPILED_PATTERN_SIZE, Placeholder, StepDefinition, arg_names};
pub use specificity::SpecificityScore;
