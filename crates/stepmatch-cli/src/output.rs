//! Helpers for rendering command output.

use std::io::Write;

use eyre::{Context, Result};
use serde::Serialize;
use stepmatch::Argument;

#[derive(Serialize)]
struct ArgumentReport<'a> {
    value: &'a str,
    #[serde(rename = "type")]
    param_type: &'static str,
}

impl<'a> From<&'a Argument> for ArgumentReport<'a> {
    fn from(arg: &'a Argument) -> Self {
        Self {
            value: &arg.value,
            param_type: arg.param_type.as_str(),
        }
    }
}

/// Write extracted arguments as a JSON array of `{"value", "type"}` objects.
pub(crate) fn write_arguments(writer: &mut dyn Write, args: &[Argument]) -> Result<()> {
    let reports: Vec<ArgumentReport<'_>> = args.iter().map(ArgumentReport::from).collect();
    let json = serde_json::to_string(&reports).wrap_err("failed to serialise arguments")?;
    writeln!(writer, "{json}").wrap_err("failed to write arguments")
}

pub(crate) fn write_line(writer: &mut dyn Write, line: &str) -> Result<()> {
    writeln!(writer, "{line}").wrap_err("failed to write output")
}

pub(crate) fn write_lines<I, S>(writer: &mut dyn Write, lines: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for line in lines {
        write_line(writer, line.as_ref())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepmatch::ParamType;

    fn rendered(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        if let Err(err) = f(&mut buf) {
            panic!("writing should succeed: {err:#}");
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[test]
    fn renders_arguments_as_json() {
        let args = [
            Argument::new("http://x", ParamType::String),
            Argument::new("{\"a\":1}", ParamType::Map),
        ];
        assert_eq!(
            rendered(|buf| write_arguments(buf, &args)),
            "[{\"value\":\"http://x\",\"type\":\"STRING\"},{\"value\":\"{\\\"a\\\":1}\",\"type\":\"MAP\"}]\n"
        );
    }

    #[test]
    fn renders_empty_argument_list() {
        assert_eq!(rendered(|buf| write_arguments(buf, &[])), "[]\n");
    }

    #[test]
    fn writes_one_line_per_entry() {
        assert_eq!(rendered(|buf| write_lines(buf, ["a", "b"])), "a\nb\n");
    }
}
