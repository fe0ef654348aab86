//! `outliner-check`: verify that files of outline items satisfy the item contract.
//!
//! The binary is a thin wrapper; everything it does lives here so it can be
//! exercised without spawning a process.

pub mod config;

use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use outliner_core::{DomainError, DomainResult};
use outliner_items::Item;

#[derive(Debug, Parser)]
#[command(
    name = "outliner-check",
    version,
    about = "Check outline item files against the item contract"
)]
pub struct Args {
    /// Files to check. Reads stdin when none are given, or for `-`.
    pub files: Vec<PathBuf>,

    /// Representation used by the inputs.
    #[arg(long, value_enum, default_value_t = InputFormat::Json)]
    pub input: InputFormat,

    /// Print only the per-input summary lines.
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// One JSON object, or an array of objects.
    Json,
    /// `key: value` records separated by `---` lines.
    Lines,
}

/// Worst result seen across all inputs. Ordered by severity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Outcome {
    Conforming,
    Violations,
    Unreadable,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Conforming => ExitCode::SUCCESS,
            Outcome::Violations => ExitCode::from(1),
            Outcome::Unreadable => ExitCode::from(2),
        }
    }

    fn of_error(err: &DomainError) -> Self {
        match err {
            DomainError::Malformed(_) => Outcome::Unreadable,
            DomainError::NonConforming(_) | DomainError::Validation(_) => Outcome::Violations,
        }
    }
}

/// Named input contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub source: String,
    pub contents: String,
}

impl Input {
    pub fn new(source: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            contents: contents.into(),
        }
    }
}

/// Where an input comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl core::fmt::Display for Source {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Source::Stdin => f.write_str("<stdin>"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Source {
    /// Read the whole input. Bytes that are not UTF-8 are a `Malformed` error.
    pub fn read(&self) -> anyhow::Result<Input> {
        let bytes = match self {
            Source::Stdin => {
                let mut bytes = Vec::new();
                std::io::stdin().read_to_end(&mut bytes)?;
                bytes
            }
            Source::File(path) => std::fs::read(path)?,
        };
        let contents = String::from_utf8(bytes)
            .map_err(|e| DomainError::malformed(format!("invalid UTF-8: {e}")))?;
        Ok(Input::new(self.to_string(), contents))
    }
}

/// Sources named on the command line. Stdin is read at most once, so repeated
/// `-` arguments after the first are skipped.
pub fn sources(files: &[PathBuf]) -> Vec<Source> {
    if files.is_empty() {
        return vec![Source::Stdin];
    }
    let mut seen_stdin = false;
    let mut sources = Vec::with_capacity(files.len());
    for path in files {
        if path.as_os_str() != "-" {
            sources.push(Source::File(path.clone()));
        } else if !seen_stdin {
            seen_stdin = true;
            sources.push(Source::Stdin);
        } else {
            tracing::warn!("stdin given more than once; skipping repeat");
        }
    }
    sources
}

/// Read and check each source in turn. A source that cannot be read is
/// reported and the run moves on to the next one.
pub fn run(args: &Args, out: &mut impl Write) -> anyhow::Result<Outcome> {
    let mut outcome = Outcome::Conforming;
    for source in sources(&args.files) {
        let input = match source.read() {
            Ok(input) => input,
            Err(err) => {
                tracing::warn!(source = %source, error = %err, "unreadable input");
                writeln!(out, "{source}: {err:#}")?;
                outcome = outcome.max(Outcome::Unreadable);
                continue;
            }
        };
        outcome = outcome.max(check_input(&input, args.input, args.quiet, out)?);
    }
    Ok(outcome)
}

pub fn parse(contents: &str, format: InputFormat) -> DomainResult<Vec<DomainResult<Item>>> {
    match format {
        InputFormat::Json => Item::from_json_many(contents),
        InputFormat::Lines => Ok(Item::from_lines_many(contents)),
    }
}

/// Check every item of every input, writing a report to `out`.
pub fn check_inputs(
    inputs: &[Input],
    format: InputFormat,
    quiet: bool,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    let mut outcome = Outcome::Conforming;
    for input in inputs {
        outcome = outcome.max(check_input(input, format, quiet, out)?);
    }
    Ok(outcome)
}

fn check_input(
    input: &Input,
    format: InputFormat,
    quiet: bool,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    let results = match parse(&input.contents, format) {
        Ok(results) => results,
        Err(err) => {
            tracing::warn!(source = %input.source, error = %err, "unreadable input");
            writeln!(out, "{}: {err}", input.source)?;
            return Ok(Outcome::of_error(&err));
        }
    };

    let conforming = results.iter().filter(|r| r.is_ok()).count();
    writeln!(
        out,
        "{}: {} items, {} conforming",
        input.source,
        results.len(),
        conforming
    )?;
    tracing::info!(source = %input.source, items = results.len(), conforming, "checked input");

    let mut outcome = Outcome::Conforming;
    for (index, result) in results.iter().enumerate() {
        let Err(err) = result else {
            continue;
        };
        outcome = outcome.max(Outcome::of_error(err));
        if !quiet {
            write_error(out, &input.source, index, err)?;
        }
    }
    Ok(outcome)
}

fn write_error(
    out: &mut impl Write,
    source: &str,
    index: usize,
    err: &DomainError,
) -> std::io::Result<()> {
    match err {
        DomainError::NonConforming(violations) => {
            for violation in violations {
                writeln!(out, "{source}#{index}: {violation}")?;
            }
            Ok(())
        }
        other => writeln!(out, "{source}#{index}: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str =
        r#"{"id": "a1", "uid": "u-a1", "parent": "", "text": "Hello", "format": "plain", "view": "list"}"#;

    fn report(inputs: &[Input], format: InputFormat, quiet: bool) -> (Outcome, String) {
        let mut out = Vec::new();
        let outcome = check_inputs(inputs, format, quiet, &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn conforming_input_reports_summary_only() {
        let (outcome, text) = report(&[Input::new("root.json", ROOT)], InputFormat::Json, false);
        assert_eq!(outcome, Outcome::Conforming);
        assert_eq!(text, "root.json: 1 items, 1 conforming\n");
    }

    #[test]
    fn violations_are_listed_per_item() {
        let contents = format!(r#"[{ROOT}, {{"id": "b", "uid": "u-b", "parent": "a1", "format": "plain", "view": 3}}]"#);
        let (outcome, text) = report(&[Input::new("items.json", contents)], InputFormat::Json, false);

        assert_eq!(outcome, Outcome::Violations);
        assert_eq!(
            text,
            "items.json: 2 items, 1 conforming\n\
             items.json#1: missing required field `text`\n\
             items.json#1: field `view` must be a string, found number\n"
        );
    }

    #[test]
    fn quiet_suppresses_violation_lines() {
        let (outcome, text) = report(&[Input::new("b.json", r#"{"id": "b"}"#)], InputFormat::Json, true);
        assert_eq!(outcome, Outcome::Violations);
        assert_eq!(text, "b.json: 1 items, 0 conforming\n");
    }

    #[test]
    fn malformed_input_is_unreadable_but_others_are_still_checked() {
        let inputs = [Input::new("bad.json", "{"), Input::new("root.json", ROOT)];
        let (outcome, text) = report(&inputs, InputFormat::Json, false);

        assert_eq!(outcome, Outcome::Unreadable);
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].starts_with("bad.json: malformed input:"));
        assert_eq!(lines[1], "root.json: 1 items, 1 conforming");
    }

    #[test]
    fn line_format_inputs_are_checked() {
        let contents = "id: a1\nuid: u-a1\nparent:\ntext: Hello\nformat: plain\nview: list\n---\nid a2\n";
        let (outcome, text) = report(&[Input::new("items.txt", contents)], InputFormat::Lines, false);

        assert_eq!(outcome, Outcome::Unreadable);
        assert_eq!(
            text,
            "items.txt: 2 items, 1 conforming\nitems.txt#1: malformed input: line 1: expected `key: value`\n"
        );
    }

    fn args_for(files: Vec<PathBuf>) -> Args {
        Args {
            files,
            input: InputFormat::Json,
            quiet: false,
        }
    }

    #[test]
    fn unreadable_files_do_not_stop_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        let missing = dir.path().join("missing.json");
        let good = dir.path().join("good.json");
        std::fs::write(&bad, [0xff, 0xfe, b'{']).unwrap();
        std::fs::write(&good, ROOT).unwrap();

        let mut out = Vec::new();
        let outcome = run(&args_for(vec![bad.clone(), missing.clone(), good.clone()]), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(outcome, Outcome::Unreadable);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with(&format!("{}: malformed input: invalid UTF-8", bad.display())));
        assert!(lines[1].starts_with(&format!("{}: ", missing.display())));
        assert_eq!(lines[2], format!("{}: 1 items, 1 conforming", good.display()));
    }

    #[test]
    fn conforming_files_exit_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        std::fs::write(&good, ROOT).unwrap();

        let mut out = Vec::new();
        let outcome = run(&args_for(vec![good]), &mut out).unwrap();
        assert_eq!(outcome, Outcome::Conforming);
    }

    #[test]
    fn stdin_is_listed_once() {
        let files = vec![
            PathBuf::from("-"),
            PathBuf::from("a.json"),
            PathBuf::from("-"),
        ];
        assert_eq!(
            sources(&files),
            vec![Source::Stdin, Source::File(PathBuf::from("a.json"))]
        );
        assert_eq!(sources(&[]), vec![Source::Stdin]);
    }

    #[test]
    fn args_parse_with_defaults() {
        let args = Args::try_parse_from(["outliner-check", "a.json", "-"]).unwrap();
        assert_eq!(args.files, vec![PathBuf::from("a.json"), PathBuf::from("-")]);
        assert_eq!(args.input, InputFormat::Json);
        assert!(!args.quiet);

        let args = Args::try_parse_from(["outliner-check", "--input", "lines", "-q"]).unwrap();
        assert_eq!(args.input, InputFormat::Lines);
        assert!(args.quiet);
        assert!(args.files.is_empty());
    }

    #[test]
    fn outcome_severity_orders_exit_codes() {
        assert!(Outcome::Unreadable > Outcome::Violations);
        assert!(Outcome::Violations > Outcome::Conforming);
    }
}
