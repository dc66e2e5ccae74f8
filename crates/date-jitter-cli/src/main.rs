//! date-jitter: shift DICOM dates and timestamps from the command line.
//!
//! Builds a single field from the arguments (or stdin), runs it through the
//! jitter engine, and prints the result.

#![forbid(unsafe_code)]

mod cli;

use std::io::{self, IsTerminal, Read};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use date_jitter::{
    CalendarShift, CollectionRendering, Field, FieldValue, Jitter, RenderPolicy,
    ValueRepresentation,
};
use serde::Serialize;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use cli::Cli;

/// JSON output for `--json`.
#[derive(Debug, Serialize)]
struct Report<'a> {
    field: &'a str,
    vr: ValueRepresentation,
    offset: i64,
    original: Option<&'a FieldValue>,
    jittered: Option<FieldValue>,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let values = if cli.values.is_empty() {
        read_stdin_values()?
    } else {
        cli.values.clone()
    };
    let field = Field::new(&cli.name, cli.vr(), field_value(values));
    let offset = cli.options().offset();
    tracing::debug!(field = %field.name, vr = %field.vr, offset, "jittering");

    let policy = RenderPolicy {
        collections: if cli.multi {
            CollectionRendering::Multi
        } else {
            CollectionRendering::Joined
        },
        ..RenderPolicy::default()
    };
    let engine = Jitter::new(CalendarShift).with_policy(policy);
    let jittered = engine.apply(&field, offset);

    if cli.json {
        let report = Report {
            field: &field.name,
            vr: field.vr,
            offset,
            original: field.value.as_ref(),
            jittered,
        };
        let out = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{out}");
        return Ok(ExitCode::SUCCESS);
    }

    match jittered {
        Some(FieldValue::Text(s)) => println!("{s}"),
        Some(FieldValue::Multi(values)) => {
            for v in values {
                println!("{v}");
            }
        }
        None if field.value.is_none() => {}
        None => {
            eprintln!(
                "Error: could not jitter {} value '{}' (VR={})",
                field.name,
                field.value.as_ref().map(ToString::to_string).unwrap_or_default(),
                field.vr
            );
            return Ok(ExitCode::FAILURE);
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// One value is a scalar; several are a multi-value field; none is absent.
fn field_value(mut values: Vec<String>) -> Option<FieldValue> {
    match values.len() {
        0 => None,
        1 => values.pop().map(FieldValue::Text),
        _ => Some(FieldValue::Multi(values)),
    }
}

fn read_stdin_values() -> Result<Vec<String>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(Vec::new());
    }
    let mut buf = String::new();
    stdin
        .lock()
        .read_to_string(&mut buf)
        .context("failed to read values from stdin")?;
    Ok(buf
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect())
}

/// Warnings always reach stderr; `-v` adds debug, `-vv` trace.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_shapes() {
        assert_eq!(field_value(vec![]), None);
        assert_eq!(field_value(vec!["a".into()]), Some(FieldValue::from("a")));
        assert_eq!(
            field_value(vec!["a".into(), "b".into()]),
            Some(FieldValue::Multi(vec!["a".into(), "b".into()]))
        );
    }
}
