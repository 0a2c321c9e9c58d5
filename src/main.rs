//! # chatlens CLI
//!
//! Parses a transcript, filters it and writes the records as CSV, JSON or
//! JSONL. Exit status is 0 on success, 2 when the input holds no messages and
//! 1 on any other error.

use std::fs;
use std::io::{self, Write};
use std::process;

use clap::Parser as ClapParser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use chatlens::ChatlensError;
use chatlens::cli::Args;
use chatlens::format::to_format;
use chatlens::parser::{ParseOutcome, TranscriptParser};

const EXIT_ERROR: i32 = 1;
const EXIT_EMPTY: i32 = 2;

/// How a run ended when no error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunStatus {
    Written,
    NoMessages,
}

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(&args);

    match run(&args) {
        Ok(RunStatus::Written) => {}
        Ok(RunStatus::NoMessages) => {
            eprintln!("no messages found in {}", args.input.display());
            process::exit(EXIT_EMPTY);
        }
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(EXIT_ERROR);
        }
    }
}

/// `-v` takes precedence over `RUST_LOG`; without either only warnings are shown.
fn init_logging(args: &Args) {
    let filter = if args.verbose > 0 {
        EnvFilter::new(args.log_level())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<RunStatus, ChatlensError> {
    // Validate flags before touching the input
    let filter = args.filter()?;
    let format = args.output_format()?;
    let output_config = args.output_config();

    let parser = TranscriptParser::with_config(args.parse_config());
    let parsed = match parser.parse(&args.input)? {
        ParseOutcome::Parsed(parsed) => parsed,
        ParseOutcome::EmptyCorpus => return Ok(RunStatus::NoMessages),
    };

    let view = parsed.corpus.filter(&filter);
    debug!(
        parsed = parsed.corpus.len(),
        kept = view.len(),
        "filter applied"
    );

    let rendered = to_format(&view, format, &output_config)?;
    if let Some(path) = &args.output {
        fs::write(path, rendered)?;
        info!(path = %path.display(), %format, "output written");
    } else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        stdout.flush()?;
    }

    let report = &parsed.report;
    let summary = view.summary();
    eprintln!(
        "{} segments, {} records ({} malformed, {} unresolved timestamps)",
        report.segments(),
        report.records(),
        report.malformed(),
        report.unresolved(),
    );
    eprintln!(
        "{} messages written from {} authors ({} notifications, {} media, {} deleted)",
        summary.messages, summary.authors, summary.notifications, summary.media, summary.deleted,
    );
    if let (Some(first), Some(last)) = (summary.first, summary.last) {
        eprintln!("span: {first} .. {last}");
    }

    Ok(RunStatus::Written)
}
