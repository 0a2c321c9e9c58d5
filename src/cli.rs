//! Command-line interface definition using clap.
//!
//! [`Args`] maps flags onto the library's configuration types, so the binary
//! only has to wire them together.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::ParseConfig;
use crate::core::filter::CorpusFilter;
use crate::core::models::OutputConfig;
use crate::error::Result;
use crate::format::OutputFormat;

/// Parse a WhatsApp chat export into per-message records.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens chat.txt
    chatlens chat.txt -o messages.jsonl
    chatlens chat.txt -f json --from Alice --after 2023-01-01
    chatlens chat.txt --no-notifications --no-media --time-fields -o stats.csv")]
pub struct Args {
    /// Path to the exported transcript
    pub input: PathBuf,

    /// Write output here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format [default: from the output extension, else csv]
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Keep only messages from this author (case-insensitive)
    #[arg(long, value_name = "USER")]
    pub from: Option<String>,

    /// Keep messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Drop system notifications
    #[arg(long)]
    pub no_notifications: bool,

    /// Drop media placeholders
    #[arg(long)]
    pub no_media: bool,

    /// Drop deleted-message notices
    #[arg(long)]
    pub no_deleted: bool,

    /// Include calendar fields (year, month, weekday, hour, period) in output
    #[arg(short = 't', long)]
    pub time_fields: bool,

    /// Only accept the known export timestamp formats
    #[arg(long)]
    pub strict: bool,

    /// Build records on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Builds the parser configuration from the flags.
    pub fn parse_config(&self) -> ParseConfig {
        ParseConfig::new()
            .with_lenient_fallback(!self.strict)
            .with_parallel(self.parallel)
    }

    /// Builds the corpus filter from the flags.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`](crate::ChatlensError::InvalidDate)
    /// for a malformed `--after` or `--before`.
    pub fn filter(&self) -> Result<CorpusFilter> {
        let mut filter = CorpusFilter::new()
            .exclude_notifications(self.no_notifications)
            .exclude_media(self.no_media)
            .exclude_deleted(self.no_deleted);

        if let Some(ref from) = self.from {
            filter = filter.with_author(from.clone());
        }
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        Ok(filter)
    }

    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            include_time_fields: self.time_fields,
        }
    }

    /// Picks the output format: `--format`, then the output extension, then CSV.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidFormat`](crate::ChatlensError::InvalidFormat)
    /// when no `--format` is given and the output extension is unknown.
    pub fn output_format(&self) -> Result<OutputFormat> {
        match (self.format, &self.output) {
            (Some(format), _) => Ok(format),
            (None, Some(path)) => OutputFormat::from_path(path),
            (None, None) => Ok(OutputFormat::default()),
        }
    }

    /// Log filter directive for the verbosity level.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}
