//! JSON Lines (JSONL) output writer.

use std::fmt::Write;

use crate::core::models::OutputConfig;
use crate::error::Result;
use crate::message::ChatMessage;

use super::json_writer::JsonMessage;

/// Converts messages to JSONL: one compact JSON object per line.
///
/// ```jsonl
/// {"timestamp":"2023-01-01 10:30:00","author":"Alice","text":"Hello"}
/// {"timestamp":"2023-01-01 10:31:00","author":"Bob","text":"Hi"}
/// ```
pub fn to_jsonl<'a>(
    messages: impl IntoIterator<Item = &'a ChatMessage>,
    config: &OutputConfig,
) -> Result<String> {
    let mut out = String::new();
    for msg in messages {
        let line = serde_json::to_string(&JsonMessage::from_message(msg, config))?;
        // Writing to a String cannot fail
        let _ = writeln!(out, "{line}");
    }
    Ok(out)
}
