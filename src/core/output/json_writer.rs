//! JSON output writer.

use serde::Serialize;

use crate::core::models::OutputConfig;
use crate::error::Result;
use crate::message::{ChatMessage, TimeFields};

use super::TIMESTAMP_FORMAT;

/// Serialized shape shared by the JSON and JSONL writers.
/// Time fields are flattened in only when enabled in `OutputConfig`.
#[derive(Serialize)]
pub(super) struct JsonMessage<'a> {
    timestamp: Option<String>,
    author: &'a str,
    text: &'a str,
    #[serde(flatten)]
    time: Option<&'a TimeFields>,
}

impl<'a> JsonMessage<'a> {
    pub(super) fn from_message(msg: &'a ChatMessage, config: &OutputConfig) -> Self {
        Self {
            timestamp: msg
                .timestamp()
                .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string()),
            author: msg.author(),
            text: msg.text(),
            time: if config.include_time_fields {
                msg.time()
            } else {
                None
            },
        }
    }
}

/// Converts messages to a pretty-printed JSON array.
///
/// # Format
/// ```json
/// [
///   {"timestamp": "2023-01-01 10:30:00", "author": "Alice", "text": "Hello"},
///   {"timestamp": null, "author": "Bob", "text": "Hi"}
/// ]
/// ```
pub fn to_json<'a>(
    messages: impl IntoIterator<Item = &'a ChatMessage>,
    config: &OutputConfig,
) -> Result<String> {
    let json_messages: Vec<JsonMessage<'_>> = messages
        .into_iter()
        .map(|m| JsonMessage::from_message(m, config))
        .collect();

    Ok(serde_json::to_string_pretty(&json_messages)?)
}
