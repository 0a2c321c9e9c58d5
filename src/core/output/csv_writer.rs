//! CSV output writer.

use crate::core::models::OutputConfig;
use crate::error::{ChatlensError, Result};
use crate::message::ChatMessage;

use super::TIMESTAMP_FORMAT;

/// Converts messages to CSV with a semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: Depends on OutputConfig
///   - Basic: `Timestamp`, `Author`, `Text`
///   - With time fields: adds `Year`, `Month`, `MonthNum`, `Day`, `DayOfMonth`,
///     `Hour`, `Minute`, `Period`
/// - Unresolved timestamps leave the timestamp and time columns empty
pub fn to_csv<'a>(
    messages: impl IntoIterator<Item = &'a ChatMessage>,
    config: &OutputConfig,
) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());

    writer.write_record(build_header(config))?;
    for msg in messages {
        writer.write_record(build_record(msg, config))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ChatlensError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = vec!["Timestamp", "Author", "Text"];
    if config.include_time_fields {
        header.extend([
            "Year",
            "Month",
            "MonthNum",
            "Day",
            "DayOfMonth",
            "Hour",
            "Minute",
            "Period",
        ]);
    }
    header
}

fn build_record(msg: &ChatMessage, config: &OutputConfig) -> Vec<String> {
    let mut record = vec![
        msg.timestamp()
            .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default(),
        msg.author().to_string(),
        msg.text().to_string(),
    ];

    if config.include_time_fields {
        match msg.time() {
            Some(time) => record.extend([
                time.year().to_string(),
                time.month_name().to_string(),
                time.month_num().to_string(),
                time.day_name().to_string(),
                time.day_of_month().to_string(),
                time.hour().to_string(),
                time.minute().to_string(),
                time.period_bucket().to_string(),
            ]),
            None => record.extend(std::iter::repeat_n(String::new(), 8)),
        }
    }

    record
}
