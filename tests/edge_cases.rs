//! Edge-case tests for segmentation, record building and markers.

use chatlens::message::{NOTIFICATION_AUTHOR, period_bucket};
use chatlens::parsing::{Segmenter, TimestampResolver, parse_lenient, split_author};
use chatlens::prelude::*;

fn corpus(raw: &str) -> Corpus {
    TranscriptParser::new().parse_str(raw).into_corpus()
}

// ============================================================================
// Segmentation
// ============================================================================

#[test]
fn test_preamble_before_first_timestamp_is_ignored() {
    let raw = "WhatsApp export\nsome header text\n1/1/23, 10:30 - Alice: hi\n";
    let corpus = corpus(raw);

    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus[0].text(), "hi\n");
}

#[test]
fn test_quoted_timestamp_inside_message_does_not_split() {
    let raw = "1/1/23, 10:30 - Alice: he said 1/1/23, 10:29 - nope\n1/1/23, 10:31 - Bob: ok\n";
    let corpus = corpus(raw);

    assert_eq!(corpus.len(), 2);
    assert_eq!(corpus[0].text(), "he said 1/1/23, 10:29 - nope\n");
}

#[test]
fn test_narrow_no_break_space_before_meridiem() {
    let raw = "1/2/23, 9:05\u{202f}pm - Alice: hi\n";
    let corpus = corpus(raw);

    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus[0].time().unwrap().hour(), 21);
}

#[test]
fn test_left_to_right_mark_prefix() {
    let raw = "\u{200e}[1/15/24, 10:30:00 AM] Alice: hi\n";
    let segments = Segmenter::new().segment(raw);

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].timestamp_text, "1/15/24, 10:30:00 AM");
}

#[test]
fn test_mixed_patterns_in_one_transcript() {
    let raw = "\
1/1/23, 10:30 am - Alice: twelve
1/1/23, 10:31 - Bob: twenty-four
[1/1/23, 10:32:00] Carol: bracketed
";
    let corpus = corpus(raw);
    let authors: Vec<&str> = corpus.iter().map(|m| m.author()).collect();
    assert_eq!(authors, ["Alice", "Bob", "Carol"]);
    assert!(corpus.iter().all(|m| m.timestamp().is_some()));
}

#[test]
fn test_blank_lines_stay_in_body() {
    let corpus = corpus("1/1/23, 10:30 - Alice: one\n\ntwo\n");
    assert_eq!(corpus[0].text(), "one\n\ntwo\n");
}

#[test]
fn test_last_message_without_trailing_newline() {
    let corpus = corpus("1/1/23, 10:30 - Alice: one\n1/1/23, 10:31 - Bob: two");
    assert_eq!(corpus[1].text(), "two");
}

// ============================================================================
// Authors
// ============================================================================

#[test]
fn test_notification_author() {
    let corpus = corpus("1/1/23, 10:30 - Alice added Bob\n");
    assert_eq!(corpus[0].author(), NOTIFICATION_AUTHOR);
    assert!(corpus[0].is_notification());
}

#[test]
fn test_empty_message_text() {
    let corpus = corpus("1/1/23, 10:30 - Alice: \n");
    assert_eq!(corpus[0].author(), "Alice");
    assert!(corpus[0].is_empty());
}

#[test]
fn test_unicode_authors() {
    let corpus = corpus("1/1/23, 10:30 - Мама 🌸: привет\n1/1/23, 10:31 - +44 7700 900123: hi\n");
    assert_eq!(corpus[0].author(), "Мама 🌸");
    assert_eq!(corpus[1].author(), "+44 7700 900123");
}

#[test]
fn test_split_author_is_exposed() {
    assert_eq!(split_author("Alice: a: b"), (Some("Alice"), "a: b"));
}

// ============================================================================
// Markers
// ============================================================================

#[test]
fn test_media_placeholder_needs_line_break() {
    let raw = "1/1/23, 10:30 - Alice: <Media omitted>\n1/1/23, 10:31 - Bob: <Media omitted>";
    let corpus = corpus(raw);

    assert!(corpus[0].is_media());
    // No trailing line break on the final message
    assert!(!corpus[1].is_media());
}

#[test]
fn test_media_placeholder_crlf() {
    let corpus = corpus("1/1/23, 10:30 - Alice: <Media omitted>\r\n");
    assert!(corpus[0].is_media());
}

#[test]
fn test_media_placeholder_with_caption_is_not_media() {
    let corpus = corpus("1/1/23, 10:30 - Alice: <Media omitted> look!\n");
    assert!(!corpus[0].is_media());
}

#[test]
fn test_deleted_notice_case_insensitive() {
    let corpus = corpus(
        "1/1/23, 10:30 - Alice: THIS MESSAGE WAS DELETED\n1/1/23, 10:31 - Bob: You deleted this message\n",
    );
    assert!(corpus.iter().all(ChatMessage::is_deleted));
}

// ============================================================================
// Timestamps
// ============================================================================

#[test]
fn test_period_bucket_edges() {
    assert_eq!(period_bucket(0), "00-1");
    assert_eq!(period_bucket(9), "9-10");
    assert_eq!(period_bucket(22), "22-23");
    assert_eq!(period_bucket(23), "23-00");
}

#[test]
fn test_twelve_am_and_pm() {
    let corpus = corpus("1/1/23, 12:00 am - Alice: midnight\n1/1/23, 12:00 pm - Bob: noon\n");
    assert_eq!(corpus[0].time().unwrap().hour(), 0);
    assert_eq!(corpus[1].time().unwrap().hour(), 12);
    assert_eq!(corpus[1].time().unwrap().period_bucket(), "12-13");
}

#[test]
fn test_impossible_date_is_unresolved() {
    let parsed = TranscriptParser::new()
        .parse_str("31/02/2023, 10:30 - Alice: hi\n")
        .into_parsed()
        .unwrap();

    assert_eq!(parsed.corpus.len(), 1);
    assert!(parsed.corpus[0].timestamp().is_none());
    assert!(parsed.corpus[0].time().is_none());
    assert_eq!(parsed.report.unresolved(), 1);
}

#[test]
fn test_resolver_reports_lenient_resolution() {
    let resolution = TimestampResolver::new().resolve("24/12/2022, 10:30:15");
    assert!(resolution.is_resolved());
    assert!(!TimestampResolver::new().with_lenient_fallback(false).resolve("24/12/2022, 10:30:15").is_resolved());
}

#[test]
fn test_lenient_parser_formats() {
    assert!(parse_lenient("2023-01-05T10:30:00").is_some());
    assert!(parse_lenient("2023-01-05").is_some());
    assert!(parse_lenient("05.01.2023, 10:30").is_some());
    assert!(parse_lenient("1/5/23, 10:30:00 p.m.").is_some());
    assert!(parse_lenient("not a date").is_none());
}
