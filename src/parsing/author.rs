//! Splitting a segment body into author and text.

use std::sync::LazyLock;

use regex::Regex;

// Shortest non-empty prefix followed by a colon and one whitespace character.
static AUTHOR_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(.+?):\s").expect("author pattern is a valid regex"));

/// Splits `body` at its first `name: ` delimiter.
///
/// Returns `(Some(author), text)` when a delimiter is found and
/// `(None, body)` otherwise; the latter is a system notification. Only the
/// first delimiter counts, so colons later in the text are left alone. An
/// author whose exported name itself contains `": "` is split at that point.
///
/// # Example
///
/// ```
/// use chatlens::parsing::split_author;
///
/// assert_eq!(split_author("Bob: see you at 10:30: ok?"), (Some("Bob"), "see you at 10:30: ok?"));
/// assert_eq!(split_author("Alice joined using this group's invite link"), (None, "Alice joined using this group's invite link"));
/// ```
pub fn split_author(body: &str) -> (Option<&str>, &str) {
    match AUTHOR_DELIMITER.captures(body) {
        Some(caps) => {
            let (Some(author), Some(whole)) = (caps.get(1), caps.get(0)) else {
                return (None, body);
            };
            (Some(author.as_str()), &body[whole.end()..])
        }
        None => (None, body),
    }
}
