//! Text preprocessing for speech synthesis.
//!
//! Speech engines read punctuation out loud, so markdown markers such as
//! `#` or `*` would be pronounced. This module strips them and normalises
//! whitespace so the engine receives a single line of plain prose.

/// Characters removed before text is handed to a speech engine.
pub const MARKDOWN_SYMBOLS: [char; 11] = ['#', '*', '`', '_', '~', '[', ']', '(', ')', '<', '>'];

/// Whitespace as the browser's `\s` class sees it.
///
/// Unicode `White_Space` minus U+0085 (NEL), plus U+FEFF (BOM), so a file
/// saved with a byte-order mark does not hand the engine a leading BOM.
#[must_use]
pub fn is_speech_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{FEFF}'
}

/// Clean possibly-absent display text for speech.
///
/// Absent and empty input both yield an empty string.
#[must_use]
pub fn clean_for_speech(text: Option<&str>) -> String {
    text.map_or_else(String::new, clean_markdown)
}

/// Strip markdown punctuation from `text` and flatten it to one line.
///
/// - Every character in [`MARKDOWN_SYMBOLS`] is removed
/// - Line breaks become spaces
/// - Runs of whitespace collapse to a single space
/// - Leading and trailing whitespace is trimmed
///
/// The function is total and idempotent.
#[must_use]
pub fn clean_markdown(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut result = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if MARKDOWN_SYMBOLS.contains(&c) {
            continue;
        }

        // Newlines are whitespace too, so they fold into the same run.
        if is_speech_whitespace(c) {
            pending_space = true;
            continue;
        }

        if pending_space && !result.is_empty() {
            result.push(' ');
        }
        pending_space = false;
        result.push(c);
    }

    result
}
