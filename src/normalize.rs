//! Whitespace and transfer-encoding cleanup for message text

use regex::Regex;
use std::sync::LazyLock;

static WS_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapse a block of message text into a single trimmed line.
///
/// Removes quoted-printable soft line breaks, turns non-breaking
/// spaces into plain ones and squeezes every whitespace run down to a
/// single space. Case is preserved. Total on any input and idempotent.
#[must_use]
pub fn normalize(text: &str) -> String {
    let text = text.replace("=\r\n", "").replace("=\n", "");
    let text = text.replace('\u{a0}', " ");
    WS_RUN.replace_all(&text, " ").trim().to_string()
}
