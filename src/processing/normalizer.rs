//! Text normalization shared by the scorer and the skill matcher

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LINE_BREAK_RE: Regex = Regex::new(r"\r\n|\n").expect("Invalid line break regex");
    // `+ # - _ .` survive because they occur inside skill tokens (c++, c#, node.js, ci-cd)
    static ref NOISE_RE: Regex = Regex::new(r"[^a-z0-9\s+#\-_.]").expect("Invalid noise regex");
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").expect("Invalid whitespace regex");
}

/// Canonicalize raw extracted text into a lowercase, single-spaced string.
///
/// Total and idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lowered = text.to_lowercase();
    let joined = LINE_BREAK_RE.replace_all(&lowered, " ");
    let stripped = NOISE_RE.replace_all(&joined, " ");
    WHITESPACE_RE.replace_all(&stripped, " ").trim().to_string()
}
