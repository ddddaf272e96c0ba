/*!
 * Lossy text normalization for fuzzy matching.
 *
 * Subtitles and transcripts are authored independently, so spacing,
 * punctuation and capitalization rarely agree. Both sides are reduced to a
 * run of lowercase letters before any offsets are taken.
 */

use once_cell::sync::Lazy;
use regex::Regex;

// @const: Any whitespace run
static WHITESPACE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

// @const: Anything that is neither a letter nor a literal space
static NON_LETTER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L} ]+").expect("non-letter regex is valid"));

/// Normalize text for matching.
///
/// Whitespace is removed entirely, not collapsed to a single space. The letter
/// filter must run after lowercasing: some uppercase letters lowercase to a
/// letter plus a combining mark.
pub fn sanitize(s: &str) -> String {
    let collapsed = WHITESPACE_REGEX.replace_all(s, "");
    let lowered = collapsed.to_lowercase();
    NON_LETTER_REGEX.replace_all(&lowered, "").into_owned()
}

/// Join a record's raw lines with spaces and sanitize the result
pub fn collapse_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let joined = lines
        .iter()
        .map(|line| line.as_ref())
        .collect::<Vec<_>>()
        .join(" ");
    sanitize(&joined)
}
