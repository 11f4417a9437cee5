//! Plain-text directions parsing.
//!
//! Turns a pasted block of directions (one instruction per line, optionally
//! prefixed with "1. "-style numbering) into clean instruction strings.

/// Split a directions blob into instructions.
///
/// Lines are trimmed, blank lines dropped, and any leading "<number>. "
/// prefix stripped so re-imports of rendered directions don't double-number.
pub fn parse_directions(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| strip_leading_number(line).to_string())
        .collect()
}

/// Strip a leading "<number>." (with optional following whitespace) from a line.
///
/// Only strips when the digits are immediately followed by a period; "350F"
/// or "2 cups flour" are left alone.
fn strip_leading_number(line: &str) -> &str {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return line;
    }
    let rest = &line[digits..];
    match rest.strip_prefix('.') {
        Some(after) => after.trim_start(),
        None => line,
    }
}
