//! Text cleanup for directory extracts.

const PLACEHOLDER_NAMES: &[&str] = &["tbd", "tba", "n/a", "na", "vacant"];

/// Invisible characters that survive copy/paste from rich documents.
const ZERO_WIDTH: &[char] = &['\u{200b}', '\u{200c}', '\u{200d}', '\u{2060}', '\u{feff}'];

/// Drop control and zero-width characters, collapse runs of whitespace, trim.
/// Other non-ASCII text (accented names) is kept.
pub fn clean_field(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(|c| !c.is_control() && !ZERO_WIDTH.contains(c))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Names that stand for an unfilled position rather than a person.
pub fn is_placeholder_name(name: &str) -> bool {
    name.is_empty()
        || PLACEHOLDER_NAMES
            .iter()
            .any(|p| name.eq_ignore_ascii_case(p))
}
