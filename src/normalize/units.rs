//! Package-size extraction from free-text product titles.
//!
//! A title such as `"Turmeric Powder 500g"` is split into the descriptive name
//! (`"Turmeric Powder"`) and a canonical unit token (`"500g"`). The unit
//! alphabet and its spelling rules live in [`UNIT_TABLE`]; the match pattern is
//! generated from it so the two cannot drift apart.

use regex_lite::{Captures, Regex};
use std::sync::LazyLock;

/// Recognised unit words and their canonical spelling.
///
/// Longer spellings precede their prefixes (`lbs` before `lb`, `pcs` before `pc`).
pub const UNIT_TABLE: &[(&str, &str)] = &[
    ("kg", "kg"),
    ("g", "g"),
    ("ml", "ml"),
    ("lbs", "lb"),
    ("lb", "lb"),
    ("l", "l"),
    ("oz", "oz"),
    ("pcs", "pcs"),
    ("pc", "pc"),
    ("pack", "pack"),
];

/// `<number>[ ]<unit>` as a whole token, case-insensitive.
static UNIT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let words: Vec<&str> = UNIT_TABLE.iter().map(|(spelling, _)| *spelling).collect();
    let pattern = format!(r"(?i)\b(\d+(?:\.\d+)?)(\s?)({})\b", words.join("|"));
    Regex::new(&pattern).unwrap()
});

/// Result of splitting a title into name and unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitExtraction {
    /// Title with the unit token and `#`/`:` removed, trimmed.
    pub name: String,
    /// Canonical unit token, or empty when the title has none.
    pub unit: String,
}

/// Splits the first (leftmost) quantity+unit token out of `title`.
///
/// Never fails: a title without a unit token yields an empty `unit`.
pub fn extract(title: &str) -> UnitExtraction {
    let Some(caps) = find_unit(title) else {
        return UnitExtraction { name: strip_markers(title).trim().to_string(), unit: String::new() };
    };

    // Group 0 always exists on a successful match
    let raw = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
    let number = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    let spaced = caps.get(2).is_some_and(|m| !m.is_empty());
    let word = caps.get(3).map(|m| m.as_str()).unwrap_or_default();

    let unit = canonical_unit(number, spaced, word);

    // Stripping markers can rejoin pieces into the raw token again
    let mut name = strip_markers(title);
    while !raw.is_empty() && name.contains(raw) {
        name = strip_markers(&name.replace(raw, ""));
    }

    UnitExtraction { name: name.trim().to_string(), unit }
}

/// Leftmost unit token not glued to a letter or digit on either side.
///
/// The pattern's `\b` is ASCII-only, so `Café500g` needs this extra check.
fn find_unit(title: &str) -> Option<Captures<'_>> {
    let mut start = 0;
    while let Some(caps) = UNIT_PATTERN.captures_at(title, start) {
        let m = caps.get(0)?;
        let glued_before = title[..m.start()].chars().next_back().is_some_and(char::is_alphanumeric);
        let glued_after = title[m.end()..].chars().next().is_some_and(char::is_alphanumeric);
        if !glued_before && !glued_after {
            return Some(caps);
        }
        // Matches start on an ASCII digit
        start = m.start() + 1;
    }
    None
}

/// Builds the canonical unit token from its matched parts.
fn canonical_unit(number: &str, spaced: bool, word: &str) -> String {
    let lowered = word.to_ascii_lowercase();
    let canonical = canonical_word(&lowered).unwrap_or(&lowered);

    let separator = if spaced { " " } else { "" };
    strip_markers(&format!("{number}{separator}{canonical}"))
}

/// Returns the canonical spelling of a unit word, if it is one we recognise.
pub fn canonical_word(word: &str) -> Option<&'static str> {
    let lowered = word.to_ascii_lowercase();
    UNIT_TABLE.iter().find(|(spelling, _)| *spelling == lowered).map(|(_, canonical)| *canonical)
}

/// Light cleanup applied to every stored unit size: drops `#` and all whitespace.
///
/// `"500 ml"` becomes `"500ml"`, `" #1 kg "` becomes `"1kg"`.
pub fn tidy_unit(unit: &str) -> String {
    unit.chars().filter(|c| *c != '#' && !c.is_whitespace()).collect()
}

fn strip_markers(s: &str) -> String {
    s.replace(|c: char| c == '#' || c == ':', "")
}
