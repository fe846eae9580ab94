//! # Verse Segmentation
//!
//! Chapter content is one string with `[n]` markers in front of each verse:
//!
//! ```text
//! "     [1] In the beginning...  [2] The earth was formless..."
//!  └──── marker ────┘└─ text ─┘└─ marker ┘└──── text ────┘
//! ```
//!
//! [`segments`] cuts the string into alternating marker and text slices.
//! Markers swallow the whitespace around them, so concatenating every
//! segment gives back the original string byte for byte.

use once_cell::sync::Lazy;
use regex::Regex;

static VERSE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\[\d+\]\s*").unwrap());
static BRACKETED_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\d+\]").unwrap());
static BARE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+\s+").unwrap());

/// One slice of chapter content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A verse marker including its surrounding whitespace, e.g. `"  [2] "`.
    Marker(&'a str),
    /// Verse text between markers (may be empty).
    Text(&'a str),
}

/// Split content into markers and the text between them.
///
/// Always starts and ends with a `Text` segment (possibly empty), with
/// markers strictly alternating in between.
pub fn segments(content: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut last = 0;
    for m in VERSE_MARKER.find_iter(content) {
        out.push(Segment::Text(&content[last..m.start()]));
        out.push(Segment::Marker(m.as_str()));
        last = m.end();
    }
    out.push(Segment::Text(&content[last..]));
    out
}

/// Display-only filter used when verse numbers are hidden.
///
/// Drops `[n]` markers, then any bare number followed by whitespace. The
/// second step also eats numerals inside verse text ("about 10 cubits").
pub fn strip_verse_numbers(content: &str) -> String {
    let without_markers = BRACKETED_NUMBER.replace_all(content, "");
    BARE_NUMBER
        .replace_all(&without_markers, "")
        .trim()
        .to_string()
}
