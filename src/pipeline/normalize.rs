//! Normalisation: deterministic cleanup of model text before structured parsing.
//!
//! Even when told to "return only a JSON object", models wrap the object in
//! ` ```json ` fences, typeset quotes as “curly” quotes and break long string
//! values across raw newlines, which JSON forbids. These rules undo those
//! habits without trying to understand the content.
//!
//! ## Rule Order
//!
//! Invisible characters go first: a zero-width space between backticks
//! would otherwise hide a fence marker until after fences were stripped.
//! Fences go next so their language tag never survives into the text, and
//! whitespace is collapsed last because the earlier rules may leave gaps
//! behind.
//!
//! Every rule is idempotent, so [`normalize`] is too: normalising already
//! normalised text returns it unchanged.

use once_cell::sync::Lazy;
use regex::Regex;

/// Apply all normalisation rules to extracted model text.
///
/// Rules (applied in order):
/// 1. Strip invisible Unicode (zero-width spaces, BOM, soft hyphens, joiners)
/// 2. Strip triple-backtick fences and their optional language tag
/// 3. Map typographic quotes and apostrophes to their ASCII forms
/// 4. Collapse every whitespace run (newlines, tabs, NBSP, …) to one space and trim
pub fn normalize(input: &str) -> String {
    let s = remove_invisible_chars(input);
    let s = strip_fences(&s);
    let s = normalise_quotes(&s);
    collapse_whitespace(&s)
}

// ── Rule 1: Remove invisible Unicode characters ─────────────────────────────

fn remove_invisible_chars(input: &str) -> String {
    input.replace(
        [
            '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}',
        ],
        "",
    )
}

// ── Rule 2: Strip fences ─────────────────────────────────────────────────────

static RE_OUTER_FENCES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```[A-Za-z0-9_+\-]*[ \t]*\r?\n(.*?)\r?\n?```\s*$").unwrap());

static RE_FENCE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:[A-Za-z][A-Za-z0-9_+\-]*)?").unwrap());

/// Remove fence markers.
///
/// A response that is exactly one fenced block is unwrapped first; any
/// remaining fence markers (a block preceded by prose, several blocks) are
/// deleted wherever they occur, leaving the surrounding text for the
/// balanced-block scan to sort out. Deletion repeats until no marker is left
/// so that removing one marker can never splice a new one together.
pub(crate) fn strip_fences(input: &str) -> String {
    let trimmed = input.trim();
    let mut s = match RE_OUTER_FENCES.captures(trimmed) {
        Some(caps) => caps[1].to_string(),
        None => trimmed.to_string(),
    };
    while s.contains("```") {
        s = RE_FENCE_MARKER.replace_all(&s, " ").into_owned();
    }
    s
}

// ── Rule 3: Normalise quotes ─────────────────────────────────────────────────

fn normalise_quotes(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' | '\u{FF02}' => '"',
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' | '\u{FF07}' => '\'',
            other => other,
        })
        .collect()
}

// ── Rule 4: Collapse whitespace ──────────────────────────────────────────────

// `\s` is Unicode-aware: it covers CR/LF, tabs, NBSP and the U+2000 block.
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

fn collapse_whitespace(input: &str) -> String {
    RE_WHITESPACE.replace_all(input.trim(), " ").into_owned()
}

// ── Tests ────────────────────────────────────────────────────────────────────
