//! Text Preprocessor: cleanup of raw PDF text and syllabus section slicing.
//!
//! Both operations are pure and run once on a document before it reaches the
//! prompt builders.

use once_cell::sync::Lazy;
use regex::Regex;

static TAB_OR_CR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\t\r]").unwrap());
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());
static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").unwrap());
static LEADING_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[^\S\n]+").unwrap());

/// Section headers that open the syllabus of an edital, in priority order.
/// Matching is case-insensitive and tolerates missing accents.
const SECTION_HEADERS: &[&str] = &[
    r"conte[úu]dos?\s+program[áa]ticos?",
    r"programas?\s+d[aeo]s?\s+provas?",
    r"conhecimentos\s+espec[íi]ficos",
    r"conhecimentos\s+b[áa]sicos",
];

static SECTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    SECTION_HEADERS
        .iter()
        .map(|header| Regex::new(&format!("(?i){header}")).unwrap())
        .collect()
});

/// Normalizes whitespace in text extracted from a PDF.
///
/// Tabs and carriage returns become single spaces, blank-line runs collapse to
/// one newline, space runs collapse to one space, every line loses its leading
/// whitespace and the whole string is trimmed.
pub fn clean_text(raw: &str) -> String {
    let text = TAB_OR_CR.replace_all(raw, " ");
    let text = BLANK_LINES.replace_all(&text, "\n");
    let text = SPACE_RUNS.replace_all(&text, " ");
    let text = LEADING_WS.replace_all(&text, "");
    text.trim().to_string()
}

/// Returns everything after the first syllabus header found, trimmed.
///
/// Headers are tried in `SECTION_HEADERS` order; the first header that occurs
/// anywhere in the text wins, even if a later header occurs earlier in it.
pub fn extract_section(text: &str) -> Option<String> {
    SECTION_PATTERNS.iter().find_map(|pattern| {
        pattern
            .find(text)
            .map(|m| text[m.end()..].trim().to_string())
    })
}
