//! Text normalization applied to extracted content.
//!
//! Both extraction tiers funnel their output through these functions before
//! any length check happens downstream.

use std::sync::LazyLock;

use regex::Regex;

/// Phrases that mark the start of page chrome (footers, legal blurbs,
/// accessibility links) rather than article text.
///
/// Matching is case-insensitive; the earliest occurrence of any marker wins.
pub const BOILERPLATE_MARKERS: &[&str] = &[
    "skip to content",
    "copyright",
    "all rights reserved",
    "privacy policy",
    "terms of service",
];

static BLANK_LINE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n").unwrap());

static BOILERPLATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives: Vec<String> = BOILERPLATE_MARKERS.iter().map(|m| regex::escape(m)).collect();
    Regex::new(&format!("(?i)({})", alternatives.join("|"))).unwrap()
});

/// Collapses every run of whitespace (including newlines) to a single space.
///
/// Leading and trailing whitespace is dropped. Running it twice is the same
/// as running it once.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes markdown-ish text returned by the scraping service.
///
/// Runs of three or more newlines become one blank line, then all whitespace
/// runs collapse to single spaces and the result is trimmed.
pub fn normalize_markdown(text: &str) -> String {
    let paragraphs = BLANK_LINE_RUNS.replace_all(text, "\n\n");
    collapse_whitespace(&paragraphs)
}

/// Cuts `text` at the first boilerplate marker, dropping the marker and
/// everything after it.
pub fn strip_boilerplate(text: &str) -> &str {
    match BOILERPLATE_PATTERN.find(text) {
        Some(m) => &text[..m.start()],
        None => text,
    }
}

/// Full cleanup pass for heuristically extracted body text.
pub fn clean_body_text(text: &str) -> String {
    let collapsed = collapse_whitespace(text);
    strip_boilerplate(&collapsed).trim().to_string()
}

/// Truncates `text` to at most `max_chars` characters.
///
/// Returns the original slice when it already fits. Counts `char`s, so it
/// never splits a UTF-8 sequence.
pub fn truncate_chars(text: &str, max_chars: usize) -> Option<&str> {
    text.char_indices().nth(max_chars).map(|(idx, _)| &text[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \t b\n\n c  "), "a b c");
        assert_eq!(collapse_whitespace(""), "");
        assert_eq!(collapse_whitespace(" \n\t "), "");
    }

    #[test]
    fn test_collapse_whitespace_idempotent() {
        let samples = [
            "plain",
            "  lots   of\n\n\nspace \t here ",
            "\u{a0}non-breaking\u{a0} and\r\nwindows newlines",
            "",
        ];
        for sample in samples {
            let once = collapse_whitespace(sample);
            assert_eq!(collapse_whitespace(&once), once);
        }
    }

    #[test]
    fn test_normalize_markdown() {
        let md = "# Title\n\n\n\nFirst paragraph.\n\n\n\n\nSecond   paragraph.\n";
        assert_eq!(normalize_markdown(md), "# Title First paragraph. Second paragraph.");
    }

    #[test]
    fn test_normalize_markdown_idempotent() {
        let md = "  ## Heading\n\n\n- item one\n- item  two\n\n\n\n";
        let once = normalize_markdown(md);
        assert_eq!(normalize_markdown(&once), once);
    }

    #[test]
    fn test_strip_boilerplate_prefix_stable() {
        assert_eq!(clean_body_text("A B copyright C"), "A B");
    }

    #[test]
    fn test_strip_boilerplate_case_insensitive() {
        assert_eq!(
            clean_body_text("Real article text. ALL RIGHTS RESERVED 2024 Example Inc."),
            "Real article text."
        );
        assert_eq!(clean_body_text("Skip to Content Main story here"), "");
    }

    #[test]
    fn test_strip_boilerplate_earliest_marker_wins() {
        let text = "Body text Privacy Policy | Terms of Service | Copyright";
        assert_eq!(clean_body_text(text), "Body text");
    }

    #[test]
    fn test_strip_boilerplate_no_marker() {
        assert_eq!(strip_boilerplate("nothing to strip"), "nothing to strip");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), None);
        assert_eq!(truncate_chars("hello", 5), None);
        assert_eq!(truncate_chars("hello", 3), Some("hel"));
        assert_eq!(truncate_chars("héllo wörld", 4), Some("héll"));
    }
}
