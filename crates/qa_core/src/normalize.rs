use std::sync::LazyLock;

use regex::Regex;

// Word characters are letters, numbers (including `²`, `½`) and `_`. Combining
// marks and other connector punctuation do not count. Whitespace also covers
// the ASCII separators U+001C..U+001F.
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\p{L}\p{N}_\s\x1C-\x1F]").expect("valid non-word pattern")
});
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\x1C-\x1F]+").expect("valid whitespace pattern"));

fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\x1C'..='\x1F').contains(&c)
}

/// A question after light canonicalization.
///
/// Built fresh for every request and never shared between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuestion {
    /// Raw input with surrounding whitespace trimmed.
    pub original: String,
    /// Lowercased, punctuation-free, whitespace-collapsed form of `original`.
    pub processed: String,
    /// `processed` split on single spaces.
    pub tokens: Vec<String>,
}

impl NormalizedQuestion {
    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }
}

/// Normalizes a raw question. Never fails; empty input yields empty fields.
///
/// Punctuation is removed without inserting a separator, so `"2+2"` becomes `"22"`.
pub fn normalize(raw: &str) -> NormalizedQuestion {
    let original = raw.trim_matches(is_space).to_string();
    let lowered = original.to_lowercase();

    let stripped = NON_WORD.replace_all(&lowered, "");
    let processed = WHITESPACE_RUN
        .replace_all(&stripped, " ")
        .trim()
        .to_string();

    let tokens = if processed.is_empty() {
        Vec::new()
    } else {
        processed.split(' ').map(str::to_string).collect()
    };

    NormalizedQuestion {
        original,
        processed,
        tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_normalize_any_string(raw in "\\PC*") {
            let n = normalize(&raw);
            prop_assert!(n
                .processed
                .chars()
                .all(|c| c == '_' || c == ' ' || c.is_alphanumeric()));
            prop_assert_eq!(n.tokens.join(" "), n.processed.clone());
            prop_assert!(!n.processed.contains("  "));
            prop_assert!(n.tokens.iter().all(|t| !t.is_empty()));
            if n.original.is_empty() {
                prop_assert!(n.processed.is_empty());
                prop_assert!(n.tokens.is_empty());
            }
        }

        #[test]
        fn test_normalize_blank_strings(raw in "[ \t\r\n\x1C-\x1F\u{a0}\u{3000}]*") {
            let n = normalize(&raw);
            prop_assert_eq!(n.original, "");
            prop_assert_eq!(n.processed, "");
            prop_assert!(n.tokens.is_empty());
        }
    }

    #[test]
    fn test_normalize_trims_lowercases_and_strips_punctuation() {
        let n = normalize("  Hello, World!  ");
        assert_eq!(n.original, "Hello, World!");
        assert_eq!(n.processed, "hello world");
        assert_eq!(n.tokens, vec!["hello", "world"]);
    }

    #[test]
    fn test_normalize_merges_across_removed_symbols() {
        let n = normalize("What's 2+2??");
        assert_eq!(n.original, "What's 2+2??");
        assert_eq!(n.processed, "whats 22");
        assert_eq!(n.tokens, vec!["whats", "22"]);
    }

    #[test]
    fn test_normalize_empty_and_blank_input() {
        for raw in ["", "   ", "\t\n  \r\n"] {
            let n = normalize(raw);
            assert_eq!(n.original, "");
            assert_eq!(n.processed, "");
            assert!(n.tokens.is_empty());
            assert!(n.is_empty());
        }
    }

    #[test]
    fn test_normalize_punctuation_only_keeps_original() {
        let n = normalize(" ?!... ");
        assert_eq!(n.original, "?!...");
        assert!(!n.is_empty());
        assert_eq!(n.processed, "");
        assert!(n.tokens.is_empty());
    }

    #[test]
    fn test_normalize_collapses_mixed_whitespace() {
        let n = normalize("How\t many \n\n  moons   does Mars   have?");
        assert_eq!(n.processed, "how many moons does mars have");
        assert_eq!(n.tokens.len(), 6);
    }

    #[test]
    fn test_normalize_space_left_by_stripped_word() {
        // The dash is removed, leaving two spaces that collapse into one.
        let n = normalize("red - green");
        assert_eq!(n.processed, "red green");
    }

    #[test]
    fn test_normalize_keeps_unicode_letters_digits_and_underscore() {
        let n = normalize("Qué es el año_2024? Ünïcödé ЖУК 東京!");
        assert_eq!(n.processed, "qué es el año_2024 ünïcödé жук 東京");
        assert_eq!(
            n.tokens,
            vec!["qué", "es", "el", "año_2024", "ünïcödé", "жук", "東京"]
        );
    }

    #[test]
    fn test_normalize_drops_marks_and_connectors() {
        // Lowercased dotted capital I leaves a combining dot behind.
        assert_eq!(normalize("İstanbul").processed, "istanbul");
        assert_eq!(normalize("cafe\u{301}").processed, "cafe");
        assert_eq!(normalize("a‿b").processed, "ab");
    }

    #[test]
    fn test_normalize_keeps_other_numbers() {
        let n = normalize("x² ½");
        assert_eq!(n.processed, "x² ½");
        assert_eq!(n.tokens, vec!["x²", "½"]);
    }

    #[test]
    fn test_normalize_ascii_separators_are_whitespace() {
        assert_eq!(normalize("a\u{1f}b").processed, "a b");

        let n = normalize("\u{1c}hello\u{1d}");
        assert_eq!(n.original, "hello");
        assert_eq!(n.tokens, vec!["hello"]);
    }

    #[test]
    fn test_normalize_properties_hold_for_assorted_inputs() {
        let samples = [
            "Hello, World!",
            "  a  b\tc\n",
            "C++ vs. C#: which is faster?",
            "e-mail: someone@example.com",
            "¿Dónde está la biblioteca?",
            "(1) [2] {3} <4>",
            "tabs\tand\u{00a0}nbsp",
            "emoji 🚀 rocket",
            "",
        ];

        for raw in samples {
            let n = normalize(raw);
            assert_eq!(n.tokens.join(" "), n.processed, "input: {raw:?}");
            assert_eq!(n.processed, n.processed.to_lowercase(), "input: {raw:?}");
            assert!(
                n.processed
                    .chars()
                    .all(|c| c == '_' || c == ' ' || c.is_alphanumeric()),
                "input: {raw:?}"
            );
            assert!(!n.processed.contains("  "), "input: {raw:?}");
            assert_eq!(n.processed, n.processed.trim(), "input: {raw:?}");
            assert!(n.tokens.iter().all(|t| !t.is_empty()), "input: {raw:?}");
        }
    }
}
