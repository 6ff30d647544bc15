//! Seller text cleanup and the brief confidence heuristic.
//!
//! Both functions are pure and total: any input produces a value, and an
//! empty input produces an empty brief with zero confidence.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::EnhancedBrief;

/// Words that mark a brief as being about something for sale.
pub const PRODUCT_KEYWORDS: &[&str] = &[
    "product", "item", "sell", "buy", "price", "feature", "benefit", "quality", "brand",
];

const BASE_SCORE: f64 = 0.5;
const KEYWORD_WEIGHT: f64 = 0.05;
const KEYWORD_CAP: f64 = 0.15;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static RE_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s\-.,!?:;]").unwrap());

/// Clean raw seller text and score the result.
pub fn enhance(text: &str) -> EnhancedBrief {
    let text = clean(text);
    let confidence = score(&text);
    EnhancedBrief { text, confidence }
}

/// Normalize whitespace, drop disallowed characters, capitalize sentences
/// and terminate with a period.
pub fn clean(text: &str) -> String {
    let collapsed = RE_WHITESPACE.replace_all(text.trim(), " ");
    let stripped = RE_DISALLOWED.replace_all(&collapsed, "");

    let sentences: Vec<String> = stripped
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(capitalize_first)
        .collect();

    let mut enhanced = sentences.join(". ");
    if !enhanced.is_empty() && !enhanced.ends_with('.') {
        enhanced.push('.');
    }
    enhanced
}

/// Heuristic completeness score for an already-cleaned brief.
pub fn score(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    let word_count = text.split_whitespace().count();
    let sentence_count = text.split('.').filter(|s| !s.trim().is_empty()).count();

    let mut confidence = BASE_SCORE;

    // 10..=100 words is the sweet spot
    if (10..=100).contains(&word_count) {
        confidence += 0.2;
    } else if word_count > 5 {
        confidence += 0.1;
    }

    if sentence_count >= 2 {
        confidence += 0.15;
    } else if sentence_count >= 1 {
        confidence += 0.1;
    }

    let lowered = text.to_lowercase();
    let keyword_matches = PRODUCT_KEYWORDS
        .iter()
        .filter(|keyword| lowered.contains(**keyword))
        .count();
    confidence += (keyword_matches as f64 * KEYWORD_WEIGHT).min(KEYWORD_CAP);

    confidence.min(1.0)
}

fn capitalize_first(sentence: &str) -> String {
    let mut chars = sentence.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // --- clean ---

    #[test]
    fn collapses_whitespace_and_adds_period() {
        assert_eq!(clean("  hello   world  "), "Hello world.");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("   \t\n "), "");
    }

    #[test]
    fn only_periods_yields_empty() {
        assert_eq!(clean("..."), "");
    }

    #[test]
    fn capitalizes_each_sentence() {
        assert_eq!(clean("great lamp. works well"), "Great lamp. Works well.");
        assert_eq!(clean("a.b"), "A. B.");
    }

    #[test]
    fn keeps_allowed_punctuation() {
        assert_eq!(clean("price: $20!! buy now"), "Price: 20!! buy now.");
        assert_eq!(clean("hand-made; oak, walnut?"), "Hand-made; oak, walnut?.");
    }

    #[test]
    fn strips_symbols_after_whitespace_collapse() {
        // The removed emoji leaves its surrounding spaces behind.
        assert_eq!(clean("lamp 💡 bright"), "Lamp  bright.");
    }

    #[test]
    fn unicode_letters_survive() {
        assert_eq!(clean("ünïcode ok"), "Ünïcode ok.");
    }

    #[test]
    fn newlines_become_spaces() {
        assert_eq!(clean("solid oak\n\nchair"), "Solid oak chair.");
    }

    // --- score ---

    #[test]
    fn empty_text_scores_zero() {
        assert_eq!(score(""), 0.0);
        let brief = enhance("");
        assert_eq!(brief.text, "");
        assert_eq!(brief.confidence, 0.0);
    }

    #[test]
    fn short_single_sentence() {
        // base + one sentence
        assert!(approx(score("Nice mug."), 0.6));
    }

    #[test]
    fn mid_length_with_one_keyword() {
        // 7 words (+0.1), one sentence (+0.1), "sell" (+0.05)
        assert!(approx(score("Selling a mug with a nice handle."), 0.75));
    }

    #[test]
    fn full_marks_are_capped_at_one() {
        let text = "This product is a quality item made from solid oak wood. \
                    It is built to last for many years.";
        assert_eq!(text.split_whitespace().count(), 19);
        assert!(approx(score(text), 1.0));
        assert!(score(text) <= 1.0);
    }

    #[test]
    fn keyword_bonus_is_capped() {
        // 4 keywords would be 0.20 uncapped.
        let text = "Product item price brand.";
        // 4 words (+0), one sentence (+0.1), keywords capped at 0.15
        assert!(approx(score(text), 0.75));
    }

    #[test]
    fn keywords_match_case_insensitively_and_as_substrings() {
        assert!(approx(score("BRANDED."), 0.65));
        assert!(approx(score("Features."), 0.65));
    }

    #[test]
    fn very_long_text_gets_small_word_bonus() {
        let text = format!("{}.", vec!["word"; 120].join(" "));
        assert!(approx(score(&text), 0.7));
    }

    #[test]
    fn enhance_scores_the_cleaned_text() {
        let brief = enhance("  hello   world  ");
        assert_eq!(brief.text, "Hello world.");
        assert!(approx(brief.confidence, score("Hello world.")));
    }
}
