//! Shared caption text metrics: word, emoji, and hashtag counts.
//!
//! Used by both the evidence extractor (to measure a creator's history)
//! and the consistency scorer (to measure generated output), so both
//! sides of a comparison count the same way.

use std::sync::LazyLock;

use regex::Regex;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+").expect("word regex is valid"));

static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\w+").expect("hashtag regex is valid"));

/// Unicode blocks counted as emoji: emoticons, misc symbols &
/// pictographs, transport & map, supplemental symbols, regional
/// indicators (flags), and the dingbat range.
const EMOJI_BLOCKS: &[(u32, u32)] = &[
    (0x1F600, 0x1F64F),
    (0x1F300, 0x1F5FF),
    (0x1F680, 0x1F6FF),
    (0x1F900, 0x1F9FF),
    (0x1F1E6, 0x1F1FF),
    (0x2600, 0x27BF),
];

#[must_use]
pub fn is_emoji(c: char) -> bool {
    let cp = c as u32;
    EMOJI_BLOCKS.iter().any(|&(lo, hi)| cp >= lo && cp <= hi)
}

/// Structural metrics of one caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMetrics {
    /// ASCII-alphabetic word runs (hashtag bodies count as words too;
    /// both sides of every comparison count identically, so the bias
    /// cancels out).
    pub word_count: usize,
    pub emoji_count: usize,
    pub hashtag_count: usize,
}

#[must_use]
pub fn analyze(text: &str) -> TextMetrics {
    TextMetrics {
        word_count: WORD_RE.find_iter(text).count(),
        emoji_count: text.chars().filter(|&c| is_emoji(c)).count(),
        hashtag_count: HASHTAG_RE.find_iter(text).count(),
    }
}

/// The opening clause of a caption: the first sentence, capped at
/// `max_words` whitespace-separated tokens.
#[must_use]
pub fn opening_clause(text: &str, max_words: usize) -> String {
    let first_sentence = text
        .split(['.', '!', '?', '\n'])
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or("");
    let words: Vec<&str> = first_sentence.split_whitespace().take(max_words).collect();
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_zero_metrics() {
        let m = analyze("");
        assert_eq!(m.word_count, 0);
        assert_eq!(m.emoji_count, 0);
        assert_eq!(m.hashtag_count, 0);
    }

    #[test]
    fn counts_plain_words() {
        assert_eq!(analyze("three little words").word_count, 3);
    }

    #[test]
    fn counts_emoji_code_points() {
        let m = analyze("leg day 💪🔥 done ✅");
        assert_eq!(m.emoji_count, 3);
        assert_eq!(m.word_count, 3);
    }

    #[test]
    fn digits_are_not_emoji() {
        assert_eq!(analyze("top 10 tips in 2025").emoji_count, 0);
    }

    #[test]
    fn counts_hashtags() {
        let m = analyze("new drop! #fitness #gym_life #day1");
        assert_eq!(m.hashtag_count, 3);
    }

    #[test]
    fn hashtag_bodies_also_count_as_words() {
        // "#fitness" contributes one hashtag and one word run.
        let m = analyze("#fitness");
        assert_eq!(m.hashtag_count, 1);
        assert_eq!(m.word_count, 1);
    }

    #[test]
    fn opening_clause_takes_first_sentence() {
        assert_eq!(
            opening_clause("Ever skipped leg day? Me too. Here's why.", 12),
            "Ever skipped leg day"
        );
    }

    #[test]
    fn opening_clause_caps_word_count() {
        let long = "one two three four five six seven eight nine ten eleven twelve thirteen";
        assert_eq!(
            opening_clause(long, 5).split_whitespace().count(),
            5,
            "clause should be capped at 5 words"
        );
    }

    #[test]
    fn opening_clause_skips_leading_punctuation_fragments() {
        assert_eq!(opening_clause("...finally back", 12), "finally back");
    }

    #[test]
    fn opening_clause_of_empty_text_is_empty() {
        assert_eq!(opening_clause("", 12), "");
    }
}
