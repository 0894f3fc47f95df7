//! Ordered text-cleaning transforms and the fixed English stop-word list.
//!
//! Each transform is a pure `&str -> String` function; [`clean_text`] chains
//! them in the one order the rest of the pipeline assumes:
//!
//! 1. Replace runs of non-word characters with a single space
//! 2. Replace isolated single letters with a single space
//! 3. Replace a leading single letter with a single space
//! 4. Collapse whitespace runs into single spaces
//! 5. Strip a leading literal `b ` artifact
//! 6. Lowercase
//! 7. Tokenize, drop stop words, lemmatize, rejoin
//!
//! The `b ` strip must run after whitespace collapse and before lowercasing;
//! the earlier steps assume punctuation has already been spaced out.

use crate::lemma;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").unwrap());
static ISOLATED_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+[a-zA-Z]\s+").unwrap());
static LEADING_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]\s+").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+").unwrap());
static BYTES_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^b\s+").unwrap());

/// Replace every run of non-word characters with a single space.
pub fn strip_non_word(text: &str) -> String {
    NON_WORD.replace_all(text, " ").into_owned()
}

/// Replace every single alphabetic character surrounded by whitespace with a
/// single space.
///
/// Applied to fixpoint: a single left-to-right pass consumes the whitespace
/// after a match, so in a run like `A B C` every second letter would survive.
pub fn drop_isolated_chars(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = ISOLATED_CHAR.replace_all(&current, " ").into_owned();
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Replace a single alphabetic character at the start of the string, followed
/// by whitespace, with a single space.
pub fn drop_leading_single_char(text: &str) -> String {
    LEADING_CHAR.replace(text, " ").into_owned()
}

/// Collapse every whitespace run into a single space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").into_owned()
}

/// Strip a leading `b ` prefix, an artifact of byte-string reprs leaking into
/// scraped text.
pub fn strip_bytes_prefix(text: &str) -> String {
    BYTES_PREFIX.replace(text, "").into_owned()
}

/// Whether a (lowercased) token is on the fixed English stop-word list.
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORD_SET.contains(token)
}

/// Run the full cleaning chain over one text value.
pub fn clean_text(input: &str) -> String {
    let text = strip_non_word(input);
    let text = drop_isolated_chars(&text);
    let text = drop_leading_single_char(&text);
    let text = collapse_whitespace(&text);
    let text = strip_bytes_prefix(&text);
    let text = text.to_lowercase();

    text.split_whitespace()
        .filter(|token| !is_stop_word(token))
        .map(lemma::lemmatize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The fixed English stop-word reference list.
///
/// Kept complete even though the punctuation pass means contracted forms can
/// never reach the filter intact.
pub const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

static STOP_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORDS.iter().copied().collect());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_non_word_collapses_punctuation_runs() {
        assert_eq!(strip_non_word("Hello, world!!"), "Hello world ");
        assert_eq!(strip_non_word("a--b"), "a b");
        assert_eq!(strip_non_word("no punctuation"), "no punctuation");
    }

    #[test]
    fn test_drop_isolated_chars_removes_adjacent_singles() {
        // A single pass would leave "B" behind.
        assert_eq!(drop_isolated_chars("word A B test"), "word test");
        assert_eq!(drop_isolated_chars("x marks a spot"), "x marks spot");
        assert_eq!(drop_isolated_chars("keep 7 digits"), "keep 7 digits");
    }

    #[test]
    fn test_drop_leading_single_char() {
        assert_eq!(drop_leading_single_char("A cat"), " cat");
        assert_eq!(drop_leading_single_char("At dawn"), "At dawn");
        assert_eq!(drop_leading_single_char("b prefix"), " prefix");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a  b\t c\n\nd"), "a b c d");
    }

    #[test]
    fn test_strip_bytes_prefix_only_at_start() {
        assert_eq!(strip_bytes_prefix("b word"), "word");
        assert_eq!(strip_bytes_prefix("word b word"), "word b word");
        assert_eq!(strip_bytes_prefix("bword"), "bword");
    }

    #[test]
    fn test_clean_text_full_chain() {
        let merged = "Hello World! A B test. tag1 tag2 ";
        let cleaned = clean_text(merged);

        assert_eq!(cleaned, "hello world test tag1 tag2");
        assert!(cleaned.chars().all(|c| c.is_alphanumeric() || c == ' '));
        assert!(cleaned.split_whitespace().all(|t| t.len() > 1));
        assert!(cleaned.split_whitespace().all(|t| !is_stop_word(t)));
        assert_eq!(cleaned, cleaned.to_lowercase());
    }

    #[test]
    fn test_clean_text_removes_stop_words() {
        assert_eq!(clean_text("the market is in a rally"), "market rally");
    }

    #[test]
    fn test_clean_text_idempotent_on_clean_input() {
        let cleaned = clean_text("Stocks! Markets rallied; the b A economy...");
        assert_eq!(clean_text(&cleaned), cleaned);

        let already_clean = "hello world test tag1 tag2";
        assert_eq!(clean_text(already_clean), already_clean);
    }

    #[test]
    fn test_clean_text_placeholder_only_input_is_empty() {
        assert_eq!(clean_text("     "), "");
        assert_eq!(clean_text(" "), "");
    }

    #[test]
    fn test_stop_word_lookup() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("wouldn't"));
        assert!(!is_stop_word("market"));
    }
}
