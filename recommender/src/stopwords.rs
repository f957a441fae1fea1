//! Stopword list used during keyword extraction. Kept as data so tests
//! and future localization can swap it without touching the logic.

use once_cell::sync::Lazy;
use std::collections::HashSet;

const STOPWORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we",
    "say", "her", "she", "or", "an", "will", "my", "one", "all", "would", "there", "their",
    "what", "so", "up", "out", "if", "about", "who", "get", "which", "go", "me", "when", "make",
    "can", "like", "time", "no", "just", "him", "know", "take", "people", "into", "year", "your",
    "good", "some", "could", "them", "see", "other", "than", "then", "now", "look", "only",
    "come", "its", "over", "think", "also", "back", "after", "use", "two", "how", "our", "work",
    "first", "well", "way", "even", "new", "want", "because", "any", "these", "give", "day",
    "most", "us", "is", "was", "are", "been", "has", "had", "were", "said", "did", "having",
    "may", "am", "being", "does", "done",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOPWORDS.iter().copied().collect());

pub fn stopwords() -> &'static HashSet<&'static str> {
    &STOPWORD_SET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_words_are_stopwords() {
        let words = stopwords();
        assert!(words.contains("the"));
        assert!(words.contains("because"));
        assert!(words.contains("people"));
        assert!(!words.contains("tournament"));
    }
}
