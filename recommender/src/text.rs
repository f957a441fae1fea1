//! Regex-driven hashtag and keyword extraction shared by the profile
//! builder and the scorer.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::stopwords::stopwords;

static HASHTAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#[A-Za-z0-9_]+").unwrap());
static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());
static NON_ALPHA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z\s]").unwrap());

/// All hashtag tokens in a post, lowercased, duplicates included.
pub fn extract_hashtags(content: &str) -> impl Iterator<Item = String> + '_ {
    HASHTAG_RE
        .find_iter(content)
        .map(|m| m.as_str().to_lowercase())
}

/// Top keywords across the given contents by descending frequency.
/// Hashtags, URLs, and non-alphabetic characters are stripped first;
/// short words and stopwords are dropped. Ties keep encounter order.
pub fn extract_keywords(contents: &[&str], min_len: usize, max_keywords: usize) -> Vec<String> {
    let stopword_set = stopwords();
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for content in contents {
        let cleaned = HASHTAG_RE.replace_all(content, "");
        let cleaned = URL_RE.replace_all(&cleaned, "");
        let cleaned = NON_ALPHA_RE.replace_all(&cleaned, " ").to_lowercase();

        for word in cleaned.split_whitespace() {
            if word.len() < min_len || stopword_set.contains(word) {
                continue;
            }
            match index.get(word) {
                Some(&at) => counts[at].1 += 1,
                None => {
                    index.insert(word.to_string(), counts.len());
                    counts.push((word.to_string(), 1));
                }
            }
        }
    }

    // Stable sort keeps encounter order for equal frequencies
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(max_keywords)
        .map(|(word, _)| word)
        .collect()
}

/// Case-insensitive whole-word pattern for one profile keyword.
pub fn keyword_pattern(keyword: &str) -> Option<Regex> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(keyword))).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashtag_extraction_lowercases() {
        let tags: Vec<String> = extract_hashtags("Loving #Gaming and #GameDev_2 today").collect();
        assert_eq!(tags, vec!["#gaming", "#gamedev_2"]);
    }

    #[test]
    fn test_hashtag_extraction_keeps_duplicates() {
        let tags: Vec<String> = extract_hashtags("#gaming again #gaming").collect();
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_keyword_extraction_filters_noise() {
        let contents = vec![
            "Check out the tournament results at https://example.com/scores #gaming",
            "What a tournament! Great finals.",
        ];
        let keywords = extract_keywords(&contents, 4, 30);

        assert_eq!(keywords[0], "tournament");
        // Hashtag and URL text never become keywords
        assert!(!keywords.iter().any(|k| k.contains("gaming")));
        assert!(!keywords.iter().any(|k| k.contains("example")));
        // "the", "What", "at" are stopwords or too short
        assert!(!keywords.contains(&"the".to_string()));
        assert!(!keywords.contains(&"what".to_string()));
    }

    #[test]
    fn test_keyword_frequency_order_with_stable_ties() {
        let contents = vec!["alpha bravo alpha charlie bravo alpha", "delta charlie"];
        let keywords = extract_keywords(&contents, 4, 30);

        assert_eq!(keywords[0], "alpha");
        assert_eq!(keywords[1], "bravo");
        // charlie and delta both appear once; charlie was seen first
        assert_eq!(keywords[2], "charlie");
        assert_eq!(keywords[3], "delta");
    }

    #[test]
    fn test_keyword_cap() {
        let content: String = (0..40)
            .map(|i| format!("word{:02} ", i))
            .collect::<String>()
            .repeat(2);
        let contents = vec![content.as_str()];
        let keywords = extract_keywords(&contents, 4, 30);
        assert_eq!(keywords.len(), 30);
    }

    #[test]
    fn test_keyword_pattern_is_whole_word() {
        let pattern = keyword_pattern("art").unwrap();
        assert!(pattern.is_match("modern ART exhibits"));
        assert!(!pattern.is_match("the project started"));
    }
}
