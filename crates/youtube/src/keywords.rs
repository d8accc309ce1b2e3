//! Search query construction from journal text

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Terms used when building a video search query
pub const DEFAULT_MAX_TERMS: usize = 3;

/// Words shorter than this never make it into a query
const MIN_WORD_LEN: usize = 3;

const STOP_WORDS: &[&str] = &[
    "about", "after", "again", "all", "also", "and", "any", "are", "because", "been", "before",
    "being", "but", "can", "could", "day", "did", "does", "doing", "don't", "down", "each", "even",
    "felt", "few", "for", "from", "further", "get", "got", "had", "has", "have", "having", "her",
    "here", "hers", "herself", "him", "himself", "his", "how", "i'm", "into", "it's", "its",
    "itself", "just", "like", "more", "most", "much", "myself", "not", "now", "off", "once",
    "only", "other", "our", "ours", "out", "over", "own", "pretty", "really", "same", "she",
    "should", "some", "such", "than", "that", "the", "their", "theirs", "them", "then", "there",
    "these", "they", "this", "those", "through", "today", "too", "under", "until", "very", "was",
    "way", "were", "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with",
    "would", "you", "your", "yours", "yourself",
];

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"[\p{L}\p{N}]+(?:'\p{L}+)?").expect("word pattern is valid")
    })
}

/// Lowercased words worth searching for, in text order
pub fn keywords(text: &str) -> Vec<String> {
    // Phone keyboards type ’ for the apostrophe
    let lowered = text.to_lowercase().replace('\u{2019}', "'");
    word_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|word| word.chars().count() >= MIN_WORD_LEN)
        .filter(|word| !STOP_WORDS.contains(word))
        .filter(|word| !word.chars().all(char::is_numeric))
        .map(str::to_string)
        .collect()
}

/// Most frequent keywords, ties broken by first appearance
pub fn top_terms(text: &str, max_terms: usize) -> Vec<String> {
    // word -> (count, first position)
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, word) in keywords(text).into_iter().enumerate() {
        counts.entry(word).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
        count_b.cmp(count_a).then(first_a.cmp(first_b))
    });

    ranked
        .into_iter()
        .take(max_terms)
        .map(|(word, _)| word)
        .collect()
}

/// Space-joined query from the top terms; empty when nothing qualifies
pub fn search_query(text: &str, max_terms: usize) -> String {
    top_terms(text, max_terms).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY: &str = "today was a really weird day, but I hardly slept. I was pretty sad because of it. \
        my dog is doing better today. I had my favorite cereal and it really motivated me. \
        Specifically frosted flakes.";

    #[test]
    fn test_keywords_drop_stop_words_and_short_words() {
        let words = keywords("I ran to the park with my dog");
        assert_eq!(words, vec!["ran", "park", "dog"]);
    }

    #[test]
    fn test_keywords_keep_contractions_together() {
        let words = keywords("I can't sleep, I'm tired");
        assert_eq!(words, vec!["can't", "sleep", "tired"]);
    }

    #[test]
    fn test_keywords_keep_accented_words_whole() {
        assert_eq!(search_query("Café café résumé naïve", 3), "café résumé naïve");
        assert_eq!(search_query("Müde müde Straße", 3), "müde straße");
    }

    #[test]
    fn test_keywords_curly_apostrophe() {
        assert_eq!(keywords("I don’t know, I can’t sleep"), vec!["know", "can't", "sleep"]);
        assert_eq!(search_query("I don’t know, I don’t care", 3), "know care");
    }

    #[test]
    fn test_top_terms_by_frequency_then_position() {
        let terms = top_terms("guitar piano guitar drums piano guitar violin", 3);
        assert_eq!(terms, vec!["guitar", "piano", "drums"]);
    }

    #[test]
    fn test_search_query_from_entry() {
        assert_eq!(search_query(ENTRY, DEFAULT_MAX_TERMS), "weird hardly slept");
    }

    #[test]
    fn test_search_query_empty_when_nothing_left() {
        assert_eq!(search_query("I am so it is 2024", DEFAULT_MAX_TERMS), "");
        assert_eq!(search_query("", DEFAULT_MAX_TERMS), "");
    }
}
