//! Frequency-ranked keyword extraction

use crate::processing::text_processor::TextProcessor;
use std::sync::Arc;

pub const MAX_KEYWORDS: usize = 50;

#[derive(Clone)]
pub struct KeywordExtractor {
    processor: Arc<TextProcessor>,
}

impl KeywordExtractor {
    pub fn new(processor: Arc<TextProcessor>) -> Self {
        Self { processor }
    }

    /// Top 50 keywords, most frequent first
    pub fn extract(&self, text: &str) -> Vec<String> {
        self.extract_top(text, MAX_KEYWORDS)
    }

    /// Top `limit` keywords. Ties keep first-occurrence order.
    pub fn extract_top(&self, text: &str, limit: usize) -> Vec<String> {
        let tokens = self.processor.keyword_tokens(text);
        let mut counts = TextProcessor::frequencies(&tokens);

        // stable: equal counts stay in first-seen order
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        counts
            .into_iter()
            .take(limit)
            .map(|(word, _)| word)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> KeywordExtractor {
        KeywordExtractor::new(Arc::new(TextProcessor::new()))
    }

    #[test]
    fn test_empty_text() {
        assert!(extractor().extract("").is_empty());
        assert!(extractor().extract("   \n\t ").is_empty());
    }

    #[test]
    fn test_frequency_order() {
        let text = "Rust Rust programming language. Rust is memory safe. Programming with Rust is fun.";
        let keywords = extractor().extract(text);

        assert_eq!(keywords[0], "rust");
        assert_eq!(keywords[1], "programming");
        assert!(!keywords.contains(&"is".to_string()));
        assert!(keywords.contains(&"fun".to_string()));
    }

    #[test]
    fn test_ties_keep_first_occurrence() {
        let keywords = extractor().extract("zebra apple mango apple zebra mango");
        assert_eq!(keywords, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_bounded_to_fifty() {
        let text: Vec<String> = (0..120).map(|i| format!("term{:03}", i)).collect();
        let keywords = extractor().extract(&text.join(" "));

        assert_eq!(keywords.len(), MAX_KEYWORDS);
        assert_eq!(keywords[0], "term000");
    }

    #[test]
    fn test_deterministic() {
        let text = "Kubernetes docker terraform docker kubernetes helm";
        assert_eq!(extractor().extract(text), extractor().extract(text));
    }
}
