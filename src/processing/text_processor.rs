//! Shared lexical resources and text statistics
//!
//! A [`TextProcessor`] is built once and handed to every analyzer behind an
//! `Arc`. Everything inside is read-only after construction.

use aho_corasick::{AhoCorasick, MatchKind};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

pub const ACTION_VERBS: [&str; 11] = [
    "managed", "led", "developed", "created", "implemented", "achieved",
    "improved", "increased", "designed", "coordinated", "analyzed",
];

pub const PASSIVE_INDICATORS: [&str; 5] = ["was", "were", "been", "being", "be"];

pub const RESUME_SECTIONS: [&str; 5] = ["experience", "education", "skills", "work", "employment"];

pub struct TextProcessor {
    keyword_stop_words: HashSet<&'static str>,
    vectorizer_stop_words: HashSet<&'static str>,
    passive_regex: Regex,
    email_regex: Regex,
    phone_regex: Regex,
    special_char_regex: Regex,
    non_word_regex: Regex,
    token_regex: Regex,
    action_verbs: AhoCorasick,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let email_regex = Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
            .expect("Invalid email regex");

        let phone_regex = Regex::new(r"(\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}")
            .expect("Invalid phone regex");

        let special_char_regex = Regex::new(r"[^A-Za-z0-9_\s\-.,]")
            .expect("Invalid special character regex");

        let non_word_regex = Regex::new(r"[^\w\s]").expect("Invalid non-word regex");

        let token_regex = Regex::new(r"\b\w\w+\b").expect("Invalid token regex");

        let passive_regex = Regex::new(&format!(r"(?i)\b(?:{})\b", PASSIVE_INDICATORS.join("|")))
            .expect("Invalid passive indicator regex");

        // Substring semantics: "led" also matches inside "skilled".
        let action_verbs = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(ACTION_VERBS)
            .expect("Invalid action verb patterns");

        Self {
            keyword_stop_words: KEYWORD_STOP_WORDS.iter().copied().collect(),
            vectorizer_stop_words: VECTORIZER_STOP_WORDS.iter().copied().collect(),
            passive_regex,
            email_regex,
            phone_regex,
            special_char_regex,
            non_word_regex,
            token_regex,
            action_verbs,
        }
    }

    pub fn has_email(&self, text: &str) -> bool {
        self.email_regex.is_match(text)
    }

    pub fn has_phone(&self, text: &str) -> bool {
        self.phone_regex.is_match(text)
    }

    /// Number of characters outside `[A-Za-z0-9_\s\-.,]`
    pub fn special_char_count(&self, text: &str) -> usize {
        self.special_char_regex.find_iter(text).count()
    }

    /// Whitespace-delimited word count
    pub fn word_count(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }

    /// Lower-cased keyword candidates: punctuation becomes whitespace, stop
    /// words and tokens of two characters or fewer are dropped.
    pub fn keyword_tokens(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let cleaned = self.non_word_regex.replace_all(&lowered, " ");

        cleaned
            .split_whitespace()
            .filter(|token| token.chars().count() > 2)
            .filter(|token| !self.keyword_stop_words.contains(token))
            .map(str::to_string)
            .collect()
    }

    /// Vectorizer tokens: runs of two or more word characters, with the
    /// vectorizer stop words removed. The caller lower-cases.
    pub fn vector_tokens(&self, text: &str) -> Vec<String> {
        self.token_regex
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|token| !self.vectorizer_stop_words.contains(token))
            .map(str::to_string)
            .collect()
    }

    /// Whole-word, case-insensitive occurrences of the passive-voice indicators
    pub fn passive_indicator_count(&self, text: &str) -> usize {
        self.passive_regex.find_iter(text).count()
    }

    /// Number of distinct action verbs present anywhere in the text
    pub fn action_verb_count(&self, text: &str) -> usize {
        let found: HashSet<usize> = self
            .action_verbs
            .find_overlapping_iter(text)
            .map(|m| m.pattern().as_usize())
            .collect();
        found.len()
    }

    /// Number of the standard section names found as case-insensitive substrings
    pub fn section_count(&self, text: &str) -> usize {
        let lowered = text.to_lowercase();
        RESUME_SECTIONS
            .iter()
            .filter(|section| lowered.contains(*section))
            .count()
    }

    /// Sentences that contain at least one word, never less than one
    pub fn sentence_count(&self, text: &str) -> usize {
        if text.unicode_words().next().is_none() {
            return 1;
        }

        let count = text
            .unicode_sentences()
            .filter(|s| s.unicode_words().next().is_some())
            .count();
        count.max(1)
    }

    /// Flesch Reading Ease. Ratios with a zero denominator count as zero.
    pub fn flesch_reading_ease(&self, text: &str) -> f64 {
        let words: Vec<&str> = text.unicode_words().collect();
        if words.is_empty() {
            return 206.835;
        }

        let sentences = self.sentence_count(text) as f64;

        let word_count = words.len() as f64;
        let syllables: usize = words.iter().map(|w| Self::syllable_count(w)).sum();

        206.835 - 1.015 * (word_count / sentences) - 84.6 * (syllables as f64 / word_count)
    }

    /// Vowel-group syllable estimate with a silent trailing "e"
    pub fn syllable_count(word: &str) -> usize {
        let letters: Vec<char> = word
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphabetic())
            .collect();

        if letters.is_empty() {
            return 1;
        }

        let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');

        let mut groups = 0;
        let mut previous_vowel = false;
        for &c in &letters {
            let vowel = is_vowel(c);
            if vowel && !previous_vowel {
                groups += 1;
            }
            previous_vowel = vowel;
        }

        let len = letters.len();
        if groups > 1 && letters[len - 1] == 'e' && !(len >= 2 && letters[len - 2] == 'l') {
            groups -= 1;
        }

        groups.max(1)
    }

    /// Frequency table in first-seen order
    pub fn frequencies(tokens: &[String]) -> Vec<(String, usize)> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<(String, usize)> = Vec::new();

        for token in tokens {
            match index.get(token.as_str()) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(token.as_str(), counts.len());
                    counts.push((token.clone(), 1));
                }
            }
        }

        counts
    }
}

/// English stop words used for keyword extraction
const KEYWORD_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
    "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's",
    "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "that'll", "these", "those", "am", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "having", "do",
    "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because",
    "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below",
    "to", "from", "up", "down", "in", "out", "on", "off", "over", "under", "again",
    "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t",
    "can", "will", "just", "don", "don't", "should", "should've", "now", "d", "ll",
    "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't",
    "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't",
    "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't", "mustn",
    "mustn't", "needn", "needn't", "shan", "shan't", "shouldn", "shouldn't",
    "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn", "wouldn't",
];

/// English stop words removed before TF-IDF vectorization
const VECTORIZER_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against",
    "all", "almost", "alone", "along", "already", "also", "although", "always",
    "am", "among", "amongst", "amoungst", "amount", "an", "and", "another", "any",
    "anyhow", "anyone", "anything", "anyway", "anywhere", "are", "around", "as",
    "at", "back", "be", "became", "because", "become", "becomes", "becoming",
    "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call",
    "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de",
    "describe", "detail", "do", "done", "down", "due", "during", "each", "eg",
    "eight", "either", "eleven", "else", "elsewhere", "empty", "enough", "etc",
    "even", "ever", "every", "everyone", "everything", "everywhere", "except",
    "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five", "for",
    "former", "formerly", "forty", "found", "four", "from", "front", "full",
    "further", "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence",
    "her", "here", "hereafter", "hereby", "herein", "hereupon", "hers", "herself",
    "him", "himself", "his", "how", "however", "hundred", "i", "ie", "if", "in",
    "inc", "indeed", "interest", "into", "is", "it", "its", "itself", "keep",
    "last", "latter", "latterly", "least", "less", "ltd", "made", "many", "may",
    "me", "meanwhile", "might", "mill", "mine", "more", "moreover", "most",
    "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone",
    "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once",
    "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours",
    "ourselves", "out", "over", "own", "part", "per", "perhaps", "please", "put",
    "rather", "re", "same", "see", "seem", "seemed", "seeming", "seems", "serious",
    "several", "she", "should", "show", "side", "since", "sincere", "six", "sixty",
    "so", "some", "somehow", "someone", "something", "sometime", "sometimes",
    "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter",
    "thereby", "therefore", "therein", "thereupon", "these", "they", "thick",
    "thin", "third", "this", "those", "though", "three", "through", "throughout",
    "thru", "thus", "to", "together", "too", "top", "toward", "towards", "twelve",
    "twenty", "two", "un", "under", "until", "up", "upon", "us", "very", "via",
    "was", "we", "well", "were", "what", "whatever", "when", "whence", "whenever",
    "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole",
    "whom", "whose", "why", "will", "with", "within", "without", "would", "yet",
    "you", "your", "yours", "yourself", "yourselves",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_detection() {
        let processor = TextProcessor::new();

        assert!(processor.has_email("Reach me at jane.doe@example.com today"));
        assert!(!processor.has_email("no address here"));
        assert!(processor.has_phone("Call (555) 123-4567"));
        assert!(processor.has_phone("+1 555.123.4567"));
        assert!(!processor.has_phone("call me maybe"));
    }

    #[test]
    fn test_special_char_count() {
        let processor = TextProcessor::new();

        assert_eq!(processor.special_char_count("plain text, with-dashes_and.dots"), 0);
        assert_eq!(processor.special_char_count("a@b #c $d"), 3);
    }

    #[test]
    fn test_keyword_tokens() {
        let processor = TextProcessor::new();
        let tokens = processor.keyword_tokens("The Rust engineer, and a Go dev: built APIs!");

        assert_eq!(tokens, vec!["rust", "engineer", "dev", "built", "apis"]);
    }

    #[test]
    fn test_vector_tokens_drop_stop_words() {
        let processor = TextProcessor::new();
        let tokens = processor.vector_tokens("we need a rust developer with a plan");

        assert_eq!(tokens, vec!["need", "rust", "developer", "plan"]);
    }

    #[test]
    fn test_passive_indicator_count() {
        let processor = TextProcessor::new();

        assert_eq!(processor.passive_indicator_count("It was done. They Were there being loud"), 3);
        assert_eq!(processor.passive_indicator_count("wasabi beer"), 0);
    }

    #[test]
    fn test_passive_indicators_next_to_punctuation() {
        let processor = TextProcessor::new();

        assert_eq!(processor.passive_indicator_count("It was. They were, then been; being!"), 4);
        assert_eq!(processor.passive_indicator_count("(Being) \"BE\" beings"), 2);
    }

    #[test]
    fn test_sentence_count_without_words() {
        let processor = TextProcessor::new();

        assert_eq!(processor.sentence_count(""), 1);
        assert_eq!(processor.sentence_count("   \n\t"), 1);
        assert_eq!(processor.sentence_count("?!..."), 1);
        assert_eq!(processor.sentence_count("One here. Two here! Three?"), 3);
    }

    #[test]
    fn test_action_verb_count_is_distinct() {
        let processor = TextProcessor::new();

        assert_eq!(processor.action_verb_count("Managed and managed and MANAGED"), 1);
        assert_eq!(processor.action_verb_count("Designed systems, Improved latency"), 2);
        assert_eq!(processor.action_verb_count("nothing relevant"), 0);
    }

    #[test]
    fn test_syllable_count() {
        assert_eq!(TextProcessor::syllable_count("cat"), 1);
        assert_eq!(TextProcessor::syllable_count("make"), 1);
        assert_eq!(TextProcessor::syllable_count("table"), 2);
        assert_eq!(TextProcessor::syllable_count("engineering"), 4);
        assert_eq!(TextProcessor::syllable_count("2024"), 1);
    }

    #[test]
    fn test_flesch_reading_ease() {
        let processor = TextProcessor::new();

        assert_eq!(processor.flesch_reading_ease(""), 206.835);
        assert_eq!(processor.flesch_reading_ease("\0\x07 !!"), 206.835);
        assert!(processor.flesch_reading_ease("The cat sat on the mat. The dog ran.") > 90.0);
        let dense = "Interdisciplinary organizational transformation necessitates comprehensive \
                     institutionalization of multidimensional accountability infrastructures";
        assert!(processor.flesch_reading_ease(dense) < 0.0);
    }

    #[test]
    fn test_frequencies_keep_first_seen_order() {
        let tokens: Vec<String> = ["b", "a", "b", "c", "a"].iter().map(|s| s.to_string()).collect();
        let freq = TextProcessor::frequencies(&tokens);

        assert_eq!(
            freq,
            vec![("b".to_string(), 2), ("a".to_string(), 2), ("c".to_string(), 1)]
        );
    }
}
