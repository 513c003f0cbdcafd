//! Lexical and keyword overlap between a resume and a job description

use crate::error::ScorerError;
use crate::processing::feedback::CategoryFeedback;
use crate::processing::keyword_extractor::KeywordExtractor;
use crate::processing::text_processor::TextProcessor;
use crate::processing::tfidf::TfidfVectorizer;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Base score used when the vectorizer has nothing to work with
pub const FALLBACK_BASE_SCORE: u8 = 30;

const TOP_JOB_KEYWORDS: usize = 20;
const MAX_MISSING_KEYWORDS: usize = 10;
const MAX_SUGGESTED_KEYWORDS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordScore {
    pub score: u8,
    pub feedback: CategoryFeedback,
    pub missing_keywords: Vec<String>,
}

#[derive(Clone)]
pub struct KeywordAnalyzer {
    extractor: KeywordExtractor,
    vectorizer: TfidfVectorizer,
}

impl KeywordAnalyzer {
    pub fn new(processor: Arc<TextProcessor>) -> Self {
        Self {
            extractor: KeywordExtractor::new(Arc::clone(&processor)),
            vectorizer: TfidfVectorizer::new(processor),
        }
    }

    pub fn score(&self, resume_text: &str, job_description: &str) -> KeywordScore {
        let job_keywords = self.extractor.extract(job_description);
        let resume_keywords = self.extractor.extract(resume_text);
        log::debug!(
            "Extracted {} job keywords and {} resume keywords",
            job_keywords.len(),
            resume_keywords.len()
        );

        let base_score = self.base_score(resume_text, job_description);

        let resume_lower = resume_text.to_lowercase();
        let (matched, missing): (Vec<&String>, Vec<&String>) = job_keywords
            .iter()
            .take(TOP_JOB_KEYWORDS)
            .partition(|keyword| resume_lower.contains(keyword.to_lowercase().as_str()));

        let score = if job_keywords.is_empty() {
            base_score as i32
        } else {
            let considered = job_keywords.len().min(TOP_JOB_KEYWORDS) as f64;
            let match_percentage = matched.len() as f64 / considered * 100.0;
            ((base_score as f64 + match_percentage) / 2.0) as i32
        };

        let mut feedback = CategoryFeedback::new();
        if matched.len() > 10 {
            feedback.strength(format!(
                "Strong keyword match with {} relevant terms",
                matched.len()
            ));
        } else if matched.len() > 5 {
            feedback.strength(format!(
                "Good keyword match with {} relevant terms",
                matched.len()
            ));
        } else {
            feedback.weaknesses.push("Limited keyword matching with job description".to_string());
        }

        if !missing.is_empty() {
            feedback.recommend("Include more keywords from the job description");
            let sample: Vec<&str> = missing
                .iter()
                .take(MAX_SUGGESTED_KEYWORDS)
                .map(|k| k.as_str())
                .collect();
            feedback.recommend(format!("Consider adding: {}", sample.join(", ")));
        }

        KeywordScore {
            score: score.clamp(0, 100) as u8,
            feedback,
            missing_keywords: missing
                .into_iter()
                .take(MAX_MISSING_KEYWORDS)
                .cloned()
                .collect(),
        }
    }

    /// Cosine similarity scaled to 0-100, or the fallback score when the
    /// vocabulary is empty
    pub fn base_score(&self, resume_text: &str, job_description: &str) -> u8 {
        let resume_lower = resume_text.to_lowercase();
        let job_lower = job_description.to_lowercase();

        match self.vectorizer.similarity(&resume_lower, &job_lower) {
            Ok(similarity) => (similarity * 100.0).floor().clamp(0.0, 100.0) as u8,
            Err(ScorerError::DegenerateInput(reason)) => {
                log::warn!(
                    "Similarity unavailable ({}), using fallback base score {}",
                    reason,
                    FALLBACK_BASE_SCORE
                );
                FALLBACK_BASE_SCORE
            }
            Err(e) => {
                log::warn!("Similarity failed: {}", e);
                FALLBACK_BASE_SCORE
            }
        }
    }
}
