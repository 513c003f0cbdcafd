//! Readability, voice and style heuristics
//!
//! This is a scorer, not a corrector: it never rewrites text.

use crate::processing::feedback::{CategoryFeedback, ScoreCard};
use crate::processing::text_processor::TextProcessor;
use std::sync::Arc;

const BASE_SCORE: i32 = 85;
const PASSIVE_RATIO_LIMIT: f64 = 0.05;

#[derive(Clone)]
pub struct GrammarAnalyzer {
    processor: Arc<TextProcessor>,
}

impl GrammarAnalyzer {
    pub fn new(processor: Arc<TextProcessor>) -> Self {
        Self { processor }
    }

    pub fn score(&self, resume_text: &str) -> ScoreCard {
        let mut score = BASE_SCORE;
        let mut feedback = CategoryFeedback::new();

        let readability = self.processor.flesch_reading_ease(resume_text);
        if readability >= 60.0 {
            feedback.strength("Good readability score");
            score += 10;
        } else if readability >= 30.0 {
            feedback.strength("Acceptable readability");
            score += 5;
        } else {
            feedback.weakness(
                "Text may be difficult to read",
                "Simplify sentence structure for better readability",
            );
            score -= 15;
        }

        let total_words = self.processor.word_count(resume_text);
        let passive_ratio = if total_words > 0 {
            self.processor.passive_indicator_count(resume_text) as f64 / total_words as f64
        } else {
            0.0
        };

        if passive_ratio > PASSIVE_RATIO_LIMIT {
            score -= 10;
            feedback.weakness(
                "High use of passive voice",
                "Use more active voice to sound confident and direct",
            );
        } else {
            feedback.strength("Good use of active voice");
        }

        if Self::uses_bullets(resume_text) {
            feedback.strength("Uses bullet points for organization");
            score += 5;
        } else {
            feedback.recommend("Use bullet points to organize information");
        }

        let action_verbs = self.processor.action_verb_count(resume_text);
        if action_verbs >= 5 {
            feedback.strength("Good use of action verbs");
            score += 5;
        } else if action_verbs >= 2 {
            feedback.strength("Uses some action verbs");
        } else {
            feedback.weakness(
                "Limited use of strong action verbs",
                "Start bullet points with strong action verbs",
            );
            score -= 10;
        }

        log::debug!(
            "Grammar checks: readability {:.1}, passive ratio {:.3}, {} action verbs",
            readability,
            passive_ratio,
            action_verbs
        );

        ScoreCard::clamped(score, feedback)
    }

    fn uses_bullets(text: &str) -> bool {
        text.contains('•') || text.contains('*') || text.matches("\n-").count() > 3
    }
}
