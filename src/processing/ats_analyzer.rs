//! ATS (Applicant Tracking System) friendliness scoring

use crate::processing::feedback::{CategoryFeedback, ScoreCard};
use crate::processing::text_processor::TextProcessor;
use std::sync::Arc;

const SPECIAL_CHAR_LIMIT: usize = 20;
const MIN_SECTIONS: usize = 2;
const MIN_WORDS: usize = 200;
const MAX_WORDS: usize = 800;

/// Scores contact details, structure and length of a resume
#[derive(Clone)]
pub struct ATSAnalyzer {
    processor: Arc<TextProcessor>,
}

impl ATSAnalyzer {
    pub fn new(processor: Arc<TextProcessor>) -> Self {
        Self { processor }
    }

    /// Start from 100 and deduct for each failed check
    pub fn score(&self, resume_text: &str) -> ScoreCard {
        let mut score: i32 = 100;
        let mut feedback = CategoryFeedback::new();

        if self.processor.special_char_count(resume_text) > SPECIAL_CHAR_LIMIT {
            score -= 15;
            feedback.weakness(
                "Contains many special characters that may confuse ATS",
                "Remove unnecessary special characters and symbols",
            );
        } else {
            feedback.strength("Clean formatting with minimal special characters");
        }

        if self.processor.has_email(resume_text) {
            feedback.strength("Email address found");
        } else {
            score -= 20;
            feedback.weakness("No email address found", "Include a professional email address");
        }

        if self.processor.has_phone(resume_text) {
            feedback.strength("Phone number found");
        } else {
            score -= 10;
            feedback.weakness("No phone number found", "Include a phone number");
        }

        let sections = self.processor.section_count(resume_text);
        if sections < MIN_SECTIONS {
            score -= 15;
            feedback.weakness(
                "Missing common resume sections",
                "Include standard sections like Experience, Education, and Skills",
            );
        } else {
            feedback.strength(format!("Contains {} standard resume sections", sections));
        }

        let word_count = self.processor.word_count(resume_text);
        if word_count < MIN_WORDS {
            score -= 20;
            feedback.weakness(
                "Resume appears too short",
                "Expand with more relevant details and accomplishments",
            );
        } else if word_count > MAX_WORDS {
            score -= 10;
            feedback.weakness("Resume may be too long", "Consider condensing to 1-2 pages");
        } else {
            feedback.strength("Appropriate length");
        }

        log::debug!(
            "ATS checks: {} sections, {} words, score {}",
            sections,
            word_count,
            score
        );

        ScoreCard::clamped(score, feedback)
    }
}
