//! Report structures shared by all output formatters

use crate::processing::analyzer::AnalysisResult;
use crate::processing::feedback::{CategoryFeedback, ScoreBand};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An analysis result plus the context needed to present it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub result: AnalysisResult,
    pub cover_letter: Option<String>,
    pub resume_label: String,
    pub job_label: String,
    pub generated_at: DateTime<Utc>,
    pub scorer_version: String,
}

/// One line of the score breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRow {
    pub label: &'static str,
    pub score: u8,
    pub band: ScoreBand,
}

impl AnalysisReport {
    pub fn new(result: AnalysisResult, resume_label: impl Into<String>, job_label: impl Into<String>) -> Self {
        Self {
            result,
            cover_letter: None,
            resume_label: resume_label.into(),
            job_label: job_label.into(),
            generated_at: Utc::now(),
            scorer_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn with_cover_letter(mut self, cover_letter: Option<String>) -> Self {
        self.cover_letter = cover_letter;
        self
    }

    pub fn score_rows(&self) -> [ScoreRow; 3] {
        let row = |label, score| ScoreRow { label, score, band: ScoreBand::of(score) };
        [
            row("ATS Compatibility", self.result.ats_score),
            row("Grammar & Style", self.result.grammar_score),
            row("Keyword Match", self.result.keyword_match_score),
        ]
    }

    /// Feedback sections in display order with human readable titles
    pub fn feedback_sections(&self) -> [(&'static str, &CategoryFeedback); 3] {
        [
            ("ATS Compatibility", &self.result.feedback.ats),
            ("Grammar & Style", &self.result.feedback.grammar),
            ("Keyword Match", &self.result.feedback.keywords),
        ]
    }

    pub fn verdict(&self) -> &'static str {
        match self.result.overall_score {
            85..=100 => "Strong match - ready to submit with minor polish",
            70..=84 => "Solid foundation - a few targeted improvements recommended",
            50..=69 => "Needs work - address the priority items before applying",
            _ => "Significant gaps - substantial revision recommended",
        }
    }

    pub fn formatted_timestamp(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::processing::analyzer::AnalysisFeedback;

    pub fn sample_report() -> AnalysisReport {
        let mut feedback = AnalysisFeedback::default();
        feedback.ats.strength("✓ Email address found");
        feedback
            .ats
            .weakness("✗ No phone number found", "Add your phone number to the header section");
        feedback.grammar.strength("✓ Good use of action verbs");
        feedback.keywords.weakness(
            "✗ Missing important keywords: kubernetes, terraform",
            "Consider adding: kubernetes, terraform",
        );

        let result = AnalysisResult {
            ats_score: 90,
            grammar_score: 75,
            keyword_match_score: 42,
            overall_score: 69,
            feedback,
            missing_keywords: vec!["kubernetes".to_string(), "terraform".to_string()],
            suggestions: vec![
                "🚨 Priority: Improve Keyword Match (Score: 42/100)".to_string(),
                "Consider adding: kubernetes, terraform".to_string(),
            ],
        };

        AnalysisReport::new(result, "jane_doe.pdf", "platform_engineer.txt")
    }
}
