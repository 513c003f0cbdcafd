//! Overall score and prioritised suggestions

use crate::processing::feedback::{CategoryFeedback, ScoreBand};
use serde::{Deserialize, Serialize};

pub const MAX_SUGGESTIONS: usize = 8;

pub const CONGRATULATIONS: &str = "🎉 Great work! Your resume scores well across all categories.";
pub const TAILORING_TIP: &str = "💡 Consider tailoring keywords for each specific job application.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    pub overall_score: u8,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ScoreAggregator;

impl ScoreAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn aggregate(
        &self,
        ats_score: u8,
        grammar_score: u8,
        keyword_score: u8,
        ats_feedback: &CategoryFeedback,
        grammar_feedback: &CategoryFeedback,
        keyword_feedback: &CategoryFeedback,
    ) -> Aggregate {
        Aggregate {
            overall_score: Self::overall_score(ats_score, grammar_score, keyword_score),
            suggestions: Self::suggestions(&[
                (ats_score, "ATS formatting", &ats_feedback.recommendations),
                (grammar_score, "grammar and readability", &grammar_feedback.recommendations),
                (keyword_score, "keyword optimization", &keyword_feedback.recommendations),
            ]),
        }
    }

    /// Integer mean of the three sub-scores
    pub fn overall_score(ats_score: u8, grammar_score: u8, keyword_score: u8) -> u8 {
        ((ats_score as u16 + grammar_score as u16 + keyword_score as u16) / 3) as u8
    }

    fn suggestions(categories: &[(u8, &str, &Vec<String>); 3]) -> Vec<String> {
        let mut ranked: Vec<&(u8, &str, &Vec<String>)> = categories.iter().collect();
        // Stable sort with no secondary key: ties stay ATS, grammar, keywords.
        ranked.sort_by_key(|(score, _, _)| *score);

        let mut suggestions = Vec::new();
        for (score, label, recommendations) in ranked {
            match ScoreBand::of(*score) {
                ScoreBand::Priority => {
                    suggestions.push(format!("🚨 Priority: Improve {} (Score: {}/100)", label, score));
                    suggestions.extend(recommendations.iter().take(2).cloned());
                }
                ScoreBand::Consider => {
                    suggestions.push(format!("⚠️ Consider improving {} (Score: {}/100)", label, score));
                    suggestions.extend(recommendations.iter().take(1).cloned());
                }
                ScoreBand::Good => {}
            }
        }

        if categories
            .iter()
            .all(|(score, _, _)| ScoreBand::of(*score) == ScoreBand::Good)
        {
            suggestions.push(CONGRATULATIONS.to_string());
            suggestions.push(TAILORING_TIP.to_string());
        }

        suggestions.truncate(MAX_SUGGESTIONS);
        suggestions
    }
}
