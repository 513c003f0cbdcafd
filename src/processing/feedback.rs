//! Per-category feedback records shared by the analyzers

use serde::{Deserialize, Serialize};

/// Observations gathered by one analyzer, in the order its checks ran
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFeedback {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
}

impl CategoryFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strength(&mut self, text: impl Into<String>) {
        self.strengths.push(text.into());
    }

    /// Record a weakness together with the recommendation that addresses it
    pub fn weakness(&mut self, weakness: impl Into<String>, recommendation: impl Into<String>) {
        self.weaknesses.push(weakness.into());
        self.recommendations.push(recommendation.into());
    }

    pub fn recommend(&mut self, text: impl Into<String>) {
        self.recommendations.push(text.into());
    }
}

/// Score plus feedback produced by the ATS and grammar analyzers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub score: u8,
    pub feedback: CategoryFeedback,
}

impl ScoreCard {
    /// Clamp a running score into `[0, 100]`
    pub fn clamped(score: i32, feedback: CategoryFeedback) -> Self {
        Self {
            score: score.clamp(0, 100) as u8,
            feedback,
        }
    }
}

/// Where a category score falls relative to the suggestion thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    /// Below 70
    Priority,
    /// 70 to 84
    Consider,
    /// 85 and above
    Good,
}

impl ScoreBand {
    pub fn of(score: u8) -> Self {
        match score {
            0..=69 => ScoreBand::Priority,
            70..=84 => ScoreBand::Consider,
            _ => ScoreBand::Good,
        }
    }
}
