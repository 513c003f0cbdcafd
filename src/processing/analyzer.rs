//! Main analysis engine combining the ATS, grammar and keyword analyzers

use crate::error::{Result, ScorerError};
use crate::processing::aggregator::ScoreAggregator;
use crate::processing::ats_analyzer::ATSAnalyzer;
use crate::processing::feedback::{CategoryFeedback, ScoreCard};
use crate::processing::grammar_analyzer::GrammarAnalyzer;
use crate::processing::keyword_analyzer::{KeywordAnalyzer, KeywordScore};
use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

pub const ATS_CATEGORY: &str = "ats";
pub const GRAMMAR_CATEGORY: &str = "grammar";
pub const KEYWORDS_CATEGORY: &str = "keywords";

/// Result of one `analyze` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ats_score: u8,
    pub grammar_score: u8,
    pub keyword_match_score: u8,
    pub overall_score: u8,
    pub feedback: AnalysisFeedback,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Feedback keyed by category; serializes as `{"ats": .., "grammar": .., "keywords": ..}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisFeedback {
    pub ats: CategoryFeedback,
    pub grammar: CategoryFeedback,
    pub keywords: CategoryFeedback,
}

impl AnalysisFeedback {
    pub fn get(&self, category: &str) -> Option<&CategoryFeedback> {
        match category {
            ATS_CATEGORY => Some(&self.ats),
            GRAMMAR_CATEGORY => Some(&self.grammar),
            KEYWORDS_CATEGORY => Some(&self.keywords),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &CategoryFeedback)> {
        [
            (ATS_CATEGORY, &self.ats),
            (GRAMMAR_CATEGORY, &self.grammar),
            (KEYWORDS_CATEGORY, &self.keywords),
        ]
        .into_iter()
    }
}

/// Main analysis engine that coordinates all analysis components
#[derive(Clone)]
pub struct AnalysisEngine {
    ats_analyzer: ATSAnalyzer,
    grammar_analyzer: GrammarAnalyzer,
    keyword_analyzer: KeywordAnalyzer,
    aggregator: ScoreAggregator,
    parallel: bool,
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new(Arc::new(TextProcessor::new()))
    }
}

impl AnalysisEngine {
    /// Create an engine whose analyzers share the given lexical resources
    pub fn new(processor: Arc<TextProcessor>) -> Self {
        Self {
            ats_analyzer: ATSAnalyzer::new(Arc::clone(&processor)),
            grammar_analyzer: GrammarAnalyzer::new(Arc::clone(&processor)),
            keyword_analyzer: KeywordAnalyzer::new(processor),
            aggregator: ScoreAggregator::new(),
            parallel: true,
        }
    }

    /// Run the analyzers on the calling thread instead of scoped threads
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Score a resume against a job description
    pub fn analyze(&self, resume_text: &str, job_description: &str) -> Result<AnalysisResult> {
        let start_time = Instant::now();
        log::info!(
            "Analyzing resume ({} chars) against job description ({} chars)",
            resume_text.len(),
            job_description.len()
        );

        let (ats, grammar, keywords) = if self.parallel {
            self.run_parallel(resume_text, job_description)?
        } else {
            self.run_sequential(resume_text, job_description)?
        };

        log::debug!(
            "Sub-scores: ats {}, grammar {}, keywords {}",
            ats.score,
            grammar.score,
            keywords.score
        );

        let aggregate = self.aggregator.aggregate(
            ats.score,
            grammar.score,
            keywords.score,
            &ats.feedback,
            &grammar.feedback,
            &keywords.feedback,
        );

        log::info!(
            "Analysis completed in {}ms with overall score {}",
            start_time.elapsed().as_millis(),
            aggregate.overall_score
        );

        Ok(AnalysisResult {
            ats_score: ats.score,
            grammar_score: grammar.score,
            keyword_match_score: keywords.score,
            overall_score: aggregate.overall_score,
            feedback: AnalysisFeedback {
                ats: ats.feedback,
                grammar: grammar.feedback,
                keywords: keywords.feedback,
            },
            missing_keywords: keywords.missing_keywords,
            suggestions: aggregate.suggestions,
        })
    }

    /// `analyze` on the blocking pool, for async hosts
    pub async fn analyze_async(
        &self,
        resume_text: String,
        job_description: String,
    ) -> Result<AnalysisResult> {
        let engine = self.clone();
        tokio::task::spawn_blocking(move || engine.analyze(&resume_text, &job_description))
            .await
            .map_err(|e| ScorerError::AnalyzerFailure(format!("analysis task failed: {}", e)))?
    }

    fn run_parallel(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<(ScoreCard, ScoreCard, KeywordScore)> {
        thread::scope(|scope| {
            let ats = scope.spawn(|| self.ats_analyzer.score(resume_text));
            let grammar = scope.spawn(|| self.grammar_analyzer.score(resume_text));
            let keywords = scope.spawn(|| self.keyword_analyzer.score(resume_text, job_description));

            let ats = ats.join().map_err(|p| Self::failure(ATS_CATEGORY, p));
            let grammar = grammar.join().map_err(|p| Self::failure(GRAMMAR_CATEGORY, p));
            let keywords = keywords.join().map_err(|p| Self::failure(KEYWORDS_CATEGORY, p));

            Ok((ats?, grammar?, keywords?))
        })
    }

    fn run_sequential(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<(ScoreCard, ScoreCard, KeywordScore)> {
        let ats = panic::catch_unwind(AssertUnwindSafe(|| self.ats_analyzer.score(resume_text)))
            .map_err(|p| Self::failure(ATS_CATEGORY, p))?;
        let grammar = panic::catch_unwind(AssertUnwindSafe(|| self.grammar_analyzer.score(resume_text)))
            .map_err(|p| Self::failure(GRAMMAR_CATEGORY, p))?;
        let keywords = panic::catch_unwind(AssertUnwindSafe(|| {
            self.keyword_analyzer.score(resume_text, job_description)
        }))
        .map_err(|p| Self::failure(KEYWORDS_CATEGORY, p))?;

        Ok((ats, grammar, keywords))
    }

    fn failure(category: &str, payload: Box<dyn Any + Send>) -> ScorerError {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());

        log::error!("{} analyzer failed: {}", category, reason);
        ScorerError::AnalyzerFailure(format!("{} analyzer: {}", category, reason))
    }
}
