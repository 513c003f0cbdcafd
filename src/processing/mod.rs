//! Scoring engine: text resources, the three analyzers and aggregation

pub mod text_processor;
pub mod feedback;
pub mod keyword_extractor;
pub mod tfidf;
pub mod ats_analyzer;
pub mod grammar_analyzer;
pub mod keyword_analyzer;
pub mod aggregator;
pub mod analyzer;

pub use analyzer::{AnalysisEngine, AnalysisFeedback, AnalysisResult};
pub use feedback::CategoryFeedback;
