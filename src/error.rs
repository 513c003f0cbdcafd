//! Error handling for the resume scorer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScorerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Text extraction error: {0}")]
    Extraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Raised by the vectorizer when both documents reduce to an empty
    /// vocabulary. The keyword analyzer recovers from it locally.
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Analyzer failed: {0}")]
    AnalyzerFailure(String),

    #[error("Cover letter generation error: {0}")]
    Generation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ScorerError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ScorerError {
    fn from(err: anyhow::Error) -> Self {
        ScorerError::AnalyzerFailure(err.to_string())
    }
}

impl From<reqwest::Error> for ScorerError {
    fn from(err: reqwest::Error) -> Self {
        ScorerError::Network(err.to_string())
    }
}

impl ScorerError {
    /// True for failures the host should report as "unsupported format"
    /// rather than as an extraction fault.
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, ScorerError::UnsupportedFormat(_))
    }
}
