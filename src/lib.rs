//! Resume scorer library

pub mod cli;
pub mod config;
pub mod cover_letter;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use error::{Result, ScorerError};
pub use config::Config;
pub use processing::{AnalysisEngine, AnalysisResult};
