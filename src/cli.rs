//! CLI interface for the resume scorer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

pub const DOCUMENT_EXTENSIONS: [&str; 6] = ["pdf", "docx", "txt", "text", "md", "markdown"];

#[derive(Parser)]
#[command(name = "resume-scorer")]
#[command(about = "Score a resume against a job description")]
#[command(long_about = "Score resumes for ATS compatibility, writing quality and keyword alignment with a job description, and draft matching cover letters")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume against a job description
    Score {
        /// Path to resume file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Output format: console, json, markdown, pdf
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include a generated cover letter in the report
        #[arg(long)]
        cover_letter: bool,

        /// Company name for the cover letter
        #[arg(long)]
        company: Option<String>,

        /// Position title for the cover letter
        #[arg(long)]
        position: Option<String>,

        /// Use the built-in template instead of the OpenAI API
        #[arg(long)]
        offline: bool,
    },

    /// Print the text extracted from a document
    Extract {
        /// Path to the document
        file: PathBuf,
    },

    /// Generate a cover letter
    CoverLetter {
        /// Path to resume file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Company name
        #[arg(long)]
        company: Option<String>,

        /// Position title
        #[arg(long)]
        position: Option<String>,

        /// Use the built-in template instead of the OpenAI API
        #[arg(long)]
        offline: bool,

        /// Save the letter to a file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "pdf" => Ok(OutputFormat::Pdf),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, pdf",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
