//! Input manager for handling different file types

use crate::error::{Result, ScorerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    DocxExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::info;
use std::collections::HashMap;
use std::path::Path;

/// Extracted text shorter than this (after trimming) is rejected
pub const MIN_MEANINGFUL_CHARS: usize = 10;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(ScorerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = self.detect_file_type(path)?;

        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Docx => {
                info!("Extracting text from Word document: {}", path.display());
                DocxExtractor.extract(path).await?
            }
            FileType::Unknown => return Err(Self::unsupported(&path.display().to_string())),
        };

        let text = Self::ensure_meaningful(text)?;

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Extract an uploaded document. The declared content type wins; magic
    /// bytes are used when it is absent or unrecognised.
    pub fn extract_bytes(&self, bytes: &[u8], content_type: Option<&str>) -> Result<String> {
        let file_type = FileType::detect(content_type, bytes);
        info!("Extracting {} bytes as {:?}", bytes.len(), file_type);

        let text = match file_type {
            FileType::Pdf => PdfExtractor.extract_bytes(bytes)?,
            FileType::Text => PlainTextExtractor.extract_bytes(bytes)?,
            FileType::Markdown => MarkdownExtractor.extract_bytes(bytes)?,
            FileType::Docx => DocxExtractor.extract_bytes(bytes)?,
            FileType::Unknown => return Err(Self::unsupported(content_type.unwrap_or("upload"))),
        };

        Self::ensure_meaningful(text)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ScorerError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        Ok(FileType::from_extension(extension))
    }

    fn unsupported(source: &str) -> ScorerError {
        ScorerError::UnsupportedFormat(format!(
            "Unsupported file type for: {}. Supported: PDF, DOCX, TXT, MD",
            source
        ))
    }

    fn ensure_meaningful(text: String) -> Result<String> {
        if text.trim().chars().count() < MIN_MEANINGFUL_CHARS {
            return Err(ScorerError::Extraction(
                "Could not extract meaningful text from the document".to_string(),
            ));
        }
        Ok(text)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
