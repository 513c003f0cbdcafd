//! Text extraction from various file formats

use crate::error::{Result, ScorerError};
use pulldown_cmark::{Event, Parser, Tag};
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;
use regex::Regex;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::OnceLock;
use tokio::fs;
use zip::ZipArchive;

/// Cleaned PDF text must be longer than this to count as extracted
pub const MIN_PDF_CHARS: usize = 50;

const DOCX_BODY: &str = "word/document.xml";

pub trait TextExtractor {
    /// Extract plain text from an in-memory document
    fn extract_bytes(&self, bytes: &[u8]) -> Result<String>;

    /// Read a file and extract its text
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

async fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).await.map_err(ScorerError::Io)
}

fn horizontal_space_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t]+").expect("Invalid whitespace regex"))
}

fn artifact_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:\d+|[^\w\s]+)$").expect("Invalid artifact line regex"))
}

/// Normalise text pulled out of a binary document: one space between words,
/// no blank lines, and no page numbers or stray punctuation lines.
pub fn clean_extracted_text(text: &str) -> String {
    let text = horizontal_space_regex().replace_all(text, " ");

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().count() >= 2)
        .filter(|line| !artifact_line_regex().is_match(line))
        .collect();

    lines.join("\n")
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        let raw = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            ScorerError::PdfExtraction(format!("Failed to extract text from PDF: {}", e))
        })?;

        let text = clean_extracted_text(&raw);
        if text.chars().count() <= MIN_PDF_CHARS {
            return Err(ScorerError::PdfExtraction(
                "Could not extract text from PDF. The file might be scanned, image-only or protected"
                    .to_string(),
            ));
        }

        Ok(text)
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = read_file(path).await?;
        self.extract_bytes(&bytes).map_err(|e| match e {
            ScorerError::PdfExtraction(msg) => {
                ScorerError::PdfExtraction(format!("{} ('{}')", msg, path.display()))
            }
            other => other,
        })
    }
}

/// Word (OOXML) documents: body paragraphs first, then table rows with
/// their cells joined by " | ".
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        let xml = Self::read_body(bytes)?;
        let text = Self::body_text(&xml)?;
        Ok(clean_extracted_text(&text))
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = read_file(path).await?;
        self.extract_bytes(&bytes)
    }
}

impl DocxExtractor {
    fn read_body(bytes: &[u8]) -> Result<String> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(Self::archive_error)?;
        let mut body = archive.by_name(DOCX_BODY).map_err(Self::archive_error)?;

        let mut xml = String::new();
        body.read_to_string(&mut xml).map_err(Self::archive_error)?;
        Ok(xml)
    }

    fn archive_error(e: impl std::fmt::Display) -> ScorerError {
        ScorerError::Extraction(format!("Could not read Word document: {}", e))
    }

    fn xml_error(e: impl std::fmt::Display) -> ScorerError {
        ScorerError::Extraction(format!("Malformed Word document: {}", e))
    }

    fn body_text(xml: &str) -> Result<String> {
        let mut reader = Reader::from_str(xml);
        let mut paragraphs: Vec<String> = Vec::new();
        let mut rows: Vec<String> = Vec::new();

        let mut paragraph = String::new();
        let mut cells: Vec<String> = Vec::new();
        let mut table_depth = 0usize;
        let mut in_text = false;

        loop {
            let event = reader.read_event().map_err(Self::xml_error)?;
            match event {
                XmlEvent::Start(e) => match e.name().as_ref() {
                    b"w:tbl" => table_depth += 1,
                    b"w:tr" if table_depth == 1 => cells.clear(),
                    b"w:tc" if table_depth == 1 => cells.push(String::new()),
                    b"w:t" => in_text = true,
                    _ => {}
                },
                XmlEvent::Empty(e) => {
                    if matches!(e.name().as_ref(), b"w:tab" | b"w:br") {
                        Self::current(&mut paragraph, &mut cells, table_depth).push(' ');
                    }
                }
                XmlEvent::Text(t) if in_text => {
                    let text = t.unescape().map_err(Self::xml_error)?;
                    Self::current(&mut paragraph, &mut cells, table_depth).push_str(&text);
                }
                XmlEvent::End(e) => match e.name().as_ref() {
                    b"w:t" => in_text = false,
                    b"w:p" if table_depth == 0 => {
                        let line = paragraph.trim();
                        if !line.is_empty() {
                            paragraphs.push(line.to_string());
                        }
                        paragraph.clear();
                    }
                    // paragraphs inside one cell
                    b"w:p" => Self::current(&mut paragraph, &mut cells, table_depth).push(' '),
                    b"w:tr" if table_depth == 1 => {
                        let row: Vec<&str> = cells
                            .iter()
                            .map(|cell| cell.trim())
                            .filter(|cell| !cell.is_empty())
                            .collect();
                        if !row.is_empty() {
                            rows.push(row.join(" | "));
                        }
                        cells.clear();
                    }
                    b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                    _ => {}
                },
                XmlEvent::Eof => break,
                _ => {}
            }
        }

        paragraphs.extend(rows);
        Ok(paragraphs.join("\n"))
    }

    /// Buffer receiving text: the open table cell, or the body paragraph
    fn current<'a>(paragraph: &'a mut String, cells: &'a mut Vec<String>, table_depth: usize) -> &'a mut String {
        if table_depth > 0 {
            if cells.is_empty() {
                cells.push(String::new());
            }
            let last = cells.len() - 1;
            &mut cells[last]
        } else {
            paragraph
        }
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = read_file(path).await?;
        self.extract_bytes(&bytes)
    }
}

/// Markdown rendered to plain text. List items keep a "- " prefix so the
/// grammar analyzer still sees bullets.
pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        let markdown = String::from_utf8_lossy(bytes);
        Ok(Self::to_plain_text(&markdown))
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = read_file(path).await?;
        self.extract_bytes(&bytes)
    }
}

impl MarkdownExtractor {
    fn to_plain_text(markdown: &str) -> String {
        let mut text = String::new();

        for event in Parser::new(markdown) {
            match event {
                Event::Text(t) | Event::Code(t) => text.push_str(&t),
                Event::SoftBreak | Event::HardBreak => text.push('\n'),
                Event::Start(Tag::Item) => text.push_str("- "),
                Event::End(Tag::Paragraph)
                | Event::End(Tag::Heading(..))
                | Event::End(Tag::Item)
                | Event::End(Tag::CodeBlock(_)) => text.push('\n'),
                _ => {}
            }
        }

        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}
