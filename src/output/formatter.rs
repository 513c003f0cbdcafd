//! Output formatters: console, JSON, markdown and PDF

use crate::config::OutputFormat;
use crate::error::{Result, ScorerError};
use crate::output::report::{AnalysisReport, ScoreRow};
use crate::processing::analyzer::AnalysisResult;
use crate::processing::feedback::{CategoryFeedback, ScoreBand};
use colored::{Color, Colorize};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use serde::Serialize;
use std::path::Path;

/// Trait for rendering an analysis report
pub trait OutputFormatter {
    fn format(&self, report: &AnalysisReport) -> Result<Vec<u8>>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colored score badges
pub struct ConsoleFormatter {
    use_colors: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter;

/// A4 PDF report using the built-in Helvetica faces
pub struct PdfFormatter;

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    pdf_formatter: PdfFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, band: ScoreBand) -> String {
        let (badge, color) = match band {
            ScoreBand::Good => ("GOOD", Color::Green),
            ScoreBand::Consider => ("FAIR", Color::Yellow),
            ScoreBand::Priority => ("PRIORITY", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_score_bar(&self, score: u8, band: ScoreBand) -> String {
        let filled = usize::from(score.min(100)) / 5;
        let bar = format!("{}{}", "■".repeat(filled), "·".repeat(20 - filled));
        let color = match band {
            ScoreBand::Good => Color::Green,
            ScoreBand::Consider => Color::Yellow,
            ScoreBand::Priority => Color::Red,
        };
        self.colorize(&bar, color)
    }

    fn format_feedback(&self, title: &str, feedback: &CategoryFeedback) -> String {
        let mut output = self.format_header(title, 3);
        for strength in &feedback.strengths {
            output.push_str(&format!("  {}\n", self.colorize(strength, Color::Green)));
        }
        for weakness in &feedback.weaknesses {
            output.push_str(&format!("  {}\n", self.colorize(weakness, Color::Red)));
        }
        for recommendation in &feedback.recommendations {
            output.push_str(&format!("  → {}\n", recommendation));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, report: &AnalysisReport) -> Result<Vec<u8>> {
        let mut output = String::new();
        let result = &report.result;

        output.push_str(&self.format_header("📊 RESUME ANALYSIS", 1));
        output.push_str(&format!(
            "Resume: {} | Job: {}\nGenerated: {}\n",
            report.resume_label,
            report.job_label,
            report.formatted_timestamp()
        ));

        output.push_str(&self.format_header("Overall Score", 2));
        output.push_str(&format!(
            "  {}/100 {}\n  {}\n",
            result.overall_score,
            self.format_score_badge(ScoreBand::of(result.overall_score)),
            report.verdict()
        ));

        output.push_str(&self.format_header("Score Breakdown", 2));
        for ScoreRow { label, score, band } in report.score_rows() {
            output.push_str(&format!(
                "  {:<18} {:>3}/100 {} {}\n",
                label,
                score,
                self.format_score_bar(score, band),
                self.format_score_badge(band)
            ));
        }

        output.push_str(&self.format_header("Feedback", 2));
        for (title, feedback) in report.feedback_sections() {
            output.push_str(&self.format_feedback(title, feedback));
        }

        if !result.missing_keywords.is_empty() {
            output.push_str(&self.format_header("Missing Keywords", 2));
            output.push_str(&format!(
                "  {}\n",
                self.colorize(&result.missing_keywords.join(", "), Color::Magenta)
            ));
        }

        output.push_str(&self.format_header("Suggestions", 2));
        for (i, suggestion) in result.suggestions.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
        }

        if let Some(letter) = &report.cover_letter {
            output.push_str(&self.format_header("✉️ Cover Letter", 2));
            output.push_str(letter);
            output.push('\n');
        }

        Ok(output.into_bytes())
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    result: &'a AnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    cover_letter: Option<&'a str>,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &AnalysisReport) -> Result<Vec<u8>> {
        let json = JsonReport {
            result: &report.result,
            cover_letter: report.cover_letter.as_deref(),
        };

        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&json)?
        } else {
            serde_json::to_vec(&json)?
        };
        Ok(bytes)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    fn markdown_score_badge(band: ScoreBand) -> &'static str {
        match band {
            ScoreBand::Good => "🟢 Good",
            ScoreBand::Consider => "🟡 Fair",
            ScoreBand::Priority => "🔴 Priority",
        }
    }

    fn format_feedback(title: &str, feedback: &CategoryFeedback) -> String {
        let mut output = format!("### {}\n\n", title);
        for line in feedback.strengths.iter().chain(&feedback.weaknesses) {
            output.push_str(&format!("- {}\n", line));
        }
        if !feedback.recommendations.is_empty() {
            output.push_str("\n**Recommendations:**\n\n");
            for recommendation in &feedback.recommendations {
                output.push_str(&format!("- {}\n", recommendation));
            }
        }
        output.push('\n');
        output
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format(&self, report: &AnalysisReport) -> Result<Vec<u8>> {
        let result = &report.result;
        let mut output = String::from("# 📊 Resume Analysis Report\n\n");

        output.push_str(&format!(
            "**Resume:** {} | **Job:** {} | **Generated:** {}\n\n",
            report.resume_label,
            report.job_label,
            report.formatted_timestamp()
        ));

        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "**Overall Score:** {}/100 ({})\n\n> {}\n\n",
            result.overall_score,
            Self::markdown_score_badge(ScoreBand::of(result.overall_score)),
            report.verdict()
        ));

        output.push_str("| Category | Score | Status |\n|---|---|---|\n");
        for row in report.score_rows() {
            output.push_str(&format!(
                "| {} | {}/100 | {} |\n",
                row.label,
                row.score,
                Self::markdown_score_badge(row.band)
            ));
        }
        output.push('\n');

        output.push_str("## Feedback\n\n");
        for (title, feedback) in report.feedback_sections() {
            output.push_str(&Self::format_feedback(title, feedback));
        }

        if !result.missing_keywords.is_empty() {
            output.push_str("## Missing Keywords\n\n");
            output.push_str(&format!("`{}`\n\n", result.missing_keywords.join("`, `")));
        }

        output.push_str("## Suggestions\n\n");
        for (i, suggestion) in result.suggestions.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, suggestion));
        }

        if let Some(letter) = &report.cover_letter {
            output.push_str("\n## Cover Letter\n\n");
            output.push_str(letter);
            output.push('\n');
        }

        output.push_str(&format!(
            "\n---\n*Generated by Resume Scorer v{}*\n",
            report.scorer_version
        ));

        Ok(output.into_bytes())
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const WRAP_COLUMNS: usize = 85;

#[derive(Clone, Copy)]
enum PdfStyle {
    Title,
    Heading,
    Body,
}

impl PdfStyle {
    fn font_size(self) -> f32 {
        match self {
            PdfStyle::Title => 18.0,
            PdfStyle::Heading => 13.0,
            PdfStyle::Body => 10.5,
        }
    }

    fn line_height(self) -> f32 {
        match self {
            PdfStyle::Title => 10.0,
            PdfStyle::Heading => 8.0,
            PdfStyle::Body => 5.2,
        }
    }
}

/// Tracks the write position and starts new pages as needed
struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT - MARGIN,
        })
    }

    fn line(&mut self, text: &str, style: PdfStyle) {
        let height = style.line_height();
        if self.y - height < MARGIN {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
        self.y -= height;

        let font = match style {
            PdfStyle::Body => &self.regular,
            PdfStyle::Title | PdfStyle::Heading => &self.bold,
        };
        self.layer.use_text(text, style.font_size(), Mm(MARGIN), Mm(self.y), font);
    }

    fn paragraph(&mut self, text: &str, style: PdfStyle) {
        for source_line in text.lines() {
            let cleaned = latin1(source_line);
            if cleaned.trim().is_empty() {
                self.gap();
                continue;
            }
            for wrapped in wrap(&cleaned, WRAP_COLUMNS) {
                self.line(&wrapped, style);
            }
        }
    }

    fn gap(&mut self) {
        self.y -= PdfStyle::Body.line_height() / 2.0;
    }

    fn finish(self) -> Result<Vec<u8>> {
        self.doc.save_to_bytes().map_err(pdf_error)
    }
}

fn pdf_error(err: impl std::fmt::Display) -> ScorerError {
    ScorerError::OutputFormatting(format!("PDF generation failed: {}", err))
}

/// Built-in PDF fonts only cover Latin-1; anything else (emoji, check marks) is dropped
fn latin1(text: &str) -> String {
    let kept: String = text.chars().filter(|c| (*c as u32) <= 0xFF).collect();
    kept.trim().to_string()
}

/// Greedy word wrap; words longer than the width are split
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        while word.chars().count() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let split_at = word.char_indices().nth(width).map(|(i, _)| i).unwrap_or(word.len());
            let rest = word.split_off(split_at);
            lines.push(word);
            word = rest;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

impl OutputFormatter for PdfFormatter {
    fn format(&self, report: &AnalysisReport) -> Result<Vec<u8>> {
        let result = &report.result;
        let mut pdf = PdfWriter::new("Resume Analysis Report")?;

        pdf.line("Resume Analysis Report", PdfStyle::Title);
        pdf.paragraph(
            &format!(
                "Resume: {}   Job: {}   Generated: {}",
                report.resume_label,
                report.job_label,
                report.formatted_timestamp()
            ),
            PdfStyle::Body,
        );
        pdf.gap();

        pdf.line("Summary", PdfStyle::Heading);
        pdf.paragraph(
            &format!("Overall Score: {}/100. {}", result.overall_score, report.verdict()),
            PdfStyle::Body,
        );
        for row in report.score_rows() {
            pdf.paragraph(&format!("{}: {}/100", row.label, row.score), PdfStyle::Body);
        }
        pdf.gap();

        pdf.line("Feedback", PdfStyle::Heading);
        for (title, feedback) in report.feedback_sections() {
            pdf.paragraph(title, PdfStyle::Body);
            for line in feedback
                .strengths
                .iter()
                .chain(&feedback.weaknesses)
                .chain(&feedback.recommendations)
            {
                pdf.paragraph(&format!("- {}", latin1(line)), PdfStyle::Body);
            }
            pdf.gap();
        }

        if !result.missing_keywords.is_empty() {
            pdf.line("Missing Keywords", PdfStyle::Heading);
            pdf.paragraph(&result.missing_keywords.join(", "), PdfStyle::Body);
            pdf.gap();
        }

        pdf.line("Suggestions", PdfStyle::Heading);
        for (i, suggestion) in result.suggestions.iter().enumerate() {
            pdf.paragraph(&format!("{}. {}", i + 1, latin1(suggestion)), PdfStyle::Body);
        }

        if let Some(letter) = &report.cover_letter {
            pdf.gap();
            pdf.line("Cover Letter", PdfStyle::Heading);
            pdf.paragraph(letter, PdfStyle::Body);
        }

        pdf.finish()
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true)
    }

    pub fn with_options(use_colors: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter,
            pdf_formatter: PdfFormatter,
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<Vec<u8>> {
        match format {
            OutputFormat::Console => self.console_formatter.format(report),
            OutputFormat::Json => self.json_formatter.format(report),
            OutputFormat::Markdown => self.markdown_formatter.format(report),
            OutputFormat::Pdf => self.pdf_formatter.format(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &[u8], file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Pdf => "pdf",
    };

    format!("{}_analysis{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::fixtures::sample_report;
    use tempfile::TempDir;

    #[test]
    fn test_console_without_colors() {
        let report = sample_report().with_cover_letter(Some("Dear Hiring Manager,".to_string()));
        let bytes = ConsoleFormatter::new(false).format(&report).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("69/100 [PRIORITY]"));
        assert!(text.contains("ATS Compatibility   90/100"));
        assert!(text.contains("[GOOD]"));
        assert!(text.contains("kubernetes, terraform"));
        assert!(text.contains("1. 🚨 Priority: Improve Keyword Match (Score: 42/100)"));
        assert!(text.contains("Dear Hiring Manager,"));
        assert!(!text.contains("\u{1b}["));
    }

    #[test]
    fn test_console_rows_carry_their_band() {
        let bytes = ConsoleFormatter::new(false).format(&sample_report()).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let badge_of = |label: &str| {
            let line = text.lines().find(|line| line.trim_start().starts_with(label)).unwrap();
            line.rsplit(' ').next().unwrap().to_string()
        };
        assert_eq!(badge_of("ATS Compatibility"), "[GOOD]");
        assert_eq!(badge_of("Grammar & Style"), "[FAIR]");
        assert_eq!(badge_of("Keyword Match"), "[PRIORITY]");
    }

    #[test]
    fn test_json_shape() {
        let report = sample_report();
        let bytes = JsonFormatter::new(false).format(&report).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["ats_score"], 90);
        assert_eq!(value["keyword_match_score"], 42);
        assert_eq!(value["missing_keywords"][1], "terraform");
        assert!(value["feedback"]["grammar"]["strengths"].is_array());
        assert!(value.get("cover_letter").is_none());

        let parsed: AnalysisResult = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, report.result);
    }

    #[test]
    fn test_json_includes_cover_letter() {
        let report = sample_report().with_cover_letter(Some("Dear team".to_string()));
        let bytes = JsonFormatter::new(true).format(&report).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["cover_letter"], "Dear team");
    }

    #[test]
    fn test_markdown() {
        let bytes = MarkdownFormatter.format(&sample_report()).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("# 📊 Resume Analysis Report"));
        assert!(text.contains("| Keyword Match | 42/100 | 🔴 Priority |"));
        assert!(text.contains("| Grammar & Style | 75/100 | 🟡 Fair |"));
        assert!(text.contains("`kubernetes`, `terraform`"));
        assert!(text.contains("**Recommendations:**"));
    }

    #[test]
    fn test_pdf_bytes() {
        let report = sample_report().with_cover_letter(Some("Dear Hiring Manager,\n\n".repeat(80)));
        let bytes = PdfFormatter.format(&report).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_latin1_filter() {
        assert_eq!(latin1("✓ Email address found"), "Email address found");
        assert_eq!(latin1("café 🎉"), "café");
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("aaa bbb ccc", 7), vec!["aaa bbb", "ccc"]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert!(wrap("   ", 10).is_empty());
    }

    #[test]
    fn test_generator_dispatch_and_save() {
        let dir = TempDir::new().unwrap();
        let generator = ReportGenerator::with_options(false, true);
        let report = sample_report();

        let bytes = generator.generate_report(&report, OutputFormat::Markdown).unwrap();
        let path = dir.path().join("out").join(suggest_filename(
            OutputFormat::Markdown,
            &report.resume_label,
            false,
        ));
        save_report_to_file(&bytes, &path).unwrap();

        assert!(path.ends_with("jane_doe_analysis.md"));
        assert_eq!(std::fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(OutputFormat::Pdf, "cv/jane.pdf", false), "jane_analysis.pdf");
        assert!(suggest_filename(OutputFormat::Json, "jane.txt", true).ends_with(".json"));
    }
}
