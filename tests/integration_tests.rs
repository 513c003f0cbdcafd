//! Integration tests for the resume scorer

use resume_scorer::cover_letter::{CoverLetterGenerator, CoverLetterRequest, TemplateGenerator};
use resume_scorer::input::InputManager;
use resume_scorer::output::formatter::ReportGenerator;
use resume_scorer::output::report::AnalysisReport;
use resume_scorer::processing::aggregator::{CONGRATULATIONS, TAILORING_TIP};
use resume_scorer::processing::ats_analyzer::ATSAnalyzer;
use resume_scorer::processing::grammar_analyzer::GrammarAnalyzer;
use resume_scorer::processing::keyword_analyzer::KeywordAnalyzer;
use resume_scorer::processing::keyword_extractor::KeywordExtractor;
use resume_scorer::processing::text_processor::TextProcessor;
use resume_scorer::config::OutputFormat;
use resume_scorer::{AnalysisEngine, ScorerError};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn engine() -> AnalysisEngine {
    AnalysisEngine::new(Arc::new(TextProcessor::new()))
}

fn strong_resume() -> String {
    let body = vec!["I led the team and designed a fast app for our users."; 25].join(" ");
    format!(
        "Jane Doe\njane@example.com, 555-123-4567\n\nExperience\n{}\n\nEducation\nBS in Computer Science, State University.\n\nSkills\nRust, Tokio, Postgres, Docker.\n",
        body
    )
}

const JOB: &str = "We are hiring a backend engineer with Rust, Kubernetes and Terraform \
experience to build distributed services, design APIs and mentor engineers.";

/// A Word document with body paragraphs, a page number and a two-row table
fn docx_resume() -> Vec<u8> {
    let paragraph = |text: &str| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", text);
    let cell = |text: &str| format!("<w:tc>{}</w:tc>", paragraph(text));

    let body = [
        paragraph("Jane Doe"),
        paragraph("jane@example.com, 555-123-4567"),
        format!(
            "<w:tbl><w:tr>{}{}</w:tr><w:tr>{}{}</w:tr></w:tbl>",
            cell("Skills"),
            cell("Rust, Tokio"),
            cell("Education"),
            cell("BS Computer Science")
        ),
        paragraph("Experience"),
        paragraph("Led the platform team and designed the APIs."),
        paragraph("1"),
    ]
    .concat();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let mut buffer = std::io::Cursor::new(Vec::new());
    {
        let mut zip = ZipWriter::new(&mut buffer);
        zip.start_file("word/document.xml", SimpleFileOptions::default()).unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }
    buffer.into_inner()
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Inputs the engine must score without failing
fn degenerate_inputs() -> Vec<String> {
    vec![
        String::new(),
        "   \t\n  \r\n ".to_string(),
        "!!!...??? --- ***".to_string(),
        "\0\x01\x07\x1b[0m\u{7f}".to_string(),
        "a".to_string(),
        "日本語のテキスト 🎉🚀 Ünïcödé".to_string(),
        "\n-".repeat(200),
        "★".repeat(500),
        strong_resume(),
        JOB.to_string(),
    ]
}

/// Every pairing of the short inputs, plus a ~1 MB document on either side
fn input_pairs() -> Vec<(String, String)> {
    let inputs = degenerate_inputs();
    let long = "résumé ".repeat(120_000);

    let mut pairs: Vec<(String, String)> = inputs
        .iter()
        .flat_map(|resume| inputs.iter().map(move |job| (resume.clone(), job.clone())))
        .collect();
    pairs.push((long.clone(), JOB.to_string()));
    pairs.push((String::new(), long.clone()));
    pairs.push((long.clone(), long));
    pairs
}

fn assert_bounded(score: u8) {
    assert!(score <= 100, "score out of range: {}", score);
}

#[test]
fn test_analyzers_are_total() {
    let processor = Arc::new(TextProcessor::new());
    let ats = ATSAnalyzer::new(processor.clone());
    let grammar = GrammarAnalyzer::new(processor.clone());
    let keywords = KeywordAnalyzer::new(processor);

    for (resume, job) in input_pairs() {
        assert_bounded(ats.score(&resume).score);
        assert_bounded(grammar.score(&resume).score);

        let keyword_score = keywords.score(&resume, &job);
        assert_bounded(keyword_score.score);
        assert!(keyword_score.missing_keywords.len() <= 10);
    }
}

#[test]
fn test_scores_are_bounded_and_overall_is_mean() {
    let engine = engine();

    for (resume, job) in input_pairs() {
        let result = engine
            .analyze(&resume, &job)
            .unwrap_or_else(|e| panic!("analysis failed for {:?}: {}", resume.get(..20), e));
        for score in [
            result.ats_score,
            result.grammar_score,
            result.keyword_match_score,
            result.overall_score,
        ] {
            assert_bounded(score);
        }

        let sum = result.ats_score as u16 + result.grammar_score as u16 + result.keyword_match_score as u16;
        assert_eq!(result.overall_score as u16, sum / 3);
        assert!(result.suggestions.len() <= 8);
        assert!(result.missing_keywords.len() <= 10);
    }
}

#[test]
fn test_empty_resume_is_scored() {
    let result = engine().analyze("", JOB).unwrap();

    assert_eq!(result.grammar_score, 85);
    assert_eq!(result.keyword_match_score, 0);
    assert!(result
        .feedback
        .ats
        .weaknesses
        .contains(&"No email address found".to_string()));
}

#[test]
fn test_analysis_is_idempotent() {
    let engine = engine();
    let resume = strong_resume();

    let first = engine.analyze(&resume, JOB).unwrap();
    let second = engine.analyze(&resume, JOB).unwrap();
    assert_eq!(first, second);

    let sequential = engine.clone().with_parallelism(false).analyze(&resume, JOB).unwrap();
    assert_eq!(first, sequential);
}

#[test]
fn test_degenerate_inputs_are_scored() {
    // Only stop words and single characters: nothing for the vectorizer
    let result = engine().analyze("a b c the and of", "is it to be").unwrap();
    assert_eq!(result.keyword_match_score, 30);
    assert!(result.missing_keywords.is_empty());
}

#[test]
fn test_extractor_is_order_stable() {
    let extractor = KeywordExtractor::new(Arc::new(TextProcessor::new()));
    assert_eq!(extractor.extract(JOB), extractor.extract(JOB));
}

#[test]
fn test_missing_contact_details() {
    let result = engine()
        .analyze("Experienced engineer with strong skills in distributed systems", JOB)
        .unwrap();

    let weaknesses = &result.feedback.ats.weaknesses;
    assert!(weaknesses.contains(&"No email address found".to_string()));
    assert!(weaknesses.contains(&"No phone number found".to_string()));
    assert!(result.ats_score <= 70);
}

#[test]
fn test_short_resume_deduction() {
    let resume = format!(
        "jane@example.com 555-123-4567 Experience Education Skills {}",
        vec!["engineer"; 145].join(" ")
    );
    assert_eq!(resume.split_whitespace().count(), 150);

    let result = engine().analyze(&resume, JOB).unwrap();
    assert!(result
        .feedback
        .ats
        .weaknesses
        .contains(&"Resume appears too short".to_string()));
    assert_eq!(result.ats_score, 80);
}

#[test]
fn test_identical_texts_match_fully() {
    let resume = strong_resume();
    let result = engine().analyze(&resume, &resume).unwrap();

    assert!(result.keyword_match_score >= 99);
    assert!(result.missing_keywords.is_empty());
}

#[test]
fn test_strong_resume_gets_congratulations() {
    let resume = strong_resume();
    let result = engine().analyze(&resume, &resume).unwrap();

    assert_eq!(result.ats_score, 100);
    assert!(result.grammar_score >= 85);
    assert!(result.keyword_match_score >= 85);
    assert_eq!(result.suggestions, vec![CONGRATULATIONS.to_string(), TAILORING_TIP.to_string()]);
}

#[tokio::test]
async fn test_async_matches_sync() {
    let engine = engine();
    let resume = strong_resume();

    let sync = engine.analyze(&resume, JOB).unwrap();
    let asynchronous = engine.analyze_async(resume, JOB.to_string()).await.unwrap();
    assert_eq!(sync, asynchronous);
}

#[tokio::test]
async fn test_text_extraction_and_caching() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "resume.txt", &strong_resume());

    let mut manager = InputManager::new();
    let text1 = manager.extract_text(&path).await.unwrap();
    assert!(text1.contains("jane@example.com"));
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(&path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_markdown_extraction() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "resume.md",
        "# Jane Doe\n\n## Experience\n\n- **Led** the platform team\n- Designed the `api`\n",
    );

    let mut manager = InputManager::new().with_cache(false);
    let text = manager.extract_text(&path).await.unwrap();

    assert!(text.contains("Jane Doe"));
    assert!(text.contains("- Led the platform team"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_and_missing_files() {
    let dir = TempDir::new().unwrap();
    let unknown = write_file(&dir, "resume.xyz", "plain words here");
    let legacy = write_file(&dir, "resume.doc", "binary word document");
    let broken_docx = write_file(&dir, "resume.docx", "PK fake");

    let mut manager = InputManager::new();
    assert!(manager.extract_text(&unknown).await.unwrap_err().is_unsupported_format());
    assert!(manager.extract_text(&legacy).await.unwrap_err().is_unsupported_format());
    assert!(matches!(
        manager.extract_text(&broken_docx).await,
        Err(ScorerError::Extraction(_))
    ));

    let missing = manager.extract_text(Path::new("does/not/exist.txt")).await;
    assert!(matches!(missing, Err(ScorerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_docx_extraction_and_scoring() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.docx");
    std::fs::write(&path, docx_resume()).unwrap();

    let mut manager = InputManager::new();
    let text = manager.extract_text(&path).await.unwrap();

    assert_eq!(
        text,
        "Jane Doe\njane@example.com, 555-123-4567\nExperience\nLed the platform team and designed the APIs.\nSkills | Rust, Tokio\nEducation | BS Computer Science"
    );
    assert_eq!(manager.cache_size(), 1);

    let result = engine().analyze(&text, JOB).unwrap();
    assert!(!result
        .feedback
        .ats
        .weaknesses
        .contains(&"No email address found".to_string()));
}

#[tokio::test]
async fn test_short_document_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "tiny.txt", "  short  ");

    let mut manager = InputManager::new();
    let error = manager.extract_text(&path).await.unwrap_err();
    assert!(matches!(error, ScorerError::Extraction(_)));
}

#[tokio::test]
async fn test_report_with_offline_cover_letter() {
    let resume = strong_resume();
    let result = engine().analyze(&resume, JOB).unwrap();

    let request = CoverLetterRequest::new(resume, JOB)
        .with_company(Some("Acme".to_string()))
        .with_position(None);
    let letter = CoverLetterGenerator::new(TemplateGenerator)
        .generate(&request)
        .await
        .unwrap();
    assert!(letter.contains("position at Acme"));
    assert!(letter.contains("[Position Title]"));

    let report = AnalysisReport::new(result.clone(), "resume.txt", "job.txt")
        .with_cover_letter(Some(letter));
    let json = ReportGenerator::with_options(false, false)
        .generate_report(&report, OutputFormat::Json)
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();

    assert_eq!(value["overall_score"], result.overall_score);
    assert!(value["cover_letter"].as_str().unwrap().contains("Acme"));
}
