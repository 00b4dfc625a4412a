//! Integration tests for the ATS scorer

use ats_scorer::config::OutputFormat;
use ats_scorer::input::InputManager;
use ats_scorer::output::{AtsReport, ReportGenerator};
use ats_scorer::scoring::sections::Section;
use ats_scorer::{AtsAnalyzer, AtsScorerError};
use std::path::Path;

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("Jane Doe"));
    assert!(text.contains("Netflix"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("Jane Doe"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(AtsScorerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(AtsScorerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_scores_fixture_resume_against_job() {
    let mut manager = InputManager::new();
    let resume = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let job = manager
        .extract_text(Path::new("tests/fixtures/sample_job.txt"))
        .await
        .unwrap();

    let analysis = AtsAnalyzer::new().analyze(&resume, &job);
    let breakdown = &analysis.breakdown;

    // email, phone, LinkedIn and GitHub
    assert_eq!(breakdown.format_score, 90);
    // all six action verbs plus quantified results, under 200 words
    assert_eq!(breakdown.content_score, 80);
    // tenure, two notable employers, leadership
    assert_eq!(breakdown.experience_score, 90);

    assert!(breakdown.missing_sections.is_empty());
    for section in Section::REQUIRED {
        assert!(breakdown.sections.contains(&section));
    }

    assert_eq!(analysis.missing_keywords.len(), 5);
    assert_eq!(analysis.missing_keywords[0], "hiring");
    assert!(analysis.interview_probability <= 95);
    assert!(analysis.interview_probability >= analysis.score.min(95));
}

#[test]
fn test_report_renders_in_every_format() {
    let analyzer = AtsAnalyzer::new();
    let analysis = analyzer.analyze("Skills: Python and SQL", "");
    let report = AtsReport::new(
        analysis,
        Path::new("resume.txt"),
        None,
        1,
        analyzer.calculator().weights(),
    );
    let generator = ReportGenerator::new();

    for format in [
        OutputFormat::Console,
        OutputFormat::Json,
        OutputFormat::Markdown,
        OutputFormat::Html,
    ] {
        let rendered = generator.generate_report(&report, format).unwrap();
        assert!(!rendered.is_empty());
        assert!(rendered.contains("Python"));
    }
}
