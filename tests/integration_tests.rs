//! Integration tests for the resume matcher

use resume_matcher::config::{Config, OutputFormat};
use resume_matcher::error::MatcherError;
use resume_matcher::input::manager::InputManager;
use resume_matcher::output::formatter::{save_report_to_file, ReportGenerator};
use resume_matcher::processing::analyzer::{AnalysisEngine, AnalysisRequest};
use resume_matcher::processing::scorer::{MatchScorer, ScoringPath};
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();

    let text = manager.extract_text(&fixture("sample_resume.txt")).await.unwrap();

    assert!(text.contains("John Doe"));
    assert!(text.contains("Senior Software Engineer"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();

    let text = manager.extract_text(&fixture("sample_resume.md")).await.unwrap();

    assert!(text.contains("John Doe"));
    assert!(text.contains("Node.js"));
    assert!(text.contains("Docker"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = fixture("sample_resume.txt");

    let text1 = manager.extract_text(&path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(&path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_cache_disabled() {
    let mut manager = InputManager::new().with_cache(false);

    manager.extract_text(&fixture("sample_resume.txt")).await.unwrap();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();

    let result = manager.extract_text(&fixture("unsupported.xyz")).await;
    assert!(matches!(result, Err(MatcherError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_text_extraction_from_docx() {
    let mut manager = InputManager::new();

    let text = manager.extract_text(&fixture("sample_resume.docx")).await.unwrap();

    assert!(text.starts_with("John Doe\nSenior Software Engineer\n"));
    assert!(text.contains("Skills: Python, Django, Docker, PostgreSQL & AWS"));
    assert!(!text.contains("<w:"));

    let engine = AnalysisEngine::new(&Config::default()).unwrap();
    let jd_text = manager.extract_text(&fixture("sample_job.txt")).await.unwrap();
    let (result, _) = engine.analyze(&text, &jd_text);
    assert!(result.matched.contains("django"));
    assert!(result.resume_titles.contains("backend developer"));
}

#[tokio::test]
async fn test_corrupt_docx() {
    let mut manager = InputManager::new();

    let result = manager.extract_text(&fixture("corrupt.docx")).await;
    assert!(matches!(result, Err(MatcherError::DocxExtraction(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();

    let result = manager.extract_text(&fixture("nonexistent.txt")).await;
    assert!(matches!(result, Err(MatcherError::InvalidInput(_))));
}

#[tokio::test]
async fn test_file_size_limit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge.txt");
    std::fs::write(&path, "python ".repeat(200_000)).unwrap();

    let mut manager = InputManager::new().with_max_file_size_mb(1);
    match manager.extract_text(&path).await {
        Err(MatcherError::FileTooLarge { limit_mb, size_mb, .. }) => {
            assert_eq!(limit_mb, 1);
            assert!(size_mb > 1.0);
        }
        other => panic!("expected FileTooLarge, got {:?}", other.map(|t| t.len())),
    }
}

#[tokio::test]
async fn test_job_description_sources() {
    let mut manager = InputManager::new();
    let job_path = fixture("sample_job.txt");

    let inline = manager.job_description(None, Some("Rust engineer")).await.unwrap();
    assert_eq!(inline, "Rust engineer");

    let from_file = manager.job_description(Some(&job_path), None).await.unwrap();
    assert!(from_file.contains("Senior Backend Developer"));

    let both = manager.job_description(Some(&job_path), Some("Rust engineer")).await;
    assert!(matches!(both, Err(MatcherError::InvalidInput(_))));

    let neither = manager.job_description(None, None).await;
    assert!(matches!(neither, Err(MatcherError::InvalidInput(_))));
}

#[tokio::test]
async fn test_end_to_end_from_fixtures() {
    let mut manager = InputManager::new();
    let resume_text = manager.extract_text(&fixture("sample_resume.txt")).await.unwrap();
    let jd_text = manager.extract_text(&fixture("sample_job.txt")).await.unwrap();

    let engine = AnalysisEngine::new(&Config::default()).unwrap();
    let request = AnalysisRequest::new(resume_text, jd_text).with_sources("sample_resume.txt", "sample_job.txt");
    let report = engine.analyze_request(&request).unwrap();

    for skill in ["python", "django", "docker", "postgresql"] {
        assert!(report.matched_skills.contains(&skill.to_string()), "{} should match", skill);
    }
    assert!(report.missing_skills.contains(&"kubernetes".to_string()));
    assert!(report.missing_skills.contains(&"terraform".to_string()));
    assert!(report.extra_skills.contains(&"react".to_string()));
    assert!(report.job_titles.contains(&"backend developer".to_string()));
    assert_eq!(report.experience_level, "5 years");
    assert_eq!(report.details.scoring_path, ScoringPath::Skills);
    assert!(report.match_score >= 60 && report.match_score <= 100);

    let markdown_resume = manager.extract_text(&fixture("sample_resume.md")).await.unwrap();
    let markdown_report = engine
        .analyze_request(&AnalysisRequest::new(markdown_resume, request.jd_text.clone()))
        .unwrap();
    assert!(markdown_report.matched_skills.contains(&"python".to_string()));
}

#[test]
fn test_python_django_scenario() {
    let scorer = MatchScorer::with_defaults().unwrap();

    let result = scorer.score(
        "Python Django engineer. AWS certified. Software Engineer.",
        "We need a Python developer with Django and AWS. 5+ years experience required.",
    );

    assert!(result.matched.contains("python"));
    assert!(result.matched.contains("django"));
    assert!(result.matched.contains("aws"));
    assert!(result.missing.is_empty());
    assert_eq!(result.experience_level, "5 years");
    // 80 + 5 with no title in the job description
    assert_eq!(result.score, 85);
}

#[test]
fn test_java_not_found_in_javascript() {
    let scorer = MatchScorer::with_defaults().unwrap();

    let result = scorer.score("I write javascript", "Java developer wanted");

    assert!(!result.matched.contains("java"));
    assert!(result.missing.contains("java"));
}

#[test]
fn test_empty_job_description_is_degenerate() {
    let scorer = MatchScorer::with_defaults().unwrap();

    let result = scorer.score("Python developer", "");

    assert_eq!(result.score, 0);
    assert!(result.matched.is_empty());
    assert_eq!(result.experience_level, "Not specified");
    assert_eq!(result.scoring_path, ScoringPath::Degenerate);
}

#[test]
fn test_rendered_reports_saved_to_disk() {
    let engine = AnalysisEngine::new(&Config::default()).unwrap();
    let report = engine
        .analyze_request(&AnalysisRequest::new(
            "Rust and Python engineer",
            "Python engineer with Rust, Rust and more Rust",
        ))
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let generator = ReportGenerator::with_options(false, true, true, true, true);
    for (format, name) in [
        (OutputFormat::Console, "report.txt"),
        (OutputFormat::Json, "report.json"),
        (OutputFormat::Markdown, "nested/report.md"),
        (OutputFormat::Html, "report.html"),
    ] {
        let rendered = generator.generate_report(&report, format).unwrap();
        let path = dir.path().join(name);
        save_report_to_file(&rendered, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), rendered);
    }

    let json = std::fs::read_to_string(dir.path().join("report.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["match_score"], report.match_score);
}
