//! Integration tests for the resume screener

use resume_screener::config::{OutputFormat, ScoringConfig};
use resume_screener::input::InputManager;
use resume_screener::output::{ReportGenerator, ScreeningReport};
use resume_screener::processing::document::Document;
use resume_screener::processing::screener::Screener;
use resume_screener::processing::vocabulary::{SkillVocabulary, VocabularySource};
use resume_screener::{extract_skills, missing_skills, normalize, score};
use std::path::Path;
use tempfile::TempDir;

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let text = manager.extract_text(Path::new("tests/fixtures/sample_resume.txt")).await;

    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("Node.js"));
    assert!(text.contains("C++"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let text = manager.extract_text(Path::new("tests/fixtures/sample_resume.md")).await;

    assert!(text.contains("John Doe"));
    assert!(text.contains("Power BI"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await;
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await;
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_failed_extraction_yields_empty_text() {
    let mut manager = InputManager::new().with_cache(false);

    assert_eq!(manager.extract_text(Path::new("tests/fixtures/nonexistent.txt")).await, "");
    assert_eq!(manager.extract_text(Path::new("tests/fixtures/corrupt.pdf")).await, "");
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unknown_extension_read_as_text() {
    let mut manager = InputManager::new();
    let text = manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await;

    assert_eq!(normalize(&text), "binary junk");
}

#[test]
fn test_skills_csv_fixture() {
    let path = Path::new("tests/fixtures/skills_master.csv");
    let vocabulary = SkillVocabulary::load_or_default(path);

    assert_eq!(vocabulary.source(), &VocabularySource::Csv(path.to_path_buf()));
    assert_eq!(vocabulary.len(), 7);
    assert!(vocabulary.contains("power bi"));
    assert!(vocabulary.contains("c++"));
}

#[test]
fn test_core_properties() {
    assert_eq!(normalize("Node.JS, C++ & C#!"), "node.js c++ c#");

    let a = "experienced python developer";
    assert_eq!(score(a, a, 5).score, 100.0);
    assert_eq!(score("", a, 5).score, 0.0);
    assert!(score("", a, 5).top_terms.is_empty());

    assert_eq!(
        extract_skills("I know java and javascript", ["java", "javascript"]).len(),
        2
    );
    assert!(extract_skills("I use c++ daily", ["c++"]).contains("c++"));

    let jd = extract_skills("python sql aws", ["python", "sql", "aws"]);
    let resume = extract_skills("python", ["python", "sql", "aws"]);
    assert_eq!(missing_skills(&jd, &resume), vec!["aws", "sql"]);
}

#[tokio::test]
async fn test_end_to_end_screening_to_csv() {
    let mut manager = InputManager::new();
    let job_text = manager.extract_text(Path::new("tests/fixtures/job_description.txt")).await;
    let job = Document::job_description(job_text);

    let vocabulary = SkillVocabulary::load_or_default(Path::new("tests/fixtures/skills_master.csv"));
    let screener = Screener::new(&vocabulary, &ScoringConfig::default()).unwrap();

    let resumes = vec![
        Document::resume("java.txt", "Java developer"),
        Document::resume(
            "sample_resume.txt",
            manager.extract_text(Path::new("tests/fixtures/sample_resume.txt")).await,
        ),
        Document::resume("corrupt.pdf", manager.extract_text(Path::new("tests/fixtures/corrupt.pdf")).await),
    ];

    let job_skills: Vec<String> = screener.job_skills(&job).into_iter().collect();
    assert_eq!(job_skills, vec!["aws", "machine learning", "power bi", "python", "sql"]);

    let results = screener.screen_batch(&job, &resumes).unwrap();
    assert_eq!(results[0].filename, "sample_resume.txt");
    assert!(results[0].score > 0.0);
    assert_eq!(results[0].missing_skills, vec!["aws"]);
    assert!(results[0].matched_skills.contains(&"c++".to_string()));
    // both zero-score resumes keep their input order
    assert_eq!(results[1].filename, "java.txt");
    assert_eq!(results[2].filename, "corrupt.pdf");

    let report = ScreeningReport::new(&job, job_skills, &vocabulary, 8, results, 1);
    assert_eq!(report.warnings.len(), 1);

    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("screening_results.csv");
    let csv = ReportGenerator::new().generate_report(&report, &OutputFormat::Csv).unwrap();
    resume_screener::output::formatter::save_report_to_file(&csv, &out).unwrap();

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("filename,score_tfidf,matched_skills,missing_skills,top_terms"));
    assert_eq!(written.lines().count(), 4);
}
