//! Screening report: ranked results plus the context they were produced in

use crate::processing::document::Document;
use crate::processing::screener::ScreeningResult;
use crate::processing::vocabulary::{SkillVocabulary, VocabularySource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub metadata: ReportMetadata,

    /// Skills found in the job description
    pub job_skills: Vec<String>,

    /// Sorted by score, highest first
    pub results: Vec<ScreeningResult>,

    /// Per-document problems worth surfacing, e.g. unreadable uploads
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub screener_version: String,
    pub job_description: String,
    pub vocabulary_source: VocabularySource,
    pub vocabulary_size: usize,
    pub top_n: usize,
    pub processing_time_ms: u64,
}

impl ScreeningReport {
    pub fn new(
        job: &Document,
        job_skills: Vec<String>,
        vocabulary: &SkillVocabulary,
        top_n: usize,
        results: Vec<ScreeningResult>,
        processing_time_ms: u64,
    ) -> Self {
        let warnings = results
            .iter()
            .filter(|r| r.raw_text.trim().is_empty())
            .map(|r| {
                format!(
                    "Could not extract text from {}. Try re-saving it or using a TXT file.",
                    r.filename
                )
            })
            .collect();

        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                screener_version: env!("CARGO_PKG_VERSION").to_string(),
                job_description: job.id().to_string(),
                vocabulary_source: vocabulary.source().clone(),
                vocabulary_size: vocabulary.len(),
                top_n,
                processing_time_ms,
            },
            job_skills,
            results,
            warnings,
        }
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn best_match(&self) -> Option<&ScreeningResult> {
        self.results.first()
    }

    pub fn vocabulary_label(&self) -> String {
        match &self.metadata.vocabulary_source {
            VocabularySource::Csv(path) => path.display().to_string(),
            VocabularySource::BuiltIn => "built-in defaults".to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::processing::scorer::TermWeight;

    pub fn sample_report() -> ScreeningReport {
        let job = Document::job_description("Need Python, SQL and AWS experience");
        let results = vec![
            ScreeningResult {
                filename: "alice.pdf".to_string(),
                score: 61.5,
                top_terms: vec![
                    TermWeight { term: "python".to_string(), weight: 0.21 },
                    TermWeight { term: "sql".to_string(), weight: 0.18 },
                ],
                matched_skills: vec!["python".to_string(), "sql".to_string()],
                missing_skills: vec!["aws".to_string()],
                raw_text: "Experienced in Python and SQL".to_string(),
            },
            ScreeningResult {
                filename: "bob.txt".to_string(),
                score: 0.0,
                top_terms: Vec::new(),
                matched_skills: Vec::new(),
                missing_skills: vec!["aws".to_string(), "python".to_string(), "sql".to_string()],
                raw_text: String::new(),
            },
        ];

        ScreeningReport::new(
            &job,
            vec!["aws".to_string(), "python".to_string(), "sql".to_string()],
            &SkillVocabulary::default(),
            8,
            results,
            3,
        )
    }

    #[test]
    fn test_blank_documents_raise_warnings() {
        let report = sample_report();

        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("bob.txt"));
        assert_eq!(report.best_match().unwrap().filename, "alice.pdf");
        assert_eq!(report.vocabulary_label(), "built-in defaults");
    }
}
