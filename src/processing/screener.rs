//! Screening pipeline: one job description against a batch of resumes

use crate::config::ScoringConfig;
use crate::error::{Result, ScreenerError};
use crate::processing::document::Document;
use crate::processing::scorer::{SimilarityScorer, TermWeight};
use crate::processing::skill_matcher::{missing_skills, SkillMatcher};
use crate::processing::vocabulary::SkillVocabulary;
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Instant;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub filename: String,
    /// TF-IDF cosine similarity, 0-100
    pub score: f64,
    pub top_terms: Vec<TermWeight>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    #[serde(skip)]
    pub raw_text: String,
}

impl ScreeningResult {
    pub fn top_term_names(&self) -> Vec<&str> {
        self.top_terms.iter().map(|t| t.term.as_str()).collect()
    }
}

pub struct Screener {
    scorer: SimilarityScorer,
    matcher: SkillMatcher,
    top_n: usize,
}

impl Screener {
    pub fn new(vocabulary: &SkillVocabulary, config: &ScoringConfig) -> Result<Self> {
        Ok(Self {
            scorer: SimilarityScorer::new(config),
            matcher: SkillMatcher::new(vocabulary.skills())?,
            top_n: config.top_n,
        })
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Skills of the job description, extracted from its normalized text
    pub fn job_skills(&self, job: &Document) -> BTreeSet<String> {
        self.matcher.extract_skills(job.normalized_text())
    }

    pub fn screen(&self, job: &Document, resume: &Document) -> ScreeningResult {
        let jd_skills = self.job_skills(job);
        self.screen_with_job_skills(job, &jd_skills, resume)
    }

    fn screen_with_job_skills(
        &self,
        job: &Document,
        jd_skills: &BTreeSet<String>,
        resume: &Document,
    ) -> ScreeningResult {
        let similarity = self
            .scorer
            .score(resume.normalized_text(), job.normalized_text(), self.top_n);
        let resume_skills = self.matcher.extract_skills(resume.normalized_text());
        let missing = missing_skills(jd_skills, &resume_skills);

        debug!(
            "Screened {}: score {:.2}, {} matched, {} missing",
            resume.id(),
            similarity.score,
            resume_skills.len(),
            missing.len()
        );

        ScreeningResult {
            filename: resume.id().to_string(),
            score: similarity.score,
            top_terms: similarity.top_terms,
            matched_skills: resume_skills.into_iter().collect(),
            missing_skills: missing,
            raw_text: resume.raw_text().to_string(),
        }
    }

    /// Screen every resume independently and rank by score, highest first
    pub fn screen_batch(&self, job: &Document, resumes: &[Document]) -> Result<Vec<ScreeningResult>> {
        if job.is_blank() {
            return Err(ScreenerError::InvalidInput(
                "Job description is empty".to_string(),
            ));
        }
        if resumes.is_empty() {
            return Err(ScreenerError::InvalidInput(
                "At least one resume is required".to_string(),
            ));
        }

        let start = Instant::now();
        let jd_skills = self.job_skills(job);

        let mut results: Vec<ScreeningResult> = resumes
            .par_iter()
            .map(|resume| self.screen_with_job_skills(job, &jd_skills, resume))
            .collect();

        // stable: equal scores keep upload order
        results.sort_by(|a, b| b.score.total_cmp(&a.score));

        info!(
            "Screened {} resume(s) against {} job skill(s) in {}ms",
            results.len(),
            jd_skills.len(),
            start.elapsed().as_millis()
        );
        Ok(results)
    }
}
