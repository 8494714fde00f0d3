//! Resume / job description similarity with explainable top terms

use crate::config::ScoringConfig;
use crate::processing::tfidf::TfidfVectorizer;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermWeight {
    pub term: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityScore {
    /// Cosine similarity as a percentage, rounded to two decimals
    pub score: f64,
    /// Features that drove the score, heaviest first
    pub top_terms: Vec<TermWeight>,
}

impl SimilarityScore {
    pub fn zero() -> Self {
        Self {
            score: 0.0,
            top_terms: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimilarityScorer {
    vectorizer: TfidfVectorizer,
}

impl SimilarityScorer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            vectorizer: TfidfVectorizer::from_config(config),
        }
    }

    /// Score a resume against a job description as a two-document corpus
    pub fn score(&self, resume_text: &str, jd_text: &str, top_n: usize) -> SimilarityScore {
        let matrix = self.vectorizer.fit_transform(&[resume_text, jd_text]);
        if matrix.is_empty() {
            debug!("No shared vocabulary between documents, scoring 0");
            return SimilarityScore::zero();
        }

        let (resume_row, jd_row) = match (matrix.row(0), matrix.row(1)) {
            (Some(a), Some(b)) => (a, b),
            _ => return SimilarityScore::zero(),
        };

        let products: Vec<f64> = resume_row.iter().zip(jd_row).map(|(a, b)| a * b).collect();
        let cosine = cosine_from_products(&products, resume_row, jd_row);

        let mut top_terms: Vec<TermWeight> = matrix
            .features
            .iter()
            .zip(&products)
            .filter(|(_, weight)| **weight > 0.0)
            .map(|(term, &weight)| TermWeight {
                term: term.clone(),
                weight,
            })
            .collect();
        top_terms.sort_by(|a, b| {
            b.weight
                .total_cmp(&a.weight)
                .then_with(|| a.term.cmp(&b.term))
        });
        top_terms.truncate(top_n);

        SimilarityScore {
            score: round_percent(cosine),
            top_terms,
        }
    }
}

/// Score with the default vectorizer settings (unigrams + bigrams, English stop words, 5000 features)
pub fn score(resume_text: &str, jd_text: &str, top_n: usize) -> SimilarityScore {
    SimilarityScorer::default().score(resume_text, jd_text, top_n)
}

fn cosine_from_products(products: &[f64], a: &[f64], b: &[f64]) -> f64 {
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let dot: f64 = products.iter().sum();
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

fn round_percent(cosine: f64) -> f64 {
    (cosine * 100.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts_score_100() {
        let text = "senior python developer with sql and aws experience";
        let result = score(text, text, 5);

        assert_eq!(result.score, 100.0);
        assert!(!result.top_terms.is_empty());
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        let jd = "need python sql and aws experience";
        assert_eq!(score("", jd, 8), SimilarityScore::zero());
        assert_eq!(score(jd, "", 8), SimilarityScore::zero());
        assert_eq!(score("", "", 8), SimilarityScore::zero());
        assert_eq!(score("   ", "the and of", 8), SimilarityScore::zero());
    }

    #[test]
    fn test_disjoint_vocabularies_score_zero() {
        let result = score("java developer", "python analyst", 8);

        assert_eq!(result.score, 0.0);
        assert!(result.top_terms.is_empty());
    }

    #[test]
    fn test_score_is_bounded_and_terms_ordered() {
        let pairs = [
            ("experienced in python and sql", "need python sql and aws experience"),
            ("python python python", "python sql"),
            ("data scientist machine learning", "machine learning engineer data pipelines"),
        ];

        for (resume, jd) in pairs {
            let result = score(resume, jd, 3);
            assert!((0.0..=100.0).contains(&result.score));
            assert!(result.top_terms.len() <= 3);
            assert!(result.top_terms.iter().all(|t| t.weight > 0.0));
            for pair in result.top_terms.windows(2) {
                assert!(pair[0].weight >= pair[1].weight);
            }
        }
    }

    #[test]
    fn test_top_terms_only_shared_features() {
        let result = score("python sql tableau", "python sql aws", 10);
        let terms: Vec<&str> = result.top_terms.iter().map(|t| t.term.as_str()).collect();

        assert!(terms.contains(&"python"));
        assert!(terms.contains(&"sql"));
        assert!(terms.contains(&"python sql"));
        assert!(!terms.contains(&"tableau"));
        assert!(!terms.contains(&"aws"));
    }

    #[test]
    fn test_zero_top_n_returns_no_terms() {
        let result = score("python sql", "python sql", 0);

        assert_eq!(result.score, 100.0);
        assert!(result.top_terms.is_empty());
    }

    #[test]
    fn test_score_rounded_to_two_decimals() {
        let result = score("python sql tableau docker", "python aws flask", 8);
        let scaled = result.score * 100.0;

        assert!(result.score > 0.0 && result.score < 100.0);
        assert!((scaled - scaled.round()).abs() < 1e-6);
    }
}
