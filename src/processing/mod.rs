//! Text processing and screening module

pub mod normalizer;
pub mod tfidf;
pub mod scorer;
pub mod skill_matcher;
pub mod vocabulary;
pub mod document;
pub mod screener;

pub use normalizer::normalize;
pub use scorer::{score, SimilarityScore, TermWeight};
pub use skill_matcher::{extract_skills, missing_skills};
