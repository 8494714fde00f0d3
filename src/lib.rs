//! Resume screener library: TF-IDF similarity and skill gap analysis

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use config::Config;
pub use error::{Result, ScreenerError};
pub use processing::{extract_skills, missing_skills, normalize, score};
