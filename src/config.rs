//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub skills: SkillsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Number of top contributing terms reported per resume
    pub top_n: usize,
    /// Vocabulary cap, by corpus term frequency
    pub max_features: usize,
    /// Smallest and largest n-gram length
    pub ngram_range: (usize, usize),
    pub remove_stop_words: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsConfig {
    /// CSV with a `skill` column; the built-in list is used when missing
    pub skills_csv: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub show_raw: bool,
    pub raw_preview_chars: usize,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Csv,
    Markdown,
    Html,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            top_n: 8,
            max_features: 5000,
            ngram_range: (1, 2),
            remove_stop_words: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            skills: SkillsConfig {
                skills_csv: PathBuf::from("data").join("skills_master.csv"),
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                show_raw: false,
                raw_preview_chars: 20_000,
                color_output: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load an explicit configuration file without touching the default location
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let (min_n, max_n) = self.scoring.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ScreenerError::Configuration(format!(
                "Invalid ngram_range ({}, {}): expected 1 <= min <= max",
                min_n, max_n
            )));
        }
        if self.scoring.max_features == 0 {
            return Err(ScreenerError::Configuration(
                "max_features must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
