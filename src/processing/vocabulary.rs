//! Skill vocabulary loading

use crate::error::{Result, ScreenerError};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Used when no skills CSV is available
pub const DEFAULT_SKILLS: &[&str] = &[
    "python",
    "sql",
    "pandas",
    "numpy",
    "machine learning",
    "power bi",
    "tableau",
    "aws",
    "docker",
    "flask",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VocabularySource {
    Csv(PathBuf),
    BuiltIn,
}

/// Trimmed, lowercased, non-empty, de-duplicated skill phrases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillVocabulary {
    skills: BTreeSet<String>,
    source: VocabularySource,
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::from_entries(DEFAULT_SKILLS.iter().copied(), VocabularySource::BuiltIn)
    }
}

impl SkillVocabulary {
    pub fn from_entries<I, S>(entries: I, source: VocabularySource) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let skills = entries
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { skills, source }
    }

    /// Read the `skill` column of a CSV file with a header row
    pub fn load_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;

        let column = reader
            .headers()?
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case("skill"))
            .ok_or_else(|| {
                ScreenerError::SkillVocabulary(format!("No 'skill' column in {}", path.display()))
            })?;

        let mut entries = Vec::new();
        for record in reader.records() {
            let record = record?;
            if let Some(value) = record.get(column) {
                entries.push(value.to_string());
            }
        }

        let vocabulary = Self::from_entries(entries, VocabularySource::Csv(path.to_path_buf()));
        if vocabulary.is_empty() {
            return Err(ScreenerError::SkillVocabulary(format!(
                "No skills listed in {}",
                path.display()
            )));
        }
        Ok(vocabulary)
    }

    /// Load from CSV, falling back to the built-in list on any failure
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            warn!(
                "Skills file {} not found, using {} built-in skills",
                path.display(),
                DEFAULT_SKILLS.len()
            );
            return Self::default();
        }

        match Self::load_csv(path) {
            Ok(vocabulary) => {
                info!("Loaded {} skills from {}", vocabulary.len(), path.display());
                vocabulary
            }
            Err(e) => {
                warn!("Could not load skills from {}: {}. Using built-in skills", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|s| s.as_str())
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }

    pub fn source(&self) -> &VocabularySource {
        &self.source
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.source, VocabularySource::BuiltIn)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_entries_are_cleaned() {
        let vocab = SkillVocabulary::from_entries(
            ["  Python ", "python", "SQL", "", "   ", "Power BI"],
            VocabularySource::BuiltIn,
        );

        assert_eq!(vocab.len(), 3);
        assert!(vocab.contains("python"));
        assert!(vocab.contains("sql"));
        assert!(vocab.contains("power bi"));
    }

    #[test]
    fn test_default_vocabulary() {
        let vocab = SkillVocabulary::default();
        assert_eq!(vocab.len(), DEFAULT_SKILLS.len());
        assert!(vocab.is_builtin());
        assert!(vocab.contains("machine learning"));
    }

    #[test]
    fn test_load_csv() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("skills.csv");
        std::fs::write(&path, "category,skill\nlang,Rust\nlang, Go \ndb,rust\ntool,\nbi,Power BI\n").unwrap();

        let vocab = SkillVocabulary::load_csv(&path).unwrap();
        let skills: Vec<&str> = vocab.skills().collect();
        assert_eq!(skills, vec!["go", "power bi", "rust"]);
        assert_eq!(vocab.source(), &VocabularySource::Csv(path));
    }

    #[test]
    fn test_missing_column_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("skills.csv");
        std::fs::write(&path, "name\nrust\n").unwrap();

        assert!(SkillVocabulary::load_csv(&path).is_err());
        assert!(SkillVocabulary::load_or_default(&path).is_builtin());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let vocab = SkillVocabulary::load_or_default(&temp_dir.path().join("absent.csv"));
        assert_eq!(vocab, SkillVocabulary::default());
    }
}
