//! Document model: raw input text plus its normalized form

use crate::processing::normalizer::normalize;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentRole {
    Resume,
    JobDescription,
}

impl std::fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentRole::Resume => write!(f, "resume"),
            DocumentRole::JobDescription => write!(f, "job_description"),
        }
    }
}

/// Immutable once built; the normalized text is derived at construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    id: String,
    role: DocumentRole,
    raw_text: String,
    normalized_text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, role: DocumentRole, raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        let normalized_text = normalize(&raw_text);
        Self {
            id: id.into(),
            role,
            raw_text,
            normalized_text,
        }
    }

    pub fn resume(id: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self::new(id, DocumentRole::Resume, raw_text)
    }

    pub fn job_description(raw_text: impl Into<String>) -> Self {
        Self::new(DocumentRole::JobDescription.to_string(), DocumentRole::JobDescription, raw_text)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> DocumentRole {
        self.role
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn normalized_text(&self) -> &str {
        &self.normalized_text
    }

    /// True when extraction produced nothing usable
    pub fn is_blank(&self) -> bool {
        self.normalized_text.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.normalized_text.split_whitespace().count()
    }
}
