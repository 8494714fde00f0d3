//! Whole-token skill matching and skill gap analysis

use crate::error::{Result, ScreenerError};
use aho_corasick::{AhoCorasick, MatchKind};
use log::warn;
use std::collections::BTreeSet;

/// Literal, word-boundary-aware matcher over a fixed skill vocabulary
pub struct SkillMatcher {
    automaton: Option<AhoCorasick>,
    /// Vocabulary entry as supplied, indexed by pattern id
    skills: Vec<String>,
}

impl SkillMatcher {
    pub fn new<I, S>(vocabulary: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut skills = Vec::new();
        let mut patterns = Vec::new();

        for entry in vocabulary {
            let original = entry.as_ref();
            let key = original.trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            skills.push(original.to_string());
            patterns.push(key);
        }

        if patterns.is_empty() {
            return Ok(Self {
                automaton: None,
                skills,
            });
        }

        // overlapping search needs the standard match kind
        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&patterns)
            .map_err(|e| ScreenerError::SkillVocabulary(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self {
            automaton: Some(automaton),
            skills,
        })
    }

    /// Skills from the vocabulary that occur as whole tokens in `text`, sorted
    pub fn extract_skills(&self, text: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        let automaton = match &self.automaton {
            Some(automaton) if !text.is_empty() => automaton,
            _ => return found,
        };

        let lowered = text.to_lowercase();
        for mat in automaton.find_overlapping_iter(&lowered) {
            if is_token_boundary(&lowered, mat.start(), mat.end()) {
                found.insert(self.skills[mat.pattern().as_usize()].clone());
            }
        }

        found
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// The match must not be glued to a word character on either side
fn is_token_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.map_or(false, is_word_char) && !after.map_or(false, is_word_char)
}

/// Skills from `vocabulary` found in `text`. Never fails: an unusable vocabulary yields no skills.
pub fn extract_skills<I, S>(text: &str, vocabulary: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    match SkillMatcher::new(vocabulary) {
        Ok(matcher) => matcher.extract_skills(text),
        Err(e) => {
            warn!("Skill matching skipped: {}", e);
            BTreeSet::new()
        }
    }
}

/// Job description skills absent from the resume, ascending
pub fn missing_skills(jd_skills: &BTreeSet<String>, resume_skills: &BTreeSet<String>) -> Vec<String> {
    jd_skills.difference(resume_skills).cloned().collect()
}
