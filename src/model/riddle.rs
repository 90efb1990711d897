use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::helpers::{letter_count, normalize};

pub const MAX_CLUE_LENGTH: usize = 60;
pub const MAX_WORD_TOKEN_LENGTH: usize = 12;

pub type RiddleId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Riddle {
    pub id: RiddleId,
    pub clue: String,
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Volumes this riddle has been published in.
    #[serde(default)]
    pub volumes: BTreeSet<u32>,
}

/// Snapshot of a riddle as it was when a figgerit was built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiddleRef {
    pub id: RiddleId,
    pub clue: String,
    pub word: String,
}

impl Riddle {
    pub fn new(
        clue: &str,
        word: &str,
        category: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let clue = clue.trim();
        let word = word.trim();

        if clue.is_empty() {
            return Err(ValidationError::new("clue", "clue cannot be empty"));
        }
        if clue.chars().count() > MAX_CLUE_LENGTH {
            return Err(ValidationError::new(
                "clue",
                format!("clue must be at most {} characters", MAX_CLUE_LENGTH),
            ));
        }
        if word.is_empty() {
            return Err(ValidationError::new("word", "word cannot be empty"));
        }
        if let Some(token) = word
            .split_whitespace()
            .find(|t| t.chars().count() > MAX_WORD_TOKEN_LENGTH)
        {
            return Err(ValidationError::new(
                "word",
                format!(
                    "each word must be at most {} characters long, got {:?}",
                    MAX_WORD_TOKEN_LENGTH, token
                ),
            ));
        }
        if letter_count(word) == 0 {
            return Err(ValidationError::new(
                "word",
                "word must contain at least one letter",
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            clue: clue.to_string(),
            word: word.to_string(),
            category: category
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            volumes: BTreeSet::new(),
        })
    }

    pub fn normalized_word(&self) -> String {
        normalize(&self.word)
    }

    pub fn is_in_volume(&self, volume: u32) -> bool {
        self.volumes.contains(&volume)
    }

    /// Adds `volume` to the riddle's volumes. Returns false when it was already there.
    pub fn tag_volume(&mut self, volume: u32) -> bool {
        self.volumes.insert(volume)
    }

    pub fn to_ref(&self) -> RiddleRef {
        RiddleRef {
            id: self.id,
            clue: self.clue.clone(),
            word: self.word.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_and_accepts_multi_word_answers() {
        let riddle = Riddle::new("  Not a soul ", " no-one's home ", Some("people")).unwrap();
        assert_eq!(riddle.clue, "Not a soul");
        assert_eq!(riddle.word, "no-one's home");
        assert_eq!(riddle.category.as_deref(), Some("people"));
        assert_eq!(riddle.normalized_word(), "NOONESHOME");
    }

    #[test]
    fn test_new_rejects_long_tokens() {
        let err = Riddle::new("Clue", "antidisestablishment", None).unwrap_err();
        assert_eq!(err.field, "word");

        assert!(Riddle::new("Clue", "twelve-chars twelve-chars", None).is_ok());
    }

    #[test]
    fn test_new_rejects_empty_and_letterless() {
        assert_eq!(Riddle::new(" ", "word", None).unwrap_err().field, "clue");
        assert_eq!(Riddle::new("Clue", "   ", None).unwrap_err().field, "word");
        assert_eq!(Riddle::new("Clue", "--", None).unwrap_err().field, "word");
        let long_clue = "x".repeat(MAX_CLUE_LENGTH + 1);
        assert_eq!(Riddle::new(&long_clue, "word", None).unwrap_err().field, "clue");
    }

    #[test]
    fn test_blank_category_is_none() {
        let riddle = Riddle::new("Clue", "word", Some("  ")).unwrap();
        assert_eq!(riddle.category, None);
    }

    #[test]
    fn test_tag_volume_is_idempotent() {
        let mut riddle = Riddle::new("Clue", "word", None).unwrap();
        assert!(riddle.tag_volume(3));
        assert!(!riddle.tag_volume(3));
        assert_eq!(riddle.volumes.len(), 1);
        assert!(riddle.is_in_volume(3));
        assert!(!riddle.is_in_volume(4));
    }
}
