use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::helpers::{letter_count, normalize};

pub const MAX_SAYING_LETTERS: usize = 40;

pub type SayingId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Saying {
    pub id: SayingId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub volumes: BTreeSet<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SayingRef {
    pub id: SayingId,
    pub text: String,
}

impl Saying {
    pub fn new(text: &str, category: Option<&str>) -> Result<Self, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::new("saying", "saying cannot be empty"));
        }
        let n_letters = letter_count(text);
        if n_letters > MAX_SAYING_LETTERS {
            return Err(ValidationError::new(
                "saying",
                format!(
                    "saying must contain at most {} letters, got {}",
                    MAX_SAYING_LETTERS, n_letters
                ),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            text: text.to_string(),
            category: category
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            volumes: BTreeSet::new(),
        })
    }

    pub fn normalized(&self) -> String {
        normalize(&self.text)
    }

    pub fn is_in_volume(&self, volume: u32) -> bool {
        self.volumes.contains(&volume)
    }

    pub fn tag_volume(&mut self, volume: u32) -> bool {
        self.volumes.insert(volume)
    }

    pub fn to_ref(&self) -> SayingRef {
        SayingRef {
            id: self.id,
            text: self.text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_limit_counts_only_letters() {
        let forty = format!("{}.", "ab ".repeat(20));
        assert!(Saying::new(&forty, None).is_ok());

        let forty_one = format!("{}c!", "ab ".repeat(20));
        let err = Saying::new(&forty_one, None).unwrap_err();
        assert_eq!(err.field, "saying");
    }

    #[test]
    fn test_normalized() {
        let saying = Saying::new("A stitch in time saves nine.", None).unwrap();
        assert_eq!(saying.normalized(), "ASTITCHINTIMESAVESNINE");
    }

    #[test]
    fn test_rejects_empty() {
        assert!(Saying::new("   ", None).is_err());
    }
}
