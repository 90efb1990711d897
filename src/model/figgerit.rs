use std::fmt::Display;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::TimestampSeconds;
use uuid::Uuid;

use super::{AnswerCell, AnswerGlyph, MatchResult, Saying, SayingRef};
use crate::error::ValidationError;

/// Number of riddles in every figgerit.
pub const MATCHES_PER_FIGGERIT: usize = 7;

const CELL_WIDTH: usize = 3;

/// A finished puzzle. Matches are copied in by value, so later edits to
/// the source riddles or saying do not change it.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figgerit {
    pub id: Uuid,
    pub volume: u32,
    pub saying: SayingRef,
    pub matches: Vec<MatchResult>,
    #[serde_as(as = "TimestampSeconds")]
    pub created_at: SystemTime,
}

impl Figgerit {
    pub fn new(
        volume: u32,
        saying: &Saying,
        matches: Vec<MatchResult>,
    ) -> Result<Self, ValidationError> {
        verify_exact_cover(&saying.normalized(), &matches)?;
        Ok(Self {
            id: Uuid::new_v4(),
            volume,
            saying: saying.to_ref(),
            matches,
            created_at: SystemTime::now(),
        })
    }

    pub fn riddle_ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.matches.iter().map(|m| m.riddle.id)
    }
}

/// Checks that `matches` holds exactly seven entries and that together they
/// cover every letter slot of `normalized_saying` exactly once.
pub fn verify_exact_cover(
    normalized_saying: &str,
    matches: &[MatchResult],
) -> Result<(), ValidationError> {
    if matches.len() != MATCHES_PER_FIGGERIT {
        return Err(ValidationError::new(
            "matches",
            format!(
                "expected {} matches, got {}",
                MATCHES_PER_FIGGERIT,
                matches.len()
            ),
        ));
    }

    let letters: Vec<char> = normalized_saying.chars().collect();
    let mut covered = vec![false; letters.len()];
    for lp in matches.iter().flat_map(|m| m.letter_positions.iter()) {
        match letters.get(lp.position) {
            None => {
                return Err(ValidationError::new(
                    "matches",
                    format!("position {} is outside the saying", lp.position),
                ))
            }
            Some(&letter) if letter != lp.letter => {
                return Err(ValidationError::new(
                    "matches",
                    format!(
                        "position {} holds {:?}, not {:?}",
                        lp.position, letter, lp.letter
                    ),
                ))
            }
            Some(_) if covered[lp.position] => {
                return Err(ValidationError::new(
                    "matches",
                    format!("position {} is covered twice", lp.position),
                ))
            }
            Some(_) => covered[lp.position] = true,
        }
    }

    if let Some(missing) = covered.iter().position(|c| !c) {
        return Err(ValidationError::new(
            "matches",
            format!("position {} is not covered", missing),
        ));
    }
    Ok(())
}

fn push_cells(cells: &[AnswerCell], output: &mut String) {
    let mut blanks = String::new();
    let mut numbers = String::new();
    for cell in cells {
        match cell {
            AnswerCell::Slot { position, .. } => {
                blanks.push_str(&format!("{:<w$}", "_", w = CELL_WIDTH));
                numbers.push_str(&format!("{:<w$}", position + 1, w = CELL_WIDTH));
            }
            AnswerCell::Literal(c) => {
                blanks.push_str(&format!("{:<w$}", c, w = CELL_WIDTH));
                numbers.push_str(&" ".repeat(CELL_WIDTH));
            }
        }
    }
    output.push_str("    ");
    output.push_str(blanks.trim_end());
    output.push('\n');
    output.push_str("    ");
    output.push_str(numbers.trim_end());
    output.push('\n');
}

impl Display for Figgerit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut output = String::new();
        output.push_str(&format!("Volume {} | Figgerit {}\n", self.volume, self.id));

        for (idx, m) in self.matches.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", idx + 1, m.riddle.clue));
            push_cells(&m.cells(), &mut output);
        }

        let mut position = 0;
        let saying_cells = AnswerGlyph::parse(&self.saying.text)
            .into_iter()
            .map(|glyph| match glyph {
                AnswerGlyph::Letter(letter) => {
                    position += 1;
                    AnswerCell::Slot {
                        letter,
                        position: position - 1,
                    }
                }
                AnswerGlyph::Literal(c) => AnswerCell::Literal(c),
            })
            .collect::<Vec<_>>();
        output.push_str("Saying:\n");
        push_cells(&saying_cells, &mut output);

        write!(f, "{}", output)
    }
}
