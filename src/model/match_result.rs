use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{AnswerGlyph, RiddleRef};

/// Binds one letter of an answer to a letter slot of the normalized saying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LetterPosition {
    pub letter: char,
    /// Zero-based index into the normalized saying.
    pub position: usize,
}

impl LetterPosition {
    pub fn new(letter: char, position: usize) -> Self {
        Self { letter, position }
    }
}

/// One riddle's share of a solved figgerit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub answer: String,
    /// Sorted ascending by position.
    pub letter_positions: Vec<LetterPosition>,
    pub riddle: RiddleRef,
}

/// What a renderer prints for one glyph of an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerCell {
    /// A blank to fill in, numbered with its saying position.
    Slot { letter: char, position: usize },
    Literal(char),
}

impl MatchResult {
    pub fn glyphs(&self) -> Vec<AnswerGlyph> {
        AnswerGlyph::parse(&self.answer)
    }

    /// Lays the answer out glyph by glyph. The k-th occurrence of a letter in
    /// the answer takes the k-th (ascending) position holding that letter.
    pub fn cells(&self) -> Vec<AnswerCell> {
        let mut positions_by_letter: HashMap<char, Vec<usize>> = HashMap::new();
        for lp in self.letter_positions.iter().rev() {
            positions_by_letter
                .entry(lp.letter)
                .or_default()
                .push(lp.position);
        }

        self.glyphs()
            .into_iter()
            .filter_map(|glyph| match glyph {
                AnswerGlyph::Literal(c) => Some(AnswerCell::Literal(c)),
                AnswerGlyph::Letter(letter) => positions_by_letter
                    .get_mut(&letter)
                    .and_then(|positions| positions.pop())
                    .map(|position| AnswerCell::Slot { letter, position }),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn match_result(answer: &str, letter_positions: Vec<LetterPosition>) -> MatchResult {
        MatchResult {
            answer: answer.to_string(),
            letter_positions,
            riddle: RiddleRef {
                id: Uuid::new_v4(),
                clue: "clue".to_string(),
                word: answer.to_string(),
            },
        }
    }

    #[test]
    fn test_cells_follow_answer_order() {
        // "TO-TO" bound against a saying where T sits at 1 and 4, O at 0 and 7.
        let result = match_result(
            "to-to",
            vec![
                LetterPosition::new('O', 0),
                LetterPosition::new('T', 1),
                LetterPosition::new('T', 4),
                LetterPosition::new('O', 7),
            ],
        );

        assert_eq!(
            result.cells(),
            vec![
                AnswerCell::Slot { letter: 'T', position: 1 },
                AnswerCell::Slot { letter: 'O', position: 0 },
                AnswerCell::Literal('-'),
                AnswerCell::Slot { letter: 'T', position: 4 },
                AnswerCell::Slot { letter: 'O', position: 7 },
            ]
        );
    }
}
