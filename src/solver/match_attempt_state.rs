use std::collections::{BTreeMap, BTreeSet, HashSet};

use log::trace;

use crate::model::{LetterPosition, MatchResult, Riddle, RiddleId};

/// Bookkeeping for one matcher call: which saying slots are still open and
/// which riddles have been accepted so far.
#[derive(Debug, Clone)]
pub struct MatchAttemptState {
    pub saying_length: usize,
    /// letter -> positions in the normalized saying, ascending
    pub positions_by_letter: BTreeMap<char, Vec<usize>>,
    pub consumed_positions: BTreeSet<usize>,
    pub accepted_riddles: HashSet<RiddleId>,
    pub matches: Vec<MatchResult>,
    pub stats: MatchStats,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MatchStats {
    pub n_rejected_foreign_letters: usize,
    pub n_rejected_no_free_slot: usize,
    pub n_rejected_no_letters: usize,
    pub n_rejected_duplicate: usize,
}

impl MatchAttemptState {
    pub fn new(normalized_saying: &str) -> Self {
        let mut positions_by_letter: BTreeMap<char, Vec<usize>> = BTreeMap::new();
        let mut saying_length = 0;
        for (position, letter) in normalized_saying.chars().enumerate() {
            positions_by_letter.entry(letter).or_default().push(position);
            saying_length += 1;
        }

        Self {
            saying_length,
            positions_by_letter,
            consumed_positions: BTreeSet::new(),
            accepted_riddles: HashSet::new(),
            matches: Vec::new(),
            stats: MatchStats::default(),
        }
    }

    pub fn saying_has_letter(&self, letter: char) -> bool {
        self.positions_by_letter.contains_key(&letter)
    }

    pub fn is_fully_covered(&self) -> bool {
        self.consumed_positions.len() == self.saying_length
    }

    /// Binds every letter of `letters` to a free slot holding the same letter,
    /// left to right, taking the lowest free position each time. Returns
    /// `None` without touching any state if one letter has nowhere to go.
    pub fn bind(&self, letters: &str) -> Option<Vec<LetterPosition>> {
        let mut claimed: BTreeSet<usize> = BTreeSet::new();
        let mut letter_positions = Vec::new();

        for letter in letters.chars() {
            let position = self
                .positions_by_letter
                .get(&letter)?
                .iter()
                .copied()
                .find(|p| !self.consumed_positions.contains(p) && !claimed.contains(p))?;
            claimed.insert(position);
            letter_positions.push(LetterPosition::new(letter, position));
        }

        letter_positions.sort_by_key(|lp| lp.position);
        Some(letter_positions)
    }

    /// Consumes the slots in `letter_positions` and records `riddle` as a match.
    pub fn accept(&mut self, riddle: &Riddle, letter_positions: Vec<LetterPosition>) {
        self.consumed_positions
            .extend(letter_positions.iter().map(|lp| lp.position));
        self.accepted_riddles.insert(riddle.id);
        trace!(
            target: "matcher",
            "Accepted {:?}; {}/{} positions used",
            riddle.word,
            self.consumed_positions.len(),
            self.saying_length
        );
        self.matches.push(MatchResult {
            answer: riddle.word.clone(),
            letter_positions,
            riddle: riddle.to_ref(),
        });
    }
}
