use itertools::Itertools;
use log::{debug, trace};

use super::match_attempt_state::MatchAttemptState;
use crate::helpers::normalize;
use crate::model::{MatchResult, Riddle, MATCHES_PER_FIGGERIT};

/// Scans `candidates` in order and greedily accepts every riddle whose
/// letters can all be bound to open slots of `saying`, stopping at seven.
/// Returns the state as left by the scan, whether or not it is a full cover.
pub fn match_candidates(candidates: &[Riddle], saying: &str) -> MatchAttemptState {
    let normalized_saying = normalize(saying);
    let mut state = MatchAttemptState::new(&normalized_saying);

    trace!(
        target: "matcher",
        "Processing saying {:?} (normalized {:?}, {} letters)",
        saying,
        normalized_saying,
        state.saying_length
    );

    for riddle in candidates {
        if state.matches.len() >= MATCHES_PER_FIGGERIT {
            break;
        }
        if state.accepted_riddles.contains(&riddle.id) {
            state.stats.n_rejected_duplicate += 1;
            continue;
        }

        let answer = riddle.normalized_word();
        if answer.is_empty() {
            state.stats.n_rejected_no_letters += 1;
            continue;
        }
        if !answer.chars().all(|c| state.saying_has_letter(c)) {
            state.stats.n_rejected_foreign_letters += 1;
            continue;
        }

        match state.bind(&answer) {
            Some(letter_positions) => state.accept(riddle, letter_positions),
            None => {
                state.stats.n_rejected_no_free_slot += 1;
                trace!(
                    target: "matcher",
                    "No free slot for every letter of {:?}",
                    riddle.word
                );
            }
        }
    }

    state
}

/// Finds seven riddles among `candidates` whose letters exactly cover the
/// letters of `saying`, or `None`.
pub fn find_complete_figgerit(candidates: &[Riddle], saying: &str) -> Option<Vec<MatchResult>> {
    let state = match_candidates(candidates, saying);

    let complete = state.matches.len() == MATCHES_PER_FIGGERIT
        && state.saying_length > 0
        && state.is_fully_covered();

    debug!(
        target: "matcher",
        "{} for {:?}: {} matches [{}], {}/{} positions; stats {:?}",
        if complete { "Found solution" } else { "No solution" },
        saying,
        state.matches.len(),
        state.matches.iter().map(|m| m.answer.as_str()).join(", "),
        state.consumed_positions.len(),
        state.saying_length,
        state.stats
    );

    if complete {
        Some(state.matches)
    } else {
        None
    }
}
