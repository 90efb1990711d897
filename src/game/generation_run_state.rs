use std::collections::HashSet;

use log::trace;

use crate::model::{Figgerit, Riddle, RiddleId};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GeneratorStats {
    pub n_attempts: usize,
    pub n_no_solution: usize,
    pub n_committed: usize,
    /// Sampled riddles dropped because this run already used them.
    pub n_riddles_already_used: usize,
}

/// State private to one `create_figgerits` call.
#[derive(Debug, Default)]
pub(crate) struct GenerationRunState {
    pub used_riddle_ids: HashSet<RiddleId>,
    pub figgerits: Vec<Figgerit>,
    pub stats: GeneratorStats,
}

impl GenerationRunState {
    /// Drops riddles that an earlier figgerit of this run already took.
    pub fn filter_unused(&mut self, riddles: Vec<Riddle>) -> Vec<Riddle> {
        let before = riddles.len();
        let unused = riddles
            .into_iter()
            .filter(|r| !self.used_riddle_ids.contains(&r.id))
            .collect::<Vec<_>>();
        let dropped = before - unused.len();
        if dropped > 0 {
            trace!(
                target: "generator",
                "Dropped {} riddles already used this run",
                dropped
            );
        }
        self.stats.n_riddles_already_used += dropped;
        unused
    }

    pub fn commit(&mut self, figgerit: Figgerit) {
        self.used_riddle_ids.extend(figgerit.riddle_ids());
        self.stats.n_committed += 1;
        self.figgerits.push(figgerit);
    }

    pub fn produced(&self) -> usize {
        self.figgerits.len()
    }
}
