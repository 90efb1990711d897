mod memory_store;

pub use memory_store::{MemoryStore, PoolDocument};

use std::collections::BTreeSet;

use crate::error::StoreError;
use crate::model::{Figgerit, Riddle, RiddleId, Saying, SayingId};

/// Which riddles and sayings a generation run may draw from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolFilter {
    /// Resources already published in this volume are not eligible.
    pub exclude_volume: u32,
    pub category: Option<String>,
}

impl PoolFilter {
    pub fn new(exclude_volume: u32, category: Option<&str>) -> Self {
        Self {
            exclude_volume,
            category: category.map(str::to_string),
        }
    }

    pub fn admits(&self, volumes: &BTreeSet<u32>, category: Option<&str>) -> bool {
        if volumes.contains(&self.exclude_volume) {
            return false;
        }
        match &self.category {
            Some(wanted) => category == Some(wanted.as_str()),
            None => true,
        }
    }

    pub fn admits_riddle(&self, riddle: &Riddle) -> bool {
        self.admits(&riddle.volumes, riddle.category.as_deref())
    }

    pub fn admits_saying(&self, saying: &Saying) -> bool {
        self.admits(&saying.volumes, saying.category.as_deref())
    }
}

/// The riddle/saying pool and figgerit sink the generator works against.
/// Every call may fail independently of the matching logic.
pub trait FiggeritStore {
    /// Up to `n` distinct eligible sayings in random order.
    fn sample_sayings(&mut self, filter: &PoolFilter, n: usize) -> Result<Vec<Saying>, StoreError>;

    /// Up to `n` distinct eligible riddles in random order.
    fn sample_riddles(&mut self, filter: &PoolFilter, n: usize) -> Result<Vec<Riddle>, StoreError>;

    fn count_eligible_sayings(&self, filter: &PoolFilter) -> Result<usize, StoreError>;

    /// Adds `volume` to the saying's volumes; a no-op if already present.
    fn tag_saying(&mut self, id: SayingId, volume: u32) -> Result<(), StoreError>;

    /// Adds `volume` to the riddle's volumes; a no-op if already present.
    fn tag_riddle(&mut self, id: RiddleId, volume: u32) -> Result<(), StoreError>;

    fn persist_figgerit(&mut self, figgerit: &Figgerit) -> Result<(), StoreError>;

    fn figgerits_by_volume(&self, volume: u32) -> Result<Vec<Figgerit>, StoreError>;
}
