use std::fs;
use std::path::Path;

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::{FiggeritStore, PoolFilter};
use crate::error::StoreError;
use crate::model::{Figgerit, Riddle, RiddleId, Saying, SayingId};

/// On-disk shape of a pool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolDocument {
    #[serde(default)]
    pub riddles: Vec<Riddle>,
    #[serde(default)]
    pub sayings: Vec<Saying>,
    #[serde(default)]
    pub figgerits: Vec<Figgerit>,
}

/// In-memory pool with seeded sampling. Round-trips through a JSON file.
pub struct MemoryStore {
    riddles: Vec<Riddle>,
    sayings: Vec<Saying>,
    figgerits: Vec<Figgerit>,
    rng: StdRng,
}

impl MemoryStore {
    pub fn with_seed(seed: u64) -> Self {
        Self::from_document(PoolDocument::default(), seed)
    }

    pub fn from_document(document: PoolDocument, seed: u64) -> Self {
        Self {
            riddles: document.riddles,
            sayings: document.sayings,
            figgerits: document.figgerits,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Reads a pool file. A missing file yields an empty pool.
    pub fn load(path: &Path, seed: u64) -> Result<Self, StoreError> {
        if !path.exists() {
            info!(target: "store", "No pool at {}; starting empty", path.display());
            return Ok(Self::with_seed(seed));
        }
        let contents = fs::read_to_string(path)?;
        let document: PoolDocument = serde_json::from_str(&contents)?;
        info!(
            target: "store",
            "Loaded {} riddles, {} sayings, {} figgerits from {}",
            document.riddles.len(),
            document.sayings.len(),
            document.figgerits.len(),
            path.display()
        );
        Ok(Self::from_document(document, seed))
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let contents = serde_json::to_string_pretty(&self.to_document())?;
        fs::write(path, contents)?;
        debug!(target: "store", "Saved pool to {}", path.display());
        Ok(())
    }

    pub fn to_document(&self) -> PoolDocument {
        PoolDocument {
            riddles: self.riddles.clone(),
            sayings: self.sayings.clone(),
            figgerits: self.figgerits.clone(),
        }
    }

    pub fn add_riddle(&mut self, riddle: Riddle) {
        self.riddles.push(riddle);
    }

    pub fn add_saying(&mut self, saying: Saying) {
        self.sayings.push(saying);
    }

    pub fn riddles(&self) -> &[Riddle] {
        &self.riddles
    }

    pub fn sayings(&self) -> &[Saying] {
        &self.sayings
    }

    pub fn figgerits(&self) -> &[Figgerit] {
        &self.figgerits
    }
}

impl FiggeritStore for MemoryStore {
    fn sample_sayings(&mut self, filter: &PoolFilter, n: usize) -> Result<Vec<Saying>, StoreError> {
        let eligible = self
            .sayings
            .iter()
            .filter(|s| filter.admits_saying(s))
            .collect::<Vec<_>>();
        let sample = eligible
            .choose_multiple(&mut self.rng, n)
            .map(|s| (*s).clone())
            .collect::<Vec<_>>();
        trace!(
            target: "store",
            "Sampled {} of {} eligible sayings",
            sample.len(),
            eligible.len()
        );
        Ok(sample)
    }

    fn sample_riddles(&mut self, filter: &PoolFilter, n: usize) -> Result<Vec<Riddle>, StoreError> {
        let eligible = self
            .riddles
            .iter()
            .filter(|r| filter.admits_riddle(r))
            .collect::<Vec<_>>();
        let sample = eligible
            .choose_multiple(&mut self.rng, n)
            .map(|r| (*r).clone())
            .collect::<Vec<_>>();
        trace!(
            target: "store",
            "Sampled {} of {} eligible riddles",
            sample.len(),
            eligible.len()
        );
        Ok(sample)
    }

    fn count_eligible_sayings(&self, filter: &PoolFilter) -> Result<usize, StoreError> {
        Ok(self.sayings.iter().filter(|s| filter.admits_saying(s)).count())
    }

    fn tag_saying(&mut self, id: SayingId, volume: u32) -> Result<(), StoreError> {
        let saying = self
            .sayings
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::NotFound { kind: "saying", id })?;
        if !saying.tag_volume(volume) {
            trace!(target: "store", "Saying {} already in volume {}", id, volume);
        }
        Ok(())
    }

    fn tag_riddle(&mut self, id: RiddleId, volume: u32) -> Result<(), StoreError> {
        let riddle = self
            .riddles
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound { kind: "riddle", id })?;
        if !riddle.tag_volume(volume) {
            trace!(target: "store", "Riddle {} already in volume {}", id, volume);
        }
        Ok(())
    }

    fn persist_figgerit(&mut self, figgerit: &Figgerit) -> Result<(), StoreError> {
        self.figgerits.push(figgerit.clone());
        Ok(())
    }

    fn figgerits_by_volume(&self, volume: u32) -> Result<Vec<Figgerit>, StoreError> {
        Ok(self
            .figgerits
            .iter()
            .filter(|f| f.volume == volume)
            .cloned()
            .collect())
    }
}
