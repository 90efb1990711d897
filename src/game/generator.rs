use log::{debug, info, trace, warn};

use super::generation_run_state::{GenerationRunState, GeneratorStats};
use super::settings::GeneratorSettings;
use crate::error::{FiggeritError, ValidationError};
use crate::events::EventEmitter;
use crate::model::{Figgerit, GeneratorEvent, Saying, MATCHES_PER_FIGGERIT};
use crate::solver::find_complete_figgerit;
use crate::store::{FiggeritStore, PoolFilter};

/// Fewest riddles a sample may hold and still be worth matching against.
pub const MIN_RIDDLES_PER_SAMPLE: usize = MATCHES_PER_FIGGERIT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub count: usize,
    pub sample_size: usize,
    pub volume: u32,
    pub category: Option<String>,
}

impl GenerationRequest {
    pub fn new(count: usize, sample_size: usize, volume: u32) -> Self {
        Self {
            count,
            sample_size,
            volume,
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.count < 1 {
            return Err(ValidationError::new(
                "count",
                "number of figgerits must be at least 1",
            ));
        }
        if self.volume < 1 {
            return Err(ValidationError::new(
                "volume",
                "volume number must be at least 1",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Complete,
    /// The attempt budget ran out (or the sayings did) with some but not all
    /// figgerits built. The caller decides whether to keep them.
    Partial { message: String },
}

#[readonly::make]
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub figgerits: Vec<Figgerit>,
    pub outcome: GenerationOutcome,
    pub attempts: usize,
    pub stats: GeneratorStats,
}

impl GenerationReport {
    pub fn is_complete(&self) -> bool {
        self.outcome == GenerationOutcome::Complete
    }
}

pub struct FiggeritGenerator {
    attempts_per_figgerit: usize,
    events: Option<EventEmitter<GeneratorEvent>>,
}

impl Default for FiggeritGenerator {
    fn default() -> Self {
        Self::new(&GeneratorSettings::default())
    }
}

impl FiggeritGenerator {
    pub fn new(settings: &GeneratorSettings) -> Self {
        Self {
            attempts_per_figgerit: settings.attempts_per_figgerit.max(1),
            events: None,
        }
    }

    pub fn with_events(mut self, emitter: EventEmitter<GeneratorEvent>) -> Self {
        self.events = Some(emitter);
        self
    }

    fn emit(&self, event: GeneratorEvent) {
        if let Some(events) = &self.events {
            events.emit(&event);
        }
    }

    /// Builds up to `request.count` figgerits for `request.volume`, tagging
    /// every saying and riddle it consumes with that volume.
    pub fn create_figgerits<S: FiggeritStore + ?Sized>(
        &self,
        store: &mut S,
        request: &GenerationRequest,
    ) -> Result<GenerationReport, FiggeritError> {
        request.validate()?;
        let filter = PoolFilter::new(request.volume, request.category.as_deref());

        if store.count_eligible_sayings(&filter)? == 0 {
            return Err(FiggeritError::PoolExhausted {
                reason: format!("no unused sayings found for volume {}", request.volume),
            });
        }
        let initial_riddles = store.sample_riddles(&filter, request.sample_size)?;
        if initial_riddles.len() < MIN_RIDDLES_PER_SAMPLE {
            return Err(FiggeritError::PoolExhausted {
                reason: format!(
                    "only {} unused riddles available for volume {}, need at least {}",
                    initial_riddles.len(),
                    request.volume,
                    MIN_RIDDLES_PER_SAMPLE
                ),
            });
        }

        let max_attempts = request.count.saturating_mul(self.attempts_per_figgerit);
        let mut state = GenerationRunState::default();
        info!(
            target: "generator",
            "Generating {} figgerits for volume {} (category {:?}, up to {} attempts)",
            request.count,
            request.volume,
            request.category,
            max_attempts
        );
        self.emit(GeneratorEvent::RunStarted {
            volume: request.volume,
            requested: request.count,
            max_attempts,
        });

        while state.produced() < request.count && state.stats.n_attempts < max_attempts {
            state.stats.n_attempts += 1;
            let attempt = state.stats.n_attempts;
            trace!(target: "generator", "Attempt {}/{}", attempt, max_attempts);

            let Some(saying) = store.sample_sayings(&filter, 1)?.into_iter().next() else {
                info!(
                    target: "generator",
                    "No unused sayings left after {} attempts; stopping",
                    attempt
                );
                break;
            };

            let candidates =
                state.filter_unused(store.sample_riddles(&filter, request.sample_size)?);
            if candidates.len() < MIN_RIDDLES_PER_SAMPLE {
                let unfulfilled = request.count - state.produced();
                warn!(
                    target: "generator",
                    "Only {} unused riddles left on attempt {}; {} figgerits unfulfilled",
                    candidates.len(),
                    attempt,
                    unfulfilled
                );
                return Err(FiggeritError::MidRunInsufficientRiddles {
                    committed: state.figgerits,
                    unfulfilled,
                    available: candidates.len(),
                });
            }

            self.emit(GeneratorEvent::AttemptStarted {
                attempt,
                saying_id: saying.id,
                n_candidates: candidates.len(),
            });

            match find_complete_figgerit(&candidates, &saying.text) {
                Some(matches) => {
                    let figgerit = Figgerit::new(request.volume, &saying, matches)?;
                    if let Err(e) =
                        self.commit(store, request.volume, &saying, figgerit, &mut state)
                    {
                        warn!(
                            target: "generator",
                            "Store failed on attempt {}; figgerits already committed this run: {:?}",
                            attempt,
                            state.figgerits.iter().map(|f| f.id).collect::<Vec<_>>()
                        );
                        return Err(e);
                    }
                    self.emit(GeneratorEvent::FiggeritCommitted {
                        attempt,
                        figgerit_id: state.figgerits[state.produced() - 1].id,
                        produced: state.produced(),
                    });
                }
                None => {
                    state.stats.n_no_solution += 1;
                    trace!(
                        target: "generator",
                        "No solution for {:?} on attempt {}",
                        saying.text,
                        attempt
                    );
                    self.emit(GeneratorEvent::NoSolution {
                        attempt,
                        saying_id: saying.id,
                    });
                }
            }
        }

        self.emit(GeneratorEvent::RunFinished {
            produced: state.produced(),
            requested: request.count,
            attempts: state.stats.n_attempts,
        });
        info!(
            target: "generator",
            "Generation done; built {} of {} figgerits. Stats: {:?}",
            state.produced(),
            request.count,
            state.stats
        );

        finish(state, request)
    }

    fn commit<S: FiggeritStore + ?Sized>(
        &self,
        store: &mut S,
        volume: u32,
        saying: &Saying,
        figgerit: Figgerit,
        state: &mut GenerationRunState,
    ) -> Result<(), FiggeritError> {
        // tags first: a figgerit is only persisted once all its resources are retired
        store.tag_saying(saying.id, volume)?;
        for riddle_id in figgerit.riddle_ids() {
            store.tag_riddle(riddle_id, volume)?;
        }
        store.persist_figgerit(&figgerit)?;
        debug!(
            target: "generator",
            "Committed figgerit {} for {:?}",
            figgerit.id,
            saying.text
        );
        state.commit(figgerit);
        Ok(())
    }
}

fn finish(
    state: GenerationRunState,
    request: &GenerationRequest,
) -> Result<GenerationReport, FiggeritError> {
    let produced = state.produced();
    let attempts = state.stats.n_attempts;
    if produced == 0 {
        return Err(FiggeritError::NoFiggeritsCreated { attempts });
    }

    let outcome = if produced < request.count {
        GenerationOutcome::Partial {
            message: format!(
                "Could only create {} of {} requested figgerits",
                produced, request.count
            ),
        }
    } else {
        GenerationOutcome::Complete
    };

    Ok(GenerationReport {
        figgerits: state.figgerits,
        outcome,
        attempts,
        stats: state.stats,
    })
}

/// Runs a generation with default settings and no event listeners.
pub fn create_figgerits<S: FiggeritStore + ?Sized>(
    store: &mut S,
    request: &GenerationRequest,
) -> Result<GenerationReport, FiggeritError> {
    FiggeritGenerator::default().create_figgerits(store, request)
}

/// Reads back the figgerits published in `volume`.
pub fn get_figgerits_by_volume<S: FiggeritStore + ?Sized>(
    store: &S,
    volume: u32,
) -> Result<Vec<Figgerit>, FiggeritError> {
    if volume < 1 {
        return Err(ValidationError::new("volume", "volume number must be at least 1").into());
    }
    let figgerits = store.figgerits_by_volume(volume)?;
    if figgerits.is_empty() {
        return Err(FiggeritError::NoFiggeritsForVolume { volume });
    }
    Ok(figgerits)
}
