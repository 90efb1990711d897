use uuid::Uuid;

/// Progress notifications published by the figgerit generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorEvent {
    RunStarted {
        volume: u32,
        requested: usize,
        max_attempts: usize,
    },
    AttemptStarted {
        attempt: usize,
        saying_id: Uuid,
        n_candidates: usize,
    },
    NoSolution {
        attempt: usize,
        saying_id: Uuid,
    },
    FiggeritCommitted {
        attempt: usize,
        figgerit_id: Uuid,
        produced: usize,
    },
    RunFinished {
        produced: usize,
        requested: usize,
        attempts: usize,
    },
}
