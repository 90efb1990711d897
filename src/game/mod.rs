mod generation_run_state;
pub mod generator;
pub mod settings;

pub use generation_run_state::GeneratorStats;
pub use generator::{
    create_figgerits, get_figgerits_by_volume, FiggeritGenerator, GenerationOutcome,
    GenerationReport, GenerationRequest, MIN_RIDDLES_PER_SAMPLE,
};
pub use settings::GeneratorSettings;
