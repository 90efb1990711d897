pub mod error;
pub mod events;
pub mod game;
pub mod helpers;
pub mod model;
pub mod solver;
pub mod store;

pub use error::{FiggeritError, StoreError, ValidationError};
pub use game::{
    create_figgerits, get_figgerits_by_volume, FiggeritGenerator, GenerationOutcome,
    GenerationReport, GenerationRequest, GeneratorSettings,
};
pub use model::{Figgerit, LetterPosition, MatchResult, Riddle, Saying};
pub use solver::find_complete_figgerit;
pub use store::{FiggeritStore, MemoryStore, PoolFilter};
