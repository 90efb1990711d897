mod figgerit;
mod generator_event;
mod glyph;
mod match_result;
mod riddle;
mod saying;

pub use figgerit::{verify_exact_cover, Figgerit, MATCHES_PER_FIGGERIT};
pub use generator_event::GeneratorEvent;
pub use glyph::AnswerGlyph;
pub use match_result::{AnswerCell, LetterPosition, MatchResult};
pub use riddle::{Riddle, RiddleId, RiddleRef, MAX_CLUE_LENGTH, MAX_WORD_TOKEN_LENGTH};
pub use saying::{Saying, SayingId, SayingRef, MAX_SAYING_LETTERS};
