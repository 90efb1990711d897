mod match_attempt_state;
mod matcher;

pub use match_attempt_state::{MatchAttemptState, MatchStats};
pub use matcher::{find_complete_figgerit, match_candidates};
