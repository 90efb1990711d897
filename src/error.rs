use thiserror::Error;
use uuid::Uuid;

use crate::model::Figgerit;

/// A request parameter or a riddle/saying field that breaks its rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Failures of the pool collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Uuid },
}

#[derive(Debug, Error)]
pub enum FiggeritError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Detected before the first attempt; nothing was matched or written.
    #[error("pool exhausted: {reason}")]
    PoolExhausted { reason: String },

    /// The per-run used set left fewer riddles than a figgerit needs.
    /// `committed` figgerits stay persisted and tagged.
    #[error(
        "ran out of unused riddles mid-run: {available} left in sample, \
         {unfulfilled} figgerit(s) unfulfilled"
    )]
    MidRunInsufficientRiddles {
        committed: Vec<Figgerit>,
        unfulfilled: usize,
        available: usize,
    },

    #[error("could not create any valid figgerits after {attempts} attempts")]
    NoFiggeritsCreated { attempts: usize },

    #[error("no figgerits found for volume {volume}")]
    NoFiggeritsForVolume { volume: u32 },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
