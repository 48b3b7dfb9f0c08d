use thiserror::Error;

use crate::store::StoreError;

/// Errors that abort a turn.
///
/// A corrupt stored position is not in this list: it is recovered by
/// substituting the starting position.
#[derive(Error, Debug)]
pub enum TurnError {
    /// The move string is not a coordinate move like `e2e4` or `e7e8q`.
    #[error("Invalid move format: {0}")]
    InvalidFormat(String),
    /// The move is well formed but not legal in the current position.
    #[error("Illegal move: {0}")]
    IllegalMove(String),
    /// Reading or writing the persisted state failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl TurnError {
    /// Returns true for errors caused by the submitted move rather than the environment.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, TurnError::InvalidFormat(_) | TurnError::IllegalMove(_))
    }
}
