//! Set error types.

use thiserror::Error;

use crate::game::GameError;

/// Set errors
#[derive(Debug, Error)]
pub enum SetError {
    /// A game aborted, which ends the whole set
    #[error("game {index} failed: {source}")]
    Game { index: usize, source: GameError },

    /// The configuration can't produce a playable set
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for set operations
pub type SetResult<T> = Result<T, SetError>;
