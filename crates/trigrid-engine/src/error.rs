//! The client-facing error taxonomy of the engine layer.

use trigrid_model::{GameId, Square};
use trigrid_store::StoreError;

/// Errors surfaced to callers of engine and matchmaking operations.
///
/// Every variant is client-facing. Only [`GameError::Conflict`] is worth
/// retrying — the caller reloads the session and reissues the operation.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The request credential did not resolve to a player identity.
    #[error("caller is not authenticated")]
    Unauthenticated,

    /// The player already holds an active session, or the operation lost
    /// to a competing writer.
    #[error("conflict: {0}")]
    Conflict(String),

    /// No session exists under the given id.
    #[error("game {0} not found")]
    NotFound(GameId),

    /// The operation is not legal for the session's current state or for
    /// the caller's role in it.
    #[error("invalid game state for this operation: {0}")]
    InvalidState(String),

    /// The square is outside the board or was already played.
    #[error("impossible move: square {0}")]
    InvalidMove(Square),

    /// The backing store failed.
    #[error(transparent)]
    Storage(StoreError),
}

impl GameError {
    /// Returns `true` for errors that may succeed on a client retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

/// A lost version race is a client-retryable conflict; everything else
/// from the store is a storage failure.
impl From<StoreError> for GameError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::VersionConflict { id, .. } => Self::Conflict(format!(
                "game {id} was modified concurrently, reload and retry"
            )),
            other => Self::Storage(other),
        }
    }
}
