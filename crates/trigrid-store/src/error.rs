//! Error types for the store layer.

use trigrid_model::GameId;

/// Errors that can occur when loading or saving game records.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The record changed since it was loaded. The caller holds a stale
    /// copy and must reload before retrying.
    #[error("game {id} version conflict: tried to save {attempted}, store holds {current}")]
    VersionConflict {
        id: GameId,
        attempted: u64,
        current: u64,
    },

    /// The backing storage failed. Fatal to the triggering operation,
    /// not to the process.
    #[error("storage failure: {0}")]
    Backend(String),
}
