//! The storage contract the engine depends on.

use std::future::Future;

use trigrid_model::{GameId, GameSession, PlayerId};

use crate::StoreError;

/// Durable storage for [`GameSession`] records.
///
/// Implementations are full-record stores: `save` overwrites the whole
/// session. Competing writers are arbitrated through the record's
/// `version` field — `save` accepts a session only when its version
/// matches the stored record (0 for a fresh insert), bumps it, and
/// returns the stored copy. A caller that loses the race gets
/// [`StoreError::VersionConflict`] and must reload.
///
/// Sessions are never deleted: inactive records stay queryable for the
/// matchmaking history views.
pub trait GameStore: Send + Sync + 'static {
    /// Loads a session by id. `Ok(None)` when no such record exists.
    fn load(
        &self,
        id: &GameId,
    ) -> impl Future<Output = Result<Option<GameSession>, StoreError>> + Send;

    /// Writes a full session record, guarded by the version check.
    ///
    /// Returns the stored copy, whose version has been bumped.
    fn save(
        &self,
        session: GameSession,
    ) -> impl Future<Output = Result<GameSession, StoreError>> + Send;

    /// Every session in which the player occupies either seat.
    fn find_by_player(
        &self,
        player: &PlayerId,
    ) -> impl Future<Output = Result<Vec<GameSession>, StoreError>> + Send;

    /// Active multiplayer sessions that still have an open second seat.
    fn find_open_multi_player(
        &self,
    ) -> impl Future<Output = Result<Vec<GameSession>, StoreError>> + Send;
}
