//! Read-only queries over the game record store.

use std::sync::Arc;

use trigrid_model::{GameId, GameSession, GameStatus, PlayerId};
use trigrid_store::{GameStore, StoreError};

use crate::GameError;

/// Lists joinable sessions and a player's own sessions.
///
/// A thin query layer: no mutation, no failure modes beyond store errors.
/// Shares the one-active-session-per-player invariant with the engine,
/// which is what makes [`user_active_game`](Self::user_active_game) a
/// scalar lookup.
pub struct Matchmaking<S> {
    store: Arc<S>,
}

impl<S: GameStore> Matchmaking<S> {
    /// Creates the query layer over a shared store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Loads one session by id.
    pub async fn game(&self, id: &GameId) -> Result<GameSession, GameError> {
        self.store
            .load(id)
            .await?
            .ok_or_else(|| GameError::NotFound(id.clone()))
    }

    /// The player's current active session, if any. At most one exists.
    pub async fn user_active_game(
        &self,
        player: &PlayerId,
    ) -> Result<Option<GameSession>, GameError> {
        Ok(active_game(self.store.as_ref(), player).await?)
    }

    /// The player's finished and abandoned sessions.
    pub async fn user_inactive_games(
        &self,
        player: &PlayerId,
    ) -> Result<Vec<GameSession>, GameError> {
        let mut games = self.store.find_by_player(player).await?;
        games.retain(|g| g.status == GameStatus::Inactive);
        Ok(games)
    }

    /// Every session the player has taken part in, any status.
    pub async fn all_user_games(
        &self,
        player: &PlayerId,
    ) -> Result<Vec<GameSession>, GameError> {
        Ok(self.store.find_by_player(player).await?)
    }

    /// Active multiplayer sessions with an open second seat.
    pub async fn open_multi_player_games(
        &self,
    ) -> Result<Vec<GameSession>, GameError> {
        Ok(self.store.find_open_multi_player().await?)
    }
}

/// The player's active session, if any.
///
/// The engine uses this for its busy-player checks; the ≤1 invariant makes
/// the first match the only match.
pub(crate) async fn active_game<S: GameStore>(
    store: &S,
    player: &PlayerId,
) -> Result<Option<GameSession>, StoreError> {
    let games = store.find_by_player(player).await?;
    Ok(games.into_iter().find(|g| g.is_active()))
}
