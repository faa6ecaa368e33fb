//! The credential-gated service surface.
//!
//! Each operation resolves the caller's request credential through the
//! identity provider, gates on the result, and delegates to the engine or
//! matchmaking layer. A transport adapter (HTTP, WebSocket, whatever)
//! maps its endpoints 1:1 onto these methods and forwards hub events to
//! live transport subscriptions per topic.

use std::sync::Arc;

use trigrid_engine::{GameEngine, GameError, IdentityProvider, Matchmaking, authenticated};
use trigrid_hub::{NotificationHub, Subscription, Topic};
use trigrid_model::{GameId, GameSession, GameType, Player, Square};
use trigrid_store::GameStore;

/// The assembled service: identity provider, engine, matchmaking, hub.
///
/// Constructed once at startup with its collaborators passed in
/// explicitly; shared by reference with however many transport handlers
/// the process runs.
pub struct GameService<P, S> {
    provider: P,
    engine: GameEngine<S>,
    matchmaking: Matchmaking<S>,
    hub: Arc<NotificationHub>,
}

impl<P: IdentityProvider, S: GameStore> GameService<P, S> {
    /// Wires the service from its collaborators.
    pub fn new(provider: P, store: Arc<S>, hub: Arc<NotificationHub>) -> Self {
        Self {
            provider,
            engine: GameEngine::new(Arc::clone(&store), Arc::clone(&hub)),
            matchmaking: Matchmaking::new(store),
            hub,
        }
    }

    async fn caller(&self, credential: &str) -> Result<Player, GameError> {
        authenticated(self.provider.resolve(credential).await)
    }

    // -- Mutations --------------------------------------------------------

    /// Creates a game for the caller.
    pub async fn create_game(
        &self,
        credential: &str,
        kind: GameType,
    ) -> Result<GameSession, GameError> {
        let player = self.caller(credential).await?;
        self.engine.create_game(&player, kind).await
    }

    /// Seats the caller as the second player of an open multiplayer game.
    pub async fn join_multi_player_game(
        &self,
        credential: &str,
        game_id: &GameId,
    ) -> Result<GameSession, GameError> {
        let player = self.caller(credential).await?;
        self.engine.join_multi_player_game(&player, game_id).await
    }

    /// Applies the caller's move to their single-player game.
    pub async fn make_move_in_single_player_game(
        &self,
        credential: &str,
        game_id: &GameId,
        square: Square,
    ) -> Result<GameSession, GameError> {
        let player = self.caller(credential).await?;
        self.engine
            .make_move_in_single_player_game(&player, game_id, square)
            .await
    }

    /// Applies the caller's move to a multiplayer game.
    pub async fn make_move_in_multi_player_game(
        &self,
        credential: &str,
        game_id: &GameId,
        square: Square,
    ) -> Result<GameSession, GameError> {
        let player = self.caller(credential).await?;
        self.engine
            .make_move_in_multi_player_game(&player, game_id, square)
            .await
    }

    /// Ends a game the caller takes part in.
    pub async fn end_game(
        &self,
        credential: &str,
        game_id: &GameId,
    ) -> Result<GameSession, GameError> {
        let player = self.caller(credential).await?;
        self.engine.end_game(&player, game_id).await
    }

    // -- Queries ----------------------------------------------------------

    /// Loads one game the caller takes part in.
    pub async fn game(
        &self,
        credential: &str,
        game_id: &GameId,
    ) -> Result<GameSession, GameError> {
        let player = self.caller(credential).await?;
        let game = self.matchmaking.game(game_id).await?;
        if !game.is_participant(&player.id) {
            return Err(GameError::InvalidState(format!(
                "caller is not part of game {game_id}"
            )));
        }
        Ok(game)
    }

    /// The caller's active game, if any.
    pub async fn user_active_game(
        &self,
        credential: &str,
    ) -> Result<Option<GameSession>, GameError> {
        let player = self.caller(credential).await?;
        self.matchmaking.user_active_game(&player.id).await
    }

    /// The caller's finished and abandoned games.
    pub async fn user_inactive_games(
        &self,
        credential: &str,
    ) -> Result<Vec<GameSession>, GameError> {
        let player = self.caller(credential).await?;
        self.matchmaking.user_inactive_games(&player.id).await
    }

    /// Every game the caller has taken part in.
    pub async fn all_user_games(
        &self,
        credential: &str,
    ) -> Result<Vec<GameSession>, GameError> {
        let player = self.caller(credential).await?;
        self.matchmaking.all_user_games(&player.id).await
    }

    /// Multiplayer games the caller could join.
    pub async fn open_multi_player_games(
        &self,
        credential: &str,
    ) -> Result<Vec<GameSession>, GameError> {
        self.caller(credential).await?;
        self.matchmaking.open_multi_player_games().await
    }

    // -- Subscriptions ----------------------------------------------------

    /// Live event stream for one topic.
    ///
    /// Subscriptions carry no credential; they deliver the same session
    /// snapshots the mutations return.
    pub async fn subscribe(&self, topic: Topic) -> Subscription {
        self.hub.subscribe(topic).await
    }
}
