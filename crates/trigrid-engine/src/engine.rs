//! The game session state machine.

use std::sync::Arc;

use trigrid_board::{available_squares, winning_line};
use trigrid_hub::{NotificationHub, Topic};
use trigrid_model::{
    GameId, GameSession, GameStatus, GameType, GameWinner, Player, Seat, Square,
};
use trigrid_store::GameStore;

use crate::GameError;
use crate::matchmaking::active_game;

/// Owns the lifecycle and transition rules of game sessions.
///
/// Every operation is an independent read-modify-write against the store:
/// load, mutate a detached copy, save. The store's version check rejects
/// the slower of two competing writers with a retryable
/// [`GameError::Conflict`] — the engine itself holds no session state
/// between operations.
///
/// State is persisted before the matching event is published; publishing
/// is best-effort and never fails the operation.
pub struct GameEngine<S> {
    store: Arc<S>,
    hub: Arc<NotificationHub>,
}

impl<S: GameStore> GameEngine<S> {
    /// Creates an engine over a shared store and hub.
    pub fn new(store: Arc<S>, hub: Arc<NotificationHub>) -> Self {
        Self { store, hub }
    }

    /// Creates a session for `player`.
    ///
    /// Single-player sessions give the creator the turn immediately;
    /// multiplayer sessions have no turn holder until a second player
    /// joins.
    pub async fn create_game(
        &self,
        player: &Player,
        kind: GameType,
    ) -> Result<GameSession, GameError> {
        self.ensure_not_in_game(player).await?;

        let session = GameSession {
            id: GameId::generate(),
            kind,
            status: GameStatus::Active,
            winner: GameWinner::Unknown,
            first: Seat::from(player),
            second: None,
            first_moves: Vec::new(),
            second_moves: Vec::new(),
            all_moves: Vec::new(),
            turn: (kind == GameType::SinglePlayer).then(|| player.id.clone()),
            winning_line: None,
            version: 0,
        };

        let saved = self.store.save(session).await?;
        tracing::info!(
            game_id = %saved.id,
            player_id = %player.id,
            kind = %saved.kind,
            "game created"
        );
        Ok(saved)
    }

    /// Seats `player` as the second player of an open multiplayer session.
    ///
    /// The first player always opens after a join.
    pub async fn join_multi_player_game(
        &self,
        player: &Player,
        game_id: &GameId,
    ) -> Result<GameSession, GameError> {
        self.ensure_not_in_game(player).await?;

        let mut session = self.load(game_id).await?;
        if session.first.id == player.id
            || session.has_second_player()
            || session.turn.is_some()
            || !session.is_active()
        {
            return Err(GameError::InvalidState(format!(
                "cannot join game {game_id}"
            )));
        }

        session.second = Some(Seat::from(player));
        session.turn = Some(session.first.id.clone());

        let saved = self.store.save(session).await?;
        tracing::info!(
            game_id = %saved.id,
            player_id = %player.id,
            "second player joined"
        );
        self.hub.publish(Topic::PlayerJoined, &saved).await;
        Ok(saved)
    }

    /// Applies a human move to a single-player session, then answers with
    /// the automated opponent's move unless the human move ended the game.
    ///
    /// The automated policy is fixed: the lowest-numbered open square.
    /// When the human move exhausts the board without a win, the session
    /// is drawn and no automated move is attempted.
    pub async fn make_move_in_single_player_game(
        &self,
        player: &Player,
        game_id: &GameId,
        square: Square,
    ) -> Result<GameSession, GameError> {
        let mut session = self.load(game_id).await?;
        if !session.is_active() || session.first.id != player.id {
            return Err(GameError::InvalidState(format!(
                "cannot move in game {game_id}"
            )));
        }
        validate_square(&session, square)?;

        session.first_moves.push(square);
        session.all_moves.push(square);

        if let Some(line) = winning_line(&session.first_moves) {
            finish_won(&mut session, GameWinner::FirstPlayer, line);
            return self.persist_move(session, player).await;
        }

        let open = available_squares(&session.all_moves);
        if open.is_empty() && session.all_moves.len() == 9 {
            finish_drawn(&mut session);
            return self.persist_move(session, player).await;
        }

        let reply = open[0];
        session.second_moves.push(reply);
        session.all_moves.push(reply);
        if let Some(line) = winning_line(&session.second_moves) {
            finish_won(&mut session, GameWinner::SecondPlayer, line);
        }
        self.persist_move(session, player).await
    }

    /// Applies a move by the turn holder of a multiplayer session.
    ///
    /// A winning move terminates the session; otherwise the turn passes
    /// to the opponent. The trailing branch handles a turn holder that
    /// matches neither seat — the only structural state left to decide
    /// there is an exhausted board.
    pub async fn make_move_in_multi_player_game(
        &self,
        player: &Player,
        game_id: &GameId,
        square: Square,
    ) -> Result<GameSession, GameError> {
        let mut session = self.load(game_id).await?;
        if session.turn.as_ref() != Some(&player.id) || !session.is_active() {
            return Err(GameError::InvalidState(format!(
                "cannot move in game {game_id}"
            )));
        }
        validate_square(&session, square)?;

        session.all_moves.push(square);
        let open = available_squares(&session.all_moves);

        if session.first.id == player.id {
            session.first_moves.push(square);
            if let Some(line) = winning_line(&session.first_moves) {
                finish_won(&mut session, GameWinner::FirstPlayer, line);
            } else {
                session.turn = session.second.as_ref().map(|seat| seat.id.clone());
            }
        } else if session
            .second
            .as_ref()
            .is_some_and(|seat| seat.id == player.id)
        {
            session.second_moves.push(square);
            if let Some(line) = winning_line(&session.second_moves) {
                finish_won(&mut session, GameWinner::SecondPlayer, line);
            } else {
                session.turn = Some(session.first.id.clone());
            }
        } else if open.is_empty() && session.all_moves.len() == 9 {
            finish_drawn(&mut session);
        }

        let saved = self.persist_move(session, player).await?;
        self.hub.publish(Topic::MoveMade, &saved).await;
        Ok(saved)
    }

    /// Ends a session on behalf of either seated player.
    ///
    /// The winner is left as it stands: a session abandoned before any
    /// terminal condition keeps `Unknown`.
    pub async fn end_game(
        &self,
        player: &Player,
        game_id: &GameId,
    ) -> Result<GameSession, GameError> {
        let mut session = self.load(game_id).await?;
        if !session.is_active() {
            return Err(GameError::InvalidState(format!(
                "game {game_id} is already ended"
            )));
        }
        if !session.is_participant(&player.id) {
            return Err(GameError::InvalidState(format!(
                "caller is not part of game {game_id}"
            )));
        }

        session.status = GameStatus::Inactive;
        session.turn = None;

        let saved = self.store.save(session).await?;
        tracing::info!(game_id = %saved.id, player_id = %player.id, "game ended");
        if saved.kind == GameType::MultiPlayer {
            self.hub.publish(Topic::GameEnded, &saved).await;
        }
        Ok(saved)
    }

    async fn load(&self, game_id: &GameId) -> Result<GameSession, GameError> {
        self.store
            .load(game_id)
            .await?
            .ok_or_else(|| GameError::NotFound(game_id.clone()))
    }

    async fn ensure_not_in_game(&self, player: &Player) -> Result<(), GameError> {
        if let Some(existing) = active_game(self.store.as_ref(), &player.id).await? {
            return Err(GameError::Conflict(format!(
                "player {} already has active game {}",
                player.id, existing.id
            )));
        }
        Ok(())
    }

    async fn persist_move(
        &self,
        session: GameSession,
        player: &Player,
    ) -> Result<GameSession, GameError> {
        let saved = self.store.save(session).await?;
        tracing::debug!(
            game_id = %saved.id,
            player_id = %player.id,
            moves = saved.all_moves.len(),
            status = %saved.status,
            "move applied"
        );
        Ok(saved)
    }
}

/// Rejects squares outside the board and squares already played.
fn validate_square(session: &GameSession, square: Square) -> Result<(), GameError> {
    if !square.is_valid() || session.all_moves.contains(&square) {
        return Err(GameError::InvalidMove(square));
    }
    Ok(())
}

fn finish_won(session: &mut GameSession, winner: GameWinner, line: [Square; 3]) {
    session.winning_line = Some(line);
    session.winner = winner;
    session.status = GameStatus::Inactive;
    session.turn = None;
}

fn finish_drawn(session: &mut GameSession) {
    session.winner = GameWinner::Draw;
    session.status = GameStatus::Inactive;
    session.turn = None;
}
