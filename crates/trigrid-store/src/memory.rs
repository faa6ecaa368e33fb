//! In-memory store, the process-local reference implementation.

use std::collections::HashMap;

use tokio::sync::Mutex;
use trigrid_model::{GameId, GameSession, GameType, PlayerId};

use crate::{GameStore, StoreError};

/// A [`GameStore`] backed by a lock-protected map.
///
/// Good for tests, demos, and single-process deployments. The version
/// check in [`save`](GameStore::save) holds under concurrent engine
/// operations because the compare and the overwrite happen under one
/// lock acquisition.
#[derive(Default)]
pub struct MemoryStore {
    games: Mutex<HashMap<GameId, GameSession>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held (any status).
    pub async fn len(&self) -> usize {
        self.games.lock().await.len()
    }

    /// Returns `true` if the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.games.lock().await.is_empty()
    }
}

impl GameStore for MemoryStore {
    async fn load(&self, id: &GameId) -> Result<Option<GameSession>, StoreError> {
        Ok(self.games.lock().await.get(id).cloned())
    }

    async fn save(&self, mut session: GameSession) -> Result<GameSession, StoreError> {
        let mut games = self.games.lock().await;

        let current = games.get(&session.id).map_or(0, |g| g.version);
        if session.version != current {
            tracing::debug!(
                game_id = %session.id,
                attempted = session.version,
                current,
                "save rejected, stale version"
            );
            return Err(StoreError::VersionConflict {
                id: session.id.clone(),
                attempted: session.version,
                current,
            });
        }

        session.version += 1;
        games.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    async fn find_by_player(
        &self,
        player: &PlayerId,
    ) -> Result<Vec<GameSession>, StoreError> {
        let games = self.games.lock().await;
        Ok(games
            .values()
            .filter(|g| g.is_participant(player))
            .cloned()
            .collect())
    }

    async fn find_open_multi_player(&self) -> Result<Vec<GameSession>, StoreError> {
        let games = self.games.lock().await;
        Ok(games
            .values()
            .filter(|g| {
                g.kind == GameType::MultiPlayer && g.is_active() && !g.has_second_player()
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trigrid_model::{GameStatus, GameWinner, Seat};

    fn pid(id: &str) -> PlayerId {
        PlayerId(id.into())
    }

    fn session(id: &str, kind: GameType, first: &str) -> GameSession {
        GameSession {
            id: GameId(id.into()),
            kind,
            status: GameStatus::Active,
            winner: GameWinner::Unknown,
            first: Seat {
                id: pid(first),
                name: first.to_uppercase(),
            },
            second: None,
            first_moves: Vec::new(),
            second_moves: Vec::new(),
            all_moves: Vec::new(),
            turn: None,
            winning_line: None,
            version: 0,
        }
    }

    #[tokio::test]
    async fn test_save_fresh_record_bumps_version_to_one() {
        let store = MemoryStore::new();

        let saved = store
            .save(session("g-1", GameType::MultiPlayer, "alice"))
            .await
            .unwrap();

        assert_eq!(saved.version, 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_save_loaded_copy_succeeds_and_bumps_again() {
        let store = MemoryStore::new();
        store
            .save(session("g-1", GameType::MultiPlayer, "alice"))
            .await
            .unwrap();

        let mut loaded = store.load(&GameId("g-1".into())).await.unwrap().unwrap();
        loaded.status = GameStatus::Inactive;
        let saved = store.save(loaded).await.unwrap();

        assert_eq!(saved.version, 2);
        assert_eq!(saved.status, GameStatus::Inactive);
    }

    #[tokio::test]
    async fn test_save_stale_version_fails_conflict() {
        let store = MemoryStore::new();
        store
            .save(session("g-1", GameType::MultiPlayer, "alice"))
            .await
            .unwrap();

        // Two readers load the same version; the first writer wins.
        let copy_a = store.load(&GameId("g-1".into())).await.unwrap().unwrap();
        let copy_b = store.load(&GameId("g-1".into())).await.unwrap().unwrap();

        store.save(copy_a).await.unwrap();
        let result = store.save(copy_b).await;

        assert!(matches!(
            result,
            Err(StoreError::VersionConflict {
                attempted: 1,
                current: 2,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_save_stale_version_leaves_record_untouched() {
        let store = MemoryStore::new();
        store
            .save(session("g-1", GameType::MultiPlayer, "alice"))
            .await
            .unwrap();

        let winner_copy = store.load(&GameId("g-1".into())).await.unwrap().unwrap();
        let mut loser_copy = winner_copy.clone();
        loser_copy.status = GameStatus::Inactive;

        store.save(winner_copy).await.unwrap();
        let _ = store.save(loser_copy).await;

        let stored = store.load(&GameId("g-1".into())).await.unwrap().unwrap();
        assert_eq!(stored.status, GameStatus::Active);
        assert_eq!(stored.version, 2);
    }

    #[tokio::test]
    async fn test_load_unknown_id_returns_none() {
        let store = MemoryStore::new();
        assert!(store.load(&GameId("nope".into())).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_player_matches_either_seat() {
        let store = MemoryStore::new();
        let mut g1 = session("g-1", GameType::MultiPlayer, "alice");
        g1.second = Some(Seat {
            id: pid("bob"),
            name: "BOB".into(),
        });
        store.save(g1).await.unwrap();
        store
            .save(session("g-2", GameType::SinglePlayer, "bob"))
            .await
            .unwrap();
        store
            .save(session("g-3", GameType::SinglePlayer, "carol"))
            .await
            .unwrap();

        let bobs = store.find_by_player(&pid("bob")).await.unwrap();
        assert_eq!(bobs.len(), 2);

        let carols = store.find_by_player(&pid("carol")).await.unwrap();
        assert_eq!(carols.len(), 1);
    }

    #[tokio::test]
    async fn test_find_open_multi_player_filters_seated_and_inactive() {
        let store = MemoryStore::new();
        // Open multiplayer session: should be listed.
        store
            .save(session("open", GameType::MultiPlayer, "alice"))
            .await
            .unwrap();
        // Seated second player: not joinable.
        let mut seated = session("seated", GameType::MultiPlayer, "bob");
        seated.second = Some(Seat {
            id: pid("carol"),
            name: "CAROL".into(),
        });
        store.save(seated).await.unwrap();
        // Inactive multiplayer session: not joinable.
        let mut done = session("done", GameType::MultiPlayer, "dave");
        done.status = GameStatus::Inactive;
        store.save(done).await.unwrap();
        // Single-player session: never joinable.
        store
            .save(session("solo", GameType::SinglePlayer, "erin"))
            .await
            .unwrap();

        let open = store.find_open_multi_player().await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, GameId("open".into()));
    }
}
