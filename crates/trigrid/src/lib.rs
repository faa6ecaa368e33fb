//! # Trigrid
//!
//! Turn-based game session service: single- and multi-player tic-tac-toe
//! for authenticated players, with persisted session records and live
//! notification fan-out to subscribers.
//!
//! The member crates split the system by layer — `trigrid-model` (shared
//! types), `trigrid-board` (pure win/draw rules), `trigrid-store` (record
//! storage contract), `trigrid-hub` (publish/subscribe fan-out), and
//! `trigrid-engine` (the session state machine). This crate ties them
//! together behind [`GameService`], the credential-gated surface a
//! transport adapter maps 1:1 onto its queries, mutations, and
//! subscriptions.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use trigrid::prelude::*;
//!
//! # struct MyIdentityProvider;
//! # impl IdentityProvider for MyIdentityProvider {
//! #     async fn resolve(&self, _credential: &str) -> Option<Player> { None }
//! # }
//! # async fn run() -> Result<(), GameError> {
//! let service = GameService::new(
//!     MyIdentityProvider,
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(NotificationHub::default()),
//! );
//!
//! let game = service.create_game("token", GameType::MultiPlayer).await?;
//! let moves = service.subscribe(Topic::MoveMade).await;
//! # Ok(())
//! # }
//! ```

mod service;

pub use service::GameService;

pub mod prelude {
    //! Everything a service embedder usually needs.

    pub use trigrid_board::{WIN_LINES, available_squares, winning_line};
    pub use trigrid_engine::{GameEngine, GameError, IdentityProvider, Matchmaking};
    pub use trigrid_hub::{HubConfig, NotificationHub, Subscription, Topic};
    pub use trigrid_model::{
        GameId, GameSession, GameStatus, GameType, GameWinner, Player, PlayerId,
        Seat, Square,
    };
    pub use trigrid_store::{GameStore, MemoryStore, StoreError};

    pub use crate::GameService;
}
