//! Shared data model for Trigrid.
//!
//! Every crate in the workspace speaks these types:
//!
//! - Identity newtypes ([`PlayerId`], [`GameId`], [`Square`])
//! - The resolved caller identity ([`Player`]) and its seated form ([`Seat`])
//! - The [`GameSession`] record that the store persists and the hub
//!   delivers to subscribers
//!
//! This crate holds data and small invariant helpers only — the transition
//! rules live in `trigrid-engine`, the win/draw arithmetic in
//! `trigrid-board`.

mod ids;
mod session;

pub use ids::{GameId, PlayerId, Square};
pub use session::{GameSession, GameStatus, GameType, GameWinner, Player, Seat};
