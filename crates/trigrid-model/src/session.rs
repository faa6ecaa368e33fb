//! The game session record and its supporting enums.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{GameId, PlayerId, Square};

// ---------------------------------------------------------------------------
// Player and Seat
// ---------------------------------------------------------------------------

/// A resolved caller identity, as produced by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// The player's unique id.
    pub id: PlayerId,
    /// Display name shown to opponents.
    pub name: String,
}

/// A player occupying the first or second position of a session.
///
/// Copied from the joining [`Player`] at creation/join time and immutable
/// afterwards, so a session keeps the name its players had when they sat
/// down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    /// The seated player's id.
    pub id: PlayerId,
    /// The seated player's display name.
    pub name: String,
}

impl From<&Player> for Seat {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Session enums
// ---------------------------------------------------------------------------

/// Whether a session is played against another human or against the
/// automated opponent. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameType {
    SinglePlayer,
    MultiPlayer,
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SinglePlayer => write!(f, "single-player"),
            Self::MultiPlayer => write!(f, "multi-player"),
        }
    }
}

/// Lifecycle state of a session.
///
/// `Active` from creation until a terminal condition or an explicit end;
/// `Inactive` is terminal — no further moves, no turn holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Active,
    Inactive,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

/// Outcome of a session.
///
/// `Unknown` while the session is active — and permanently, for sessions
/// ended by a player before any terminal condition. Set at most once;
/// never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameWinner {
    Unknown,
    FirstPlayer,
    SecondPlayer,
    Draw,
}

impl fmt::Display for GameWinner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::FirstPlayer => write!(f, "first player"),
            Self::SecondPlayer => write!(f, "second player"),
            Self::Draw => write!(f, "draw"),
        }
    }
}

// ---------------------------------------------------------------------------
// GameSession
// ---------------------------------------------------------------------------

/// One played instance of the game from creation to termination.
///
/// The record is owned by the store; the engine mutates detached copies
/// and writes them back. Invariants maintained by the engine:
///
/// - `all_moves` is the duplicate-free union of `first_moves` and
///   `second_moves`, in play order, never longer than 9.
/// - `turn` is `None` whenever the session is `Inactive`.
/// - `winner` moves away from `Unknown` at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    /// Opaque unique identifier, assigned at creation.
    pub id: GameId,
    /// Single- or multi-player; fixed at creation.
    pub kind: GameType,
    /// Lifecycle state.
    pub status: GameStatus,
    /// Outcome; `Unknown` while active.
    pub winner: GameWinner,
    /// The creator's seat. Immutable.
    pub first: Seat,
    /// The second seat; `None` until a player joins (multiplayer only).
    /// Stays `None` for the automated opponent in single-player games.
    pub second: Option<Seat>,
    /// Squares played by the first side, in play order. Append-only.
    pub first_moves: Vec<Square>,
    /// Squares played by the second side, in play order. Append-only.
    pub second_moves: Vec<Square>,
    /// Every square played, in play order. Duplicate rejection and
    /// board-exhaustion detection read this.
    pub all_moves: Vec<Square>,
    /// The player permitted to submit the next move; `None` when no turn
    /// is pending.
    pub turn: Option<PlayerId>,
    /// The 3-cell line that produced a win; set only on a win outcome.
    pub winning_line: Option<[Square; 3]>,
    /// Monotonic record version, bumped by the store on every successful
    /// save. The optimistic-concurrency token: a save whose version does
    /// not match the stored record is rejected. 0 for an unsaved session.
    pub version: u64,
}

impl GameSession {
    /// Returns `true` while the session accepts moves.
    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }

    /// Returns `true` once a second player has joined.
    pub fn has_second_player(&self) -> bool {
        self.second.is_some()
    }

    /// Returns `true` if the player occupies either seat.
    pub fn is_participant(&self, player: &PlayerId) -> bool {
        self.first.id == *player
            || self.second.as_ref().is_some_and(|seat| seat.id == *player)
    }
}
