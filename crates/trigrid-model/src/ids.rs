//! Identity newtypes.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A unique identifier for a player, as issued by the identity provider.
///
/// Opaque to the core: the engine only compares it for equality and uses
/// it to resolve which seat a caller occupies.
///
/// `#[serde(transparent)]` makes it serialize as the bare string, so a
/// `PlayerId("u-7")` is just `"u-7"` in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a game session. Assigned at creation, immutable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl GameId {
    /// Generates a fresh 32-character hex id (128 bits of entropy).
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let bytes: [u8; 16] = rng.random();
        Self(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the nine fixed cell labels of the 3×3 board.
///
/// The move universe is the labels 1 through 9; anything else is rejected
/// by the engine before it reaches a session record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Square(pub u8);

impl Square {
    /// The lowest cell label.
    pub const MIN: u8 = 1;
    /// The highest cell label.
    pub const MAX: u8 = 9;

    /// Returns `true` if the label belongs to the fixed move universe.
    pub fn is_valid(self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&PlayerId("u-7".into())).unwrap();
        assert_eq!(json, "\"u-7\"");
    }

    #[test]
    fn test_game_id_generate_is_32_hex_chars() {
        let id = GameId::generate();
        assert_eq!(id.0.len(), 32);
        assert!(id.0.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_game_id_generate_is_unique() {
        assert_ne!(GameId::generate(), GameId::generate());
    }

    #[test]
    fn test_square_serializes_as_plain_number() {
        let json = serde_json::to_string(&Square(5)).unwrap();
        assert_eq!(json, "5");

        let sq: Square = serde_json::from_str("5").unwrap();
        assert_eq!(sq, Square(5));
    }

    #[test]
    fn test_square_is_valid_bounds() {
        assert!(Square(1).is_valid());
        assert!(Square(9).is_valid());
        assert!(!Square(0).is_valid());
        assert!(!Square(10).is_valid());
    }
}
