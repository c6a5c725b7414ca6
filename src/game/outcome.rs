//! Winner Resolution
//!
//! Maps two revealed moves to an outcome. Pure and total over validated moves.

use serde::{Deserialize, Serialize};

use crate::game::moves::Move;

/// Outcome of a game.
///
/// `None` until the game completes; discriminants are the external wire values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Winner {
    /// Game not resolved yet.
    #[default]
    None = 0,
    /// Player 1 won.
    Player1 = 1,
    /// Player 2 won.
    Player2 = 2,
    /// Both played the same move.
    Draw = 3,
}

impl Winner {
    /// Wire value.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Get winner from wire value (0-3).
    pub fn from_u8(value: u8) -> Option<Winner> {
        match value {
            0 => Some(Winner::None),
            1 => Some(Winner::Player1),
            2 => Some(Winner::Player2),
            3 => Some(Winner::Draw),
            _ => None,
        }
    }

    /// Same outcome seen with the seats exchanged.
    pub fn swap(self) -> Winner {
        match self {
            Winner::Player1 => Winner::Player2,
            Winner::Player2 => Winner::Player1,
            other => other,
        }
    }

    /// Has an outcome been decided?
    pub fn is_decided(self) -> bool {
        self != Winner::None
    }
}

/// Resolve a game from player 1's and player 2's moves.
///
/// - equal moves: `Draw`
/// - `(move1 + 1) % 3 == move2`: player 2's move beats player 1's
/// - `(move2 + 1) % 3 == move1`: player 1's move beats player 2's
pub fn resolve(move1: Move, move2: Move) -> Winner {
    let (a, b) = (move1.as_u8(), move2.as_u8());

    if a == b {
        Winner::Draw
    } else if (a + 1) % 3 == b {
        Winner::Player2
    } else {
        debug_assert_eq!((b + 1) % 3, a);
        Winner::Player1
    }
}
