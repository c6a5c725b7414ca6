//! Moves
//!
//! The three hands, with their wire values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::error::GameError;

/// A Rock-Paper-Scissors hand.
///
/// Discriminants are the committed byte values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Move {
    /// Beats Scissors.
    Rock = 0,
    /// Beats Rock.
    Paper = 1,
    /// Beats Paper.
    Scissors = 2,
}

impl Move {
    /// All moves in wire order.
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Wire value.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Get move from wire value (0-2).
    pub fn from_u8(value: u8) -> Option<Move> {
        match value {
            0 => Some(Move::Rock),
            1 => Some(Move::Paper),
            2 => Some(Move::Scissors),
            _ => None,
        }
    }

    /// The move this one beats.
    pub fn beats_move(self) -> Move {
        match self {
            Move::Rock => Move::Scissors,
            Move::Paper => Move::Rock,
            Move::Scissors => Move::Paper,
        }
    }

    /// Check if this move beats another.
    #[inline]
    pub fn beats(self, other: Move) -> bool {
        self.beats_move() == other
    }
}

impl TryFrom<u8> for Move {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Move::from_u8(value).ok_or(GameError::InvalidMove(value))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values() {
        assert_eq!(Move::Rock.as_u8(), 0);
        assert_eq!(Move::Paper.as_u8(), 1);
        assert_eq!(Move::Scissors.as_u8(), 2);
        for m in Move::ALL {
            assert_eq!(Move::from_u8(m.as_u8()), Some(m));
        }
    }

    #[test]
    fn test_out_of_range_is_invalid() {
        assert_eq!(Move::try_from(3), Err(GameError::InvalidMove(3)));
        assert_eq!(Move::try_from(255), Err(GameError::InvalidMove(255)));
        assert_eq!(Move::try_from(1), Ok(Move::Paper));
    }

    #[test]
    fn test_each_move_beats_exactly_one() {
        for m in Move::ALL {
            let beaten: Vec<Move> = Move::ALL.into_iter().filter(|o| m.beats(*o)).collect();
            assert_eq!(beaten.len(), 1);
            assert!(!m.beats(m));
        }
        assert!(Move::Rock.beats(Move::Scissors));
        assert!(Move::Paper.beats(Move::Rock));
        assert!(Move::Scissors.beats(Move::Paper));
    }
}
