//! Game State
//!
//! The per-match record held by the registry, plus the status enums that
//! describe where a match is in its lifecycle.
//!
//! Every player-written field is a write-once [`Slot`]; nothing relies on an
//! all-zero sentinel, so an all-zero salt or commitment is an ordinary value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::address::Address;
use crate::core::hash::{Digest32, RecordHasher};
use crate::game::moves::Move;
use crate::game::outcome::{resolve, Winner};
use crate::proof::commitment::{Commitment, CommitmentVerifier, Salt};

/// Game identifier. Sequential from 0, never reused.
pub type GameId = u64;

// =============================================================================
// STATUS
// =============================================================================

/// Externally observed game status.
///
/// Discriminants are the wire ordinals existing callers read. The names are
/// the historical transition labels: `Committed` is entered at join time,
/// before any commitment exists. See [`GamePhase`] for the precise view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum GameStatus {
    /// Created, second seat empty.
    #[default]
    WaitingForPlayer = 0,
    /// Both seats filled; commits (and possibly reveals) pending.
    Committed = 1,
    /// First reveal accepted.
    Revealed = 2,
    /// Both reveals accepted; winner fixed. Terminal.
    Completed = 3,
}

impl GameStatus {
    /// Wire value.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Get status from wire value (0-3).
    pub fn from_u8(value: u8) -> Option<GameStatus> {
        match value {
            0 => Some(GameStatus::WaitingForPlayer),
            1 => Some(GameStatus::Committed),
            2 => Some(GameStatus::Revealed),
            3 => Some(GameStatus::Completed),
            _ => None,
        }
    }

    /// Is this the terminal status?
    #[inline]
    pub fn is_terminal(self) -> bool {
        self == GameStatus::Completed
    }
}

/// Descriptive lifecycle phase, derived from the record.
///
/// All precondition checks are phrased in terms of the phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a second player.
    Open,
    /// Seats filled, at least one commitment outstanding.
    AwaitingCommits,
    /// Both committed, at least one reveal outstanding.
    AwaitingReveals,
    /// Winner fixed.
    Resolved,
}

/// One of the two seats in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Seat {
    /// The creator's seat.
    Player1,
    /// The joiner's seat.
    Player2,
}

impl Seat {
    /// Both seats in order.
    pub const ALL: [Seat; 2] = [Seat::Player1, Seat::Player2];

    /// Index into per-seat arrays.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Seat::Player1 => 0,
            Seat::Player2 => 1,
        }
    }

    /// The other seat.
    pub fn opponent(self) -> Seat {
        match self {
            Seat::Player1 => Seat::Player2,
            Seat::Player2 => Seat::Player1,
        }
    }
}

// =============================================================================
// WRITE-ONCE SLOTS
// =============================================================================

/// Attempted to write a slot that already holds a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("slot already written")]
pub struct SlotOccupied;

/// A field that starts empty and can be written exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot<T> {
    /// Not written yet.
    Unset,
    /// Written; immutable from here on.
    Set(T),
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot::Unset
    }
}

impl<T> Slot<T> {
    /// Has a value been written?
    #[inline]
    pub fn is_set(&self) -> bool {
        matches!(self, Slot::Set(_))
    }

    /// Borrow the value, if written.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        match self {
            Slot::Set(value) => Some(value),
            Slot::Unset => None,
        }
    }

    /// Write the value. Fails, leaving the slot untouched, if already written.
    pub fn set(&mut self, value: T) -> Result<(), SlotOccupied> {
        match self {
            Slot::Set(_) => Err(SlotOccupied),
            Slot::Unset => {
                *self = Slot::Set(value);
                Ok(())
            }
        }
    }
}

impl<T: Copy> Slot<T> {
    /// Copy the value out, if written.
    #[inline]
    pub fn copied(&self) -> Option<T> {
        self.get().copied()
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// Plaintext disclosed at reveal time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reveal {
    /// Revealed move.
    pub played: Move,
    /// Salt used in the commitment.
    pub salt: Salt,
}

/// Everything recorded for one seat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSlot {
    pub(crate) address: Slot<Address>,
    pub(crate) commitment: Slot<Commitment>,
    pub(crate) reveal: Slot<Reveal>,
}

impl PlayerSlot {
    /// Seated identity.
    pub fn address(&self) -> Option<Address> {
        self.address.copied()
    }

    /// Stored commitment.
    pub fn commitment(&self) -> Option<Commitment> {
        self.commitment.copied()
    }

    /// Revealed move and salt.
    pub fn reveal(&self) -> Option<Reveal> {
        self.reveal.copied()
    }

    /// Revealed move.
    pub fn played(&self) -> Option<Move> {
        self.reveal.get().map(|r| r.played)
    }

    /// Revealed salt.
    pub fn salt(&self) -> Option<Salt> {
        self.reveal.get().map(|r| r.salt)
    }

    /// Has this seat committed?
    pub fn has_committed(&self) -> bool {
        self.commitment.is_set()
    }

    /// Has this seat revealed?
    pub fn has_revealed(&self) -> bool {
        self.reveal.is_set()
    }
}

/// A record violates the game invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("game {id}: {reason}")]
pub struct InvariantViolation {
    /// Offending game.
    pub id: GameId,
    /// Which invariant failed.
    pub reason: &'static str,
}

/// One match.
///
/// Created by the registry, mutated in place by join/commit/reveal, never deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    id: GameId,
    seats: [PlayerSlot; 2],
    pub(crate) status: GameStatus,
    pub(crate) winner: Winner,
}

impl Game {
    /// Create a fresh game with `creator` in seat 1.
    pub(crate) fn new(id: GameId, creator: Address) -> Self {
        let mut seats = [PlayerSlot::default(); 2];
        seats[0].address = Slot::Set(creator);
        Self {
            id,
            seats,
            status: GameStatus::WaitingForPlayer,
            winner: Winner::None,
        }
    }

    /// Game id.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// External status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Outcome (`Winner::None` until completed).
    pub fn winner(&self) -> Winner {
        self.winner
    }

    /// Player 1's identity.
    pub fn player1(&self) -> Address {
        self.seats[0].address().unwrap_or(Address::ZERO)
    }

    /// Player 2's identity, or `Address::ZERO` before anyone joined.
    pub fn player2(&self) -> Address {
        self.seats[1].address().unwrap_or(Address::ZERO)
    }

    /// Record for a seat.
    pub fn seat(&self, seat: Seat) -> &PlayerSlot {
        &self.seats[seat.index()]
    }

    pub(crate) fn seat_mut(&mut self, seat: Seat) -> &mut PlayerSlot {
        &mut self.seats[seat.index()]
    }

    /// Which seat `caller` occupies, if any. The zero identity occupies none.
    pub fn seat_of(&self, caller: &Address) -> Option<Seat> {
        if caller.is_zero() {
            return None;
        }
        Seat::ALL
            .into_iter()
            .find(|seat| self.seat(*seat).address.get() == Some(caller))
    }

    /// Have both players committed?
    pub fn both_committed(&self) -> bool {
        self.seats.iter().all(PlayerSlot::has_committed)
    }

    /// Number of accepted reveals.
    pub fn revealed_count(&self) -> usize {
        self.seats.iter().filter(|s| s.has_revealed()).count()
    }

    /// Descriptive phase derived from status and slots.
    pub fn phase(&self) -> GamePhase {
        match self.status {
            GameStatus::WaitingForPlayer => GamePhase::Open,
            GameStatus::Completed => GamePhase::Resolved,
            GameStatus::Committed | GameStatus::Revealed => {
                if self.both_committed() {
                    GamePhase::AwaitingReveals
                } else {
                    GamePhase::AwaitingCommits
                }
            }
        }
    }

    /// Compute deterministic digest of the whole record.
    ///
    /// Two registries that applied the same operations agree on this.
    pub fn compute_hash(&self) -> Digest32 {
        let mut hasher = RecordHasher::for_game_record();
        hasher.update_u64(self.id);

        for seat in &self.seats {
            hasher.update_optional(seat.address.get().map(|a| &a.0[..]));
            hasher.update_optional(seat.commitment.get().map(|c| &c.0[..]));
            match seat.reveal.get() {
                Some(reveal) => {
                    hasher.update_bool(true);
                    hasher.update_u8(reveal.played.as_u8());
                    hasher.update_bytes(&reveal.salt.0);
                }
                None => hasher.update_bool(false),
            }
        }

        hasher.update_u8(self.status.as_u8());
        hasher.update_u8(self.winner.as_u8());
        hasher.finalize()
    }

    /// Check every record invariant.
    ///
    /// Reveals are re-checked against their commitments with `verifier`.
    pub fn check_invariants(&self, verifier: &CommitmentVerifier) -> Result<(), InvariantViolation> {
        let fail = |reason| Err(InvariantViolation { id: self.id, reason });

        let player1 = match self.seats[0].address() {
            Some(addr) if !addr.is_zero() => addr,
            _ => return fail("player1 must be a non-zero identity"),
        };

        match (self.status, self.seats[1].address()) {
            (GameStatus::WaitingForPlayer, None) => {}
            (GameStatus::WaitingForPlayer, Some(_)) => return fail("player2 seated while waiting"),
            (_, None) => return fail("player2 missing after join"),
            (_, Some(addr)) if addr.is_zero() => return fail("player2 is the zero identity"),
            (_, Some(addr)) if addr == player1 => return fail("player1 and player2 are the same"),
            _ => {}
        }

        for seat in &self.seats {
            if self.status == GameStatus::WaitingForPlayer && seat.has_committed() {
                return fail("commitment stored before join");
            }
            if let Some(reveal) = seat.reveal() {
                match seat.commitment() {
                    Some(stored) if verifier.verify(&stored, reveal.played, &reveal.salt) => {}
                    Some(_) => return fail("reveal does not open commitment"),
                    None => return fail("reveal without commitment"),
                }
            }
        }

        let reveals = self.revealed_count();
        if reveals > 0 && !self.both_committed() {
            return fail("reveal before both commitments");
        }

        let expected_reveals = match self.status {
            GameStatus::WaitingForPlayer | GameStatus::Committed => 0,
            GameStatus::Revealed => 1,
            GameStatus::Completed => 2,
        };
        if reveals != expected_reveals {
            return fail("reveal count does not match status");
        }

        let expected_winner = match (self.seats[0].played(), self.seats[1].played()) {
            (Some(m1), Some(m2)) => resolve(m1, m2),
            _ => Winner::None,
        };
        if self.winner != expected_winner {
            return fail("winner does not match revealed moves");
        }

        Ok(())
    }

    /// External view of the record.
    pub fn view(&self) -> GameView {
        let [p1, p2] = &self.seats;
        GameView {
            id: self.id,
            player1: self.player1(),
            player2: self.player2(),
            player1_commitment: p1.commitment().unwrap_or(Commitment::ZERO),
            player2_commitment: p2.commitment().unwrap_or(Commitment::ZERO),
            player1_move: p1.played(),
            player2_move: p2.played(),
            player1_salt: p1.salt(),
            player2_salt: p2.salt(),
            status: self.status,
            winner: self.winner,
        }
    }
}

/// Read-only snapshot of a game, as returned by `get_game`.
///
/// Unset commitments read as all zeros and unset identities as
/// `Address::ZERO`, matching the shape existing callers consume.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    /// Game id.
    pub id: GameId,
    /// Creator.
    pub player1: Address,
    /// Joiner, or zero.
    pub player2: Address,
    /// Player 1's commitment, or zero.
    pub player1_commitment: Commitment,
    /// Player 2's commitment, or zero.
    pub player2_commitment: Commitment,
    /// Player 1's revealed move.
    pub player1_move: Option<Move>,
    /// Player 2's revealed move.
    pub player2_move: Option<Move>,
    /// Player 1's revealed salt.
    pub player1_salt: Option<Salt>,
    /// Player 2's revealed salt.
    pub player2_salt: Option<Salt>,
    /// External status.
    pub status: GameStatus,
    /// Outcome.
    pub winner: Winner,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Address {
        Address::derive(b"alice")
    }

    fn bob() -> Address {
        Address::derive(b"bob")
    }

    fn joined_game() -> Game {
        let mut game = Game::new(7, alice());
        game.seats[1].address = Slot::Set(bob());
        game.status = GameStatus::Committed;
        game
    }

    #[test]
    fn test_slot_is_write_once() {
        let mut slot: Slot<u8> = Slot::default();
        assert!(!slot.is_set());
        assert_eq!(slot.set(0), Ok(()));
        assert_eq!(slot.set(5), Err(SlotOccupied));
        assert_eq!(slot.copied(), Some(0));
    }

    #[test]
    fn test_new_game() {
        let game = Game::new(0, alice());
        assert_eq!(game.player1(), alice());
        assert_eq!(game.player2(), Address::ZERO);
        assert_eq!(game.status(), GameStatus::WaitingForPlayer);
        assert_eq!(game.phase(), GamePhase::Open);
        assert_eq!(game.winner(), Winner::None);
        assert_eq!(game.check_invariants(&CommitmentVerifier::default()), Ok(()));
    }

    #[test]
    fn test_seat_of() {
        let game = Game::new(0, alice());
        assert_eq!(game.seat_of(&alice()), Some(Seat::Player1));
        assert_eq!(game.seat_of(&bob()), None);
        // The empty second seat must not match the zero identity.
        assert_eq!(game.seat_of(&Address::ZERO), None);

        let game = joined_game();
        assert_eq!(game.seat_of(&bob()), Some(Seat::Player2));
    }

    #[test]
    fn test_phase_tracks_commitments() {
        let mut game = joined_game();
        assert_eq!(game.phase(), GamePhase::AwaitingCommits);

        game.seats[0].commitment = Slot::Set(Commitment::new([1; 32]));
        assert_eq!(game.phase(), GamePhase::AwaitingCommits);

        game.seats[1].commitment = Slot::Set(Commitment::ZERO);
        assert_eq!(game.status(), GameStatus::Committed);
        assert_eq!(game.phase(), GamePhase::AwaitingReveals);
    }

    #[test]
    fn test_view_uses_zero_for_unset() {
        let view = Game::new(3, alice()).view();
        assert_eq!(view.id, 3);
        assert_eq!(view.player2, Address::ZERO);
        assert_eq!(view.player1_commitment, Commitment::ZERO);
        assert_eq!(view.player1_move, None);
        assert_eq!(view.status.as_u8(), 0);
    }

    #[test]
    fn test_view_json_field_names() {
        let json = serde_json::to_value(joined_game().view()).unwrap();
        assert!(json.get("player1Commitment").is_some());
        assert!(json.get("player2Move").is_some());
        assert_eq!(json["player2"], serde_json::Value::String(bob().to_hex()));
    }

    #[test]
    fn test_hash_distinguishes_zero_commitment_from_none() {
        let unset = joined_game();
        let mut zero = joined_game();
        zero.seats[0].commitment = Slot::Set(Commitment::ZERO);

        assert_ne!(unset.compute_hash(), zero.compute_hash());
        assert_eq!(unset.compute_hash(), joined_game().compute_hash());
    }

    #[test]
    fn test_invariants_catch_bad_records() {
        let verifier = CommitmentVerifier::default();

        let mut same_players = joined_game();
        same_players.seats[1].address = Slot::Set(alice());
        assert!(same_players.check_invariants(&verifier).is_err());

        let mut early_winner = joined_game();
        early_winner.winner = Winner::Draw;
        assert!(early_winner.check_invariants(&verifier).is_err());

        let mut forged = joined_game();
        forged.seats[0].commitment = Slot::Set(Commitment::new([1; 32]));
        forged.seats[1].commitment = Slot::Set(Commitment::new([2; 32]));
        forged.seats[0].reveal = Slot::Set(Reveal {
            played: Move::Rock,
            salt: Salt::ZERO,
        });
        forged.status = GameStatus::Revealed;
        let err = forged.check_invariants(&verifier).unwrap_err();
        assert_eq!(err.reason, "reveal does not open commitment");
    }

    #[test]
    fn test_status_wire_values() {
        assert_eq!(GameStatus::from_u8(1), Some(GameStatus::Committed));
        assert_eq!(GameStatus::from_u8(4), None);
        assert!(GameStatus::WaitingForPlayer < GameStatus::Completed);
        assert!(GameStatus::Completed.is_terminal());
    }
}
