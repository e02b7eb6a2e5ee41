//! The outcome of evaluating one candidate move.

use chess_core::{Move, Square};

use crate::castling::CastlingSide;

/// Everything a legal move changes besides the obvious `from -> to` relocation.
///
/// Rules build this value and hand it back; only the controller (or a
/// trial replay in [`crate::movegen`]) consumes it to mutate a board.
/// An illegal move is `MoveResult::illegal()`, with every field at its default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveResult {
    valid: bool,
    en_passant: Option<Square>,
    lost_castling: Vec<CastlingSide>,
    removed: Vec<Square>,
    relocations: Vec<Move>,
    reset_half_move_clock: bool,
    promotion: bool,
}

impl MoveResult {
    #[inline]
    pub fn illegal() -> Self {
        MoveResult::default()
    }

    #[inline]
    pub(crate) fn legal() -> Self {
        MoveResult {
            valid: true,
            ..MoveResult::default()
        }
    }

    pub(crate) fn with_en_passant(mut self, square: Square) -> Self {
        self.en_passant = Some(square);
        self
    }

    pub(crate) fn revoke(mut self, side: CastlingSide) -> Self {
        if !self.lost_castling.contains(&side) {
            self.lost_castling.push(side);
        }
        self
    }

    pub(crate) fn revoke_all(self, sides: impl IntoIterator<Item = CastlingSide>) -> Self {
        sides.into_iter().fold(self, MoveResult::revoke)
    }

    pub(crate) fn remove(mut self, square: Square) -> Self {
        if !self.removed.contains(&square) {
            self.removed.push(square);
        }
        self
    }

    pub(crate) fn relocate(mut self, mv: Move) -> Self {
        if !self.relocations.contains(&mv) {
            self.relocations.push(mv);
        }
        self
    }

    pub(crate) fn reset_clock(mut self) -> Self {
        self.reset_half_move_clock = true;
        self
    }

    pub(crate) fn promote(mut self) -> Self {
        self.promotion = true;
        self
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The en-passant target created by this move, if it is a double push.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn lost_castling(&self) -> &[CastlingSide] {
        &self.lost_castling
    }

    /// Squares emptied besides the destination (the en-passant victim).
    #[inline]
    pub fn removed(&self) -> &[Square] {
        &self.removed
    }

    /// Secondary relocations (the rook when castling).
    #[inline]
    pub fn relocations(&self) -> &[Move] {
        &self.relocations
    }

    #[inline]
    pub fn resets_half_move_clock(&self) -> bool {
        self.reset_half_move_clock
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.promotion
    }
}
