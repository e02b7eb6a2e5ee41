//! Per-piece legality rules.
//!
//! Each piece kind has a unit struct implementing [`PieceRules`]. The board is
//! always passed in explicitly; rules hold no state and never mutate it.
//!
//! # Example
//!
//! ```
//! use chess_engine::{rules, Board};
//!
//! let board = Board::initial();
//! let result = rules::evaluate(&board, "e2e4".parse().unwrap());
//! assert!(result.is_valid());
//! assert_eq!(result.en_passant(), Some("e3".parse().unwrap()));
//! ```

mod king;
mod knight;
mod pawn;
pub mod pin;
mod sliders;

pub use king::KingRules;
pub use knight::KnightRules;
pub use pawn::PawnRules;
pub use sliders::{BishopRules, QueenRules, RookRules};

use chess_core::{Move, PieceKind};

use crate::castling::CastlingSide;
use crate::evaluator;
use crate::move_result::MoveResult;
use crate::piece::Piece;
use crate::Board;

/// Movement and legality rules for one piece kind.
pub trait PieceRules: Sync {
    /// True if `mv` fits the piece's movement pattern on this board, with
    /// path blocking and pins taken into account. Turn order and the
    /// in-check restriction are ignored.
    fn pseudo_move(&self, board: &Board, piece: Piece, mv: Move) -> bool;

    /// Full legality evaluation with side effects.
    fn evaluate(&self, board: &Board, piece: Piece, mv: Move) -> MoveResult;
}

/// Returns the rules for a piece kind.
pub fn rules_for(kind: PieceKind) -> &'static dyn PieceRules {
    match kind {
        PieceKind::Pawn => &PawnRules,
        PieceKind::Knight => &KnightRules,
        PieceKind::Bishop => &BishopRules,
        PieceKind::Rook => &RookRules,
        PieceKind::Queen => &QueenRules,
        PieceKind::King => &KingRules,
    }
}

/// Evaluates `mv` for whatever piece stands on its origin.
///
/// Turn order is not checked here; see [`crate::Controller::attempt_move`].
pub fn evaluate(board: &Board, mv: Move) -> MoveResult {
    match board.piece_at(mv.from()) {
        Some(piece) => rules_for(piece.kind).evaluate(board, piece, mv),
        None => MoveResult::illegal(),
    }
}

/// Pattern check for whatever piece stands on the origin of `mv`.
pub fn pseudo_move(board: &Board, mv: Move) -> bool {
    board
        .piece_at(mv.from())
        .is_some_and(|piece| rules_for(piece.kind).pseudo_move(board, piece, mv))
}

/// Checks shared by every piece.
///
/// Returns the base result to build on, or `None` if the move is illegal
/// whatever the piece. A capture resets the half-move clock and landing on
/// a rook corner revokes that corner's castling right.
pub(crate) fn precondition(board: &Board, piece: Piece, mv: Move) -> Option<MoveResult> {
    if mv.is_null() {
        return None;
    }

    let target = board.piece_at(mv.to());
    if target.is_some_and(|t| t.is(PieceKind::King, piece.color.opposite())) {
        return None;
    }

    if piece.kind != PieceKind::King
        && evaluator::is_check(board, piece.color)
        && !evaluator::defending_moves(board, piece.color).contains(&mv)
    {
        return None;
    }

    let mut result = MoveResult::legal();
    if target.is_some_and(|t| t.color != piece.color) {
        result = result.reset_clock();
    }
    if let Some(side) = CastlingSide::from_rook_corner(mv.to()) {
        result = result.revoke(side);
    }
    Some(result)
}

/// Signed file and rank deltas of a move.
pub(crate) fn offset(mv: Move) -> (i8, i8) {
    (mv.to().x() - mv.from().x(), mv.to().y() - mv.from().y())
}
