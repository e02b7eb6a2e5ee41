use chess_core::Move;

use super::{pin, precondition, PieceRules};
use crate::castling::CastlingSide;
use crate::move_result::MoveResult;
use crate::piece::Piece;
use crate::Board;

/// Shared pattern for bishop, rook and queen: the right kind of line, an
/// empty inner path, no ally on the destination, and no pin.
fn slides(board: &Board, piece: Piece, mv: Move, diagonal: bool, orthogonal: bool) -> bool {
    let Some(direction) = mv.direction() else {
        return false;
    };
    let pattern = (diagonal && direction.is_diagonal()) || (orthogonal && direction.is_orthogonal());
    pattern
        && mv.inner_path().iter().all(|sq| board.is_empty(*sq))
        && !board.is_occupied_by(mv.to(), piece.color)
        && !pin::is_pinned(board, mv.from(), mv)
}

fn evaluate_with<R: PieceRules + ?Sized>(
    rules: &R,
    board: &Board,
    piece: Piece,
    mv: Move,
) -> MoveResult {
    if !rules.pseudo_move(board, piece, mv) {
        return MoveResult::illegal();
    }
    precondition(board, piece, mv).unwrap_or_else(MoveResult::illegal)
}

pub struct BishopRules;

impl PieceRules for BishopRules {
    fn pseudo_move(&self, board: &Board, piece: Piece, mv: Move) -> bool {
        slides(board, piece, mv, true, false)
    }

    fn evaluate(&self, board: &Board, piece: Piece, mv: Move) -> MoveResult {
        evaluate_with(self, board, piece, mv)
    }
}

/// Rook moves; leaving a corner gives up that corner's castling right.
pub struct RookRules;

impl PieceRules for RookRules {
    fn pseudo_move(&self, board: &Board, piece: Piece, mv: Move) -> bool {
        slides(board, piece, mv, false, true)
    }

    fn evaluate(&self, board: &Board, piece: Piece, mv: Move) -> MoveResult {
        let result = evaluate_with(self, board, piece, mv);
        match CastlingSide::from_rook_corner(mv.from()) {
            Some(side) if result.is_valid() => result.revoke(side),
            _ => result,
        }
    }
}

pub struct QueenRules;

impl PieceRules for QueenRules {
    fn pseudo_move(&self, board: &Board, piece: Piece, mv: Move) -> bool {
        slides(board, piece, mv, true, true)
    }

    fn evaluate(&self, board: &Board, piece: Piece, mv: Move) -> MoveResult {
        evaluate_with(self, board, piece, mv)
    }
}
