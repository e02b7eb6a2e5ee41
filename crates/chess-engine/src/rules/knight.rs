use chess_core::Move;

use super::{offset, pin, precondition, PieceRules};
use crate::move_result::MoveResult;
use crate::piece::Piece;
use crate::Board;

pub struct KnightRules;

impl PieceRules for KnightRules {
    fn pseudo_move(&self, board: &Board, piece: Piece, mv: Move) -> bool {
        let (dx, dy) = offset(mv);
        matches!((dx.abs(), dy.abs()), (1, 2) | (2, 1))
            && !board.is_occupied_by(mv.to(), piece.color)
            && !pin::is_pinned(board, mv.from(), mv)
    }

    fn evaluate(&self, board: &Board, piece: Piece, mv: Move) -> MoveResult {
        if !self.pseudo_move(board, piece, mv) {
            return MoveResult::illegal();
        }
        precondition(board, piece, mv).unwrap_or_else(MoveResult::illegal)
    }
}
