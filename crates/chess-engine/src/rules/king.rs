use chess_core::{Move, PieceKind};

use super::{precondition, PieceRules};
use crate::castling::CastlingSide;
use crate::config::CastlingRevocation;
use crate::evaluator;
use crate::move_result::MoveResult;
use crate::piece::Piece;
use crate::Board;

/// Single steps onto safe squares, and castling.
///
/// The king is never pin-checked; its own safety test covers it.
pub struct KingRules;

impl KingRules {
    /// The castling side `mv` performs, if every castling condition holds.
    pub fn castling(board: &Board, piece: Piece, mv: Move) -> Option<CastlingSide> {
        let side = CastlingSide::from_king_move(mv)?;
        let rook = Piece::new(PieceKind::Rook, piece.color);
        let ok = side.color() == piece.color
            && board.has_castling(side)
            && board.piece_at(side.rook_from()) == Some(rook)
            && side.between().iter().all(|sq| board.is_empty(*sq))
            && !side
                .king_transit()
                .iter()
                .any(|sq| evaluator::square_under_attack(board, *sq, piece.color));
        ok.then_some(side)
    }

    fn steps(board: &Board, piece: Piece, mv: Move) -> bool {
        mv.distance() == 1
            && !board.is_occupied_by(mv.to(), piece.color)
            && !evaluator::square_under_attack(board, mv.to(), piece.color)
    }
}

impl PieceRules for KingRules {
    fn pseudo_move(&self, board: &Board, piece: Piece, mv: Move) -> bool {
        Self::steps(board, piece, mv) || Self::castling(board, piece, mv).is_some()
    }

    fn evaluate(&self, board: &Board, piece: Piece, mv: Move) -> MoveResult {
        let castling = if Self::steps(board, piece, mv) {
            None
        } else {
            match Self::castling(board, piece, mv) {
                Some(side) => Some(side),
                None => return MoveResult::illegal(),
            }
        };
        let Some(mut result) = precondition(board, piece, mv) else {
            return MoveResult::illegal();
        };
        if let Some(side) = castling {
            result = result.relocate(side.rook_move());
        }

        match board.rules().castling_revocation {
            CastlingRevocation::OwnSide => result.revoke_all(CastlingSide::of(piece.color)),
            CastlingRevocation::AllSides => result.revoke_all(CastlingSide::ALL),
        }
    }
}
