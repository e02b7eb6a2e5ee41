use chess_core::{Move, PieceKind, Square};

use super::{offset, pin, precondition, PieceRules};
use crate::evaluator;
use crate::move_result::MoveResult;
use crate::piece::Piece;
use crate::Board;

/// Pushes, double pushes, diagonal captures, en passant and promotion.
pub struct PawnRules;

impl PawnRules {
    /// The square of the pawn captured en passant by `mv`, if it is one.
    ///
    /// The destination must be the board's en-passant target and empty, an
    /// enemy pawn must stand beside the origin on the destination file, and
    /// removing it must not uncover a check along the rank.
    fn en_passant_victim(board: &Board, piece: Piece, mv: Move) -> Option<Square> {
        if board.en_passant() != Some(mv.to()) || !board.is_empty(mv.to()) {
            return None;
        }
        let victim = Square::from_coords(mv.to().x(), mv.from().y()).ok()?;
        if !board
            .piece_at(victim)
            .is_some_and(|p| p.is(PieceKind::Pawn, piece.color.opposite()))
        {
            return None;
        }

        let mut trial = board.clone();
        trial.take(victim);
        trial.take(mv.from());
        trial.place(mv.to(), piece);
        (!evaluator::is_check(&trial, piece.color)).then_some(victim)
    }

    fn is_double_push(piece: Piece, mv: Move) -> bool {
        offset(mv) == (0, 2 * piece.color.pawn_direction())
    }
}

impl PieceRules for PawnRules {
    fn pseudo_move(&self, board: &Board, piece: Piece, mv: Move) -> bool {
        let forward = piece.color.pawn_direction();
        let from = mv.from();
        let target = board.piece_at(mv.to());

        let fits = match offset(mv) {
            (0, dy) if dy == forward => target.is_none(),
            (0, dy) if dy == 2 * forward => {
                from.y() as u8 == piece.color.pawn_start_rank()
                    && target.is_none()
                    && from.offset(0, forward).is_some_and(|sq| board.is_empty(sq))
            }
            (dx, dy) if dx.abs() == 1 && dy == forward => match target {
                Some(enemy) => enemy.color != piece.color,
                None => Self::en_passant_victim(board, piece, mv).is_some(),
            },
            _ => false,
        };

        fits && !pin::is_pinned(board, from, mv)
    }

    fn evaluate(&self, board: &Board, piece: Piece, mv: Move) -> MoveResult {
        if !self.pseudo_move(board, piece, mv) {
            return MoveResult::illegal();
        }
        let Some(mut result) = precondition(board, piece, mv) else {
            return MoveResult::illegal();
        };

        result = result.reset_clock();
        if Self::is_double_push(piece, mv) {
            if let Some(crossed) = mv.inner_path().first() {
                result = result.with_en_passant(*crossed);
            }
        }
        if let Some(victim) = Self::en_passant_victim(board, piece, mv) {
            result = result.remove(victim);
        }
        if mv.to().is_last_rank(piece.color) {
            result = result.promote();
        }
        result
    }
}
