//! Legal move enumeration.
//!
//! Moves are found by probing every destination square for every piece of
//! the side to move. Probing only borrows the board; replays work on clones,
//! so the parallel variant needs no locking.

pub mod perft;

use chess_core::{Move, PieceKind, Square};
use rayon::prelude::*;

use crate::piece::Piece;
use crate::rules;
use crate::Board;

fn moves_from(board: &Board, from: Square, piece: Piece) -> Vec<Move> {
    let rules = rules::rules_for(piece.kind);
    Square::all()
        .map(|to| Move::new(from, to))
        .filter(|mv| rules.evaluate(board, piece, *mv).is_valid())
        .collect()
}

/// Legal moves for the side to move, sorted by origin then destination.
///
/// Empty once the game is over.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    if board.is_game_over() {
        return Vec::new();
    }
    board
        .pieces_of(board.current_player())
        .into_iter()
        .flat_map(|(from, piece)| moves_from(board, from, piece))
        .collect()
}

/// Same as [`legal_moves`], with pieces probed on the rayon pool.
pub fn legal_moves_par(board: &Board) -> Vec<Move> {
    if board.is_game_over() {
        return Vec::new();
    }
    board
        .pieces_of(board.current_player())
        .into_par_iter()
        .flat_map_iter(|(from, piece)| moves_from(board, from, piece))
        .collect()
}

/// True if `mv` is a pawn reaching its last rank.
pub fn is_promotion(board: &Board, mv: Move) -> bool {
    board
        .piece_at(mv.from())
        .is_some_and(|p| p.kind == PieceKind::Pawn && mv.to().is_last_rank(p.color))
}

/// Plays `mv` on a copy of `board`.
///
/// Returns `None` if the game is over, the origin does not hold a piece of
/// the side to move, the move is illegal, or `promotion` is not one of
/// [`PieceKind::PROMOTION_CHOICES`]. A promotion without a piece promotes to
/// a queen.
pub fn apply(board: &Board, mv: Move, promotion: Option<PieceKind>) -> Option<Board> {
    if board.is_game_over() {
        return None;
    }
    let piece = board.piece_at(mv.from())?;
    if piece.color != board.current_player() {
        return None;
    }
    let result = rules::evaluate(board, mv);
    if !result.is_valid() {
        return None;
    }
    let promotion = if result.is_promotion() {
        let kind = promotion.unwrap_or(PieceKind::Queen);
        if !PieceKind::PROMOTION_CHOICES.contains(&kind) {
            return None;
        }
        Some(kind)
    } else {
        None
    };

    let mut next = board.clone();
    next.apply(mv, &result, promotion);
    Some(next)
}
