//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the rules. Each
//! promotion counts once per piece it may promote to.

use chess_core::{Color, Move, PieceKind};
use rayon::prelude::*;

use super::{apply, is_promotion, legal_moves};
use crate::Board;

/// The promotion pieces to try for `mv`: `[None]` for ordinary moves.
fn promotion_options(board: &Board, mv: Move) -> Vec<Option<PieceKind>> {
    if is_promotion(board, mv) {
        PieceKind::PROMOTION_CHOICES.iter().copied().map(Some).collect()
    } else {
        vec![None]
    }
}

fn child_nodes(board: &Board, mv: Move, promotion: Option<PieceKind>, depth: u32) -> u64 {
    apply(board, mv, promotion).map_or(0, |next| perft(&next, depth - 1))
}

/// Counts the number of leaf nodes at the given depth.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(board);

    if depth == 1 {
        return moves
            .iter()
            .map(|mv| promotion_options(board, *mv).len() as u64)
            .sum();
    }

    let mut nodes = 0u64;
    for mv in moves {
        for promotion in promotion_options(board, mv) {
            nodes += child_nodes(board, mv, promotion, depth);
        }
    }
    nodes
}

/// [`perft`] with the root moves searched on the rayon pool.
pub fn perft_par(board: &Board, depth: u32) -> u64 {
    if depth <= 1 {
        return perft(board, depth);
    }
    legal_moves(board)
        .into_par_iter()
        .map(|mv| {
            promotion_options(board, mv)
                .into_iter()
                .map(|promotion| child_nodes(board, mv, promotion, depth))
                .sum::<u64>()
        })
        .sum()
}

/// Perft with divide - node count below each root move, keyed by long
/// algebraic notation with a promotion suffix ("e7e8q").
pub fn perft_divide(board: &Board, depth: u32) -> Vec<(String, u64)> {
    let mut results = Vec::new();
    if depth == 0 {
        return results;
    }

    for mv in legal_moves(board) {
        for promotion in promotion_options(board, mv) {
            let mut name = mv.long_algebraic();
            if let Some(kind) = promotion {
                name.push(kind.to_fen_char(Color::Black));
            }
            results.push((name, child_nodes(board, mv, promotion, depth)));
        }
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
