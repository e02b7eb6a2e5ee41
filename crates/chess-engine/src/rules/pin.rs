//! Pin detection.

use chess_core::{Move, PieceKind, Square};

use crate::Board;

/// The enemy slider pinning the piece on `from` to its king, if any.
///
/// The piece must share a line with its king with nothing in between, and
/// the first piece beyond it on that line must be an enemy that slides along
/// lines of that kind.
pub fn pinner(board: &Board, from: Square) -> Option<Square> {
    let piece = board.piece_at(from)?;
    if piece.kind == PieceKind::King {
        return None;
    }
    let king = board.king(piece.color)?;
    let line = Move::new(king, from);
    let direction = line.direction()?;
    if line.inner_path().iter().any(|sq| !board.is_empty(*sq)) {
        return None;
    }

    let behind = line
        .projected_path()
        .into_iter()
        .find(|sq| !board.is_empty(*sq))?;
    let attacker = board.piece_at(behind)?;
    if attacker.color == piece.color {
        return None;
    }
    let slides = if direction.is_diagonal() {
        attacker.kind.slides_diagonally()
    } else {
        attacker.kind.slides_orthogonally()
    };
    slides.then_some(behind)
}

/// True if moving the piece on `from` along `mv` would expose its king.
///
/// A pinned piece may still move along the pin line: onto the pinner, onto
/// a square between itself and the pinner, or back toward its king.
pub fn is_pinned(board: &Board, from: Square, mv: Move) -> bool {
    let Some(pinner) = pinner(board, from) else {
        return false;
    };
    let Some(king) = board.piece_at(from).and_then(|p| board.king(p.color)) else {
        return false;
    };
    let to = mv.to();
    let along_line = to == pinner
        || Move::new(from, pinner).inner_path().contains(&to)
        || Move::new(king, from).inner_path().contains(&to);
    !along_line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    fn mv(text: &str) -> Move {
        text.parse().unwrap()
    }

    #[test]
    fn rook_pins_knight_on_file() {
        let board = Board::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        assert_eq!(pinner(&board, sq("e2")), Some(sq("e8")));
        assert!(is_pinned(&board, sq("e2"), mv("e2c3")));
    }

    #[test]
    fn pinned_piece_slides_along_line() {
        let board = Board::from_fen("4r1k1/8/8/8/8/8/4R3/4K3 w - - 0 1").unwrap();
        assert!(!is_pinned(&board, sq("e2"), mv("e2e5")));
        assert!(!is_pinned(&board, sq("e2"), mv("e2e8")));
        assert!(is_pinned(&board, sq("e2"), mv("e2d2")));
    }

    #[test]
    fn piece_pinned_between_king_and_far_pinner_can_retreat() {
        let board = Board::from_fen("6k1/8/8/8/q7/8/8/3R1K2 w - - 0 1").unwrap();
        assert_eq!(pinner(&board, sq("d1")), None);

        let board = Board::from_fen("6k1/8/8/8/8/8/8/q2R2K1 w - - 0 1").unwrap();
        assert_eq!(pinner(&board, sq("d1")), Some(sq("a1")));
        assert!(!is_pinned(&board, sq("d1"), mv("d1f1")));
        assert!(!is_pinned(&board, sq("d1"), mv("d1b1")));
        assert!(is_pinned(&board, sq("d1"), mv("d1d5")));
    }

    #[test]
    fn wrong_line_type_does_not_pin() {
        // A bishop cannot pin along a file.
        let board = Board::from_fen("4b1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        assert_eq!(pinner(&board, sq("e2")), None);
        // Nor a rook along a diagonal.
        let board = Board::from_fen("6k1/8/8/8/r7/8/2N5/3K4 w - - 0 1").unwrap();
        assert_eq!(pinner(&board, sq("c2")), None);
    }

    #[test]
    fn blocked_line_does_not_pin() {
        let board = Board::from_fen("4r1k1/8/8/4p3/8/8/4N3/4K3 w - - 0 1").unwrap();
        assert_eq!(pinner(&board, sq("e2")), None);
        let board = Board::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        assert_eq!(pinner(&board, sq("e1")), None);
    }

    #[test]
    fn pawns_are_pinned_too() {
        let board = Board::from_fen("6k1/8/8/8/7b/8/5P2/4K3 w - - 0 1").unwrap();
        assert_eq!(pinner(&board, sq("f2")), Some(sq("h4")));
        assert!(is_pinned(&board, sq("f2"), mv("f2f3")));
    }

    #[test]
    fn no_king_no_pin() {
        let board = Board::from_fen("4r3/8/8/8/8/8/4N3/8 w - - 0 1").unwrap();
        assert!(!is_pinned(&board, sq("e2"), mv("e2c3")));
    }
}
