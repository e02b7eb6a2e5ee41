//! Pieces as stored on the board.

use chess_core::{Color, PieceKind};
use std::fmt;

/// A colored piece.
///
/// Pieces are plain values owned by the board's square map. They hold no
/// position and no handle to the board: the square is the map key, and every
/// rule that needs board context receives the board explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece { kind, color }
    }

    #[inline]
    pub const fn is(self, kind: PieceKind, color: Color) -> bool {
        self.kind as u8 == kind as u8 && self.color as u8 == color as u8
    }

    /// Position-string letter, uppercase for White.
    #[inline]
    pub const fn fen_char(self) -> char {
        self.kind.to_fen_char(self.color)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}
