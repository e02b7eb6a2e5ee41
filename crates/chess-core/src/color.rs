//! Player color representation.

/// The two sides of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Both colors, White first.
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    /// Returns the opposite color.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rank step of a pawn push: +1 for White, -1 for Black.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank the pieces start on (0 for White, 7 for Black).
    #[inline]
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Rank the pawns start on, the only rank a double push is allowed from.
    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank a pawn promotes on.
    #[inline]
    pub const fn last_rank(self) -> u8 {
        self.opposite().back_rank()
    }

    /// Side-to-move letter used in position strings.
    #[inline]
    pub const fn fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    fn not(self) -> Self::Output {
        self.opposite()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_color() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(!Color::Black, Color::White);
    }

    #[test]
    fn pawn_ranks() {
        assert_eq!(Color::White.pawn_start_rank(), 1);
        assert_eq!(Color::Black.pawn_start_rank(), 6);
        assert_eq!(Color::White.last_rank(), 7);
        assert_eq!(Color::Black.last_rank(), 0);
        assert_eq!(Color::Black.pawn_direction(), -1);
    }

    #[test]
    fn fen_letters() {
        assert_eq!(Color::White.fen_char(), 'w');
        assert_eq!(Color::Black.fen_char(), 'b');
    }
}
