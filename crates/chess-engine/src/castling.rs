//! Castling sides and rights.

use chess_core::{Color, Move, Square};

/// One of the four castling options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CastlingSide {
    WhiteKingside = 0,
    WhiteQueenside = 1,
    BlackKingside = 2,
    BlackQueenside = 3,
}

impl CastlingSide {
    pub const ALL: [CastlingSide; 4] = [
        CastlingSide::WhiteKingside,
        CastlingSide::WhiteQueenside,
        CastlingSide::BlackKingside,
        CastlingSide::BlackQueenside,
    ];

    /// Kingside and queenside for one color.
    pub const fn of(color: Color) -> [CastlingSide; 2] {
        match color {
            Color::White => [CastlingSide::WhiteKingside, CastlingSide::WhiteQueenside],
            Color::Black => [CastlingSide::BlackKingside, CastlingSide::BlackQueenside],
        }
    }

    #[inline]
    pub const fn color(self) -> Color {
        match self {
            CastlingSide::WhiteKingside | CastlingSide::WhiteQueenside => Color::White,
            CastlingSide::BlackKingside | CastlingSide::BlackQueenside => Color::Black,
        }
    }

    /// Position-string letter ("K", "Q", "k", "q").
    pub const fn fen_char(self) -> char {
        match self {
            CastlingSide::WhiteKingside => 'K',
            CastlingSide::WhiteQueenside => 'Q',
            CastlingSide::BlackKingside => 'k',
            CastlingSide::BlackQueenside => 'q',
        }
    }

    #[inline]
    const fn flag(self) -> u8 {
        1 << self as u8
    }

    pub const fn king_from(self) -> Square {
        match self.color() {
            Color::White => Square::E1,
            Color::Black => Square::E8,
        }
    }

    pub const fn king_to(self) -> Square {
        match self {
            CastlingSide::WhiteKingside => Square::G1,
            CastlingSide::WhiteQueenside => Square::C1,
            CastlingSide::BlackKingside => Square::G8,
            CastlingSide::BlackQueenside => Square::C8,
        }
    }

    /// Corner the rook starts on. Moving from or capturing on it loses the right.
    pub const fn rook_from(self) -> Square {
        match self {
            CastlingSide::WhiteKingside => Square::H1,
            CastlingSide::WhiteQueenside => Square::A1,
            CastlingSide::BlackKingside => Square::H8,
            CastlingSide::BlackQueenside => Square::A8,
        }
    }

    pub const fn rook_to(self) -> Square {
        match self {
            CastlingSide::WhiteKingside => Square::F1,
            CastlingSide::WhiteQueenside => Square::D1,
            CastlingSide::BlackKingside => Square::F8,
            CastlingSide::BlackQueenside => Square::D8,
        }
    }

    /// Squares the king stands on or crosses; none may be attacked.
    pub const fn king_transit(self) -> [Square; 3] {
        [self.king_from(), self.rook_to(), self.king_to()]
    }

    /// Squares strictly between king and rook; all must be empty.
    pub fn between(self) -> Vec<Square> {
        Move::new(self.king_from(), self.rook_from()).inner_path()
    }

    /// The rook's relocation when castling on this side.
    pub const fn rook_move(self) -> Move {
        Move::new(self.rook_from(), self.rook_to())
    }

    /// The side a king move castles to, if the move is a castling pattern.
    pub fn from_king_move(mv: Move) -> Option<CastlingSide> {
        Self::ALL
            .into_iter()
            .find(|side| side.king_from() == mv.from() && side.king_to() == mv.to())
    }

    /// The side whose rook starts on `square`, if it is a corner.
    pub fn from_rook_corner(square: Square) -> Option<CastlingSide> {
        Self::ALL
            .into_iter()
            .find(|side| side.rook_from() == square)
    }
}

/// The four castling booleans, packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    #[inline]
    pub const fn has(self, side: CastlingSide) -> bool {
        self.0 & side.flag() != 0
    }

    #[inline]
    pub fn set(&mut self, side: CastlingSide, value: bool) {
        if value {
            self.0 |= side.flag();
        } else {
            self.0 &= !side.flag();
        }
    }

    #[inline]
    pub fn revoke(&mut self, side: CastlingSide) {
        self.set(side, false);
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Parses the castling field of a position string ("KQkq", "Kq", "-").
    pub fn from_fen_field(field: &str) -> Self {
        let mut rights = CastlingRights::NONE;
        for side in CastlingSide::ALL {
            if field.contains(side.fen_char()) {
                rights.set(side, true);
            }
        }
        rights
    }

    /// Renders the castling field of a position string.
    pub fn to_fen_field(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        CastlingSide::ALL
            .into_iter()
            .filter(|side| self.has(*side))
            .map(CastlingSide::fen_char)
            .collect()
    }
}
