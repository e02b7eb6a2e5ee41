//! Board coordinates.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::Color;

/// Errors raised when building a square from out-of-range or malformed input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SquareError {
    #[error("invalid square coordinates: {x}, {y}")]
    OutOfRange { x: i8, y: i8 },

    #[error("invalid square index: {0}")]
    InvalidIndex(u8),

    #[error("invalid square notation: '{0}'")]
    InvalidNotation(String),
}

/// A file (column) on the chess board, from A to H.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    /// Creates a file from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Creates a file from a letter, either case.
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a'..='h' => Self::from_index(c.to_ascii_lowercase() as u8 - b'a'),
            _ => None,
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A rank (row) on the chess board, from 1 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    pub const ALL: [Rank; 8] = [
        Rank::R1,
        Rank::R2,
        Rank::R3,
        Rank::R4,
        Rank::R5,
        Rank::R6,
        Rank::R7,
        Rank::R8,
    ];

    /// Creates a rank from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Creates a rank from a digit ('1'-'8').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Self::from_index(c as u8 - b'1'),
            _ => None,
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A square on the board, indexed 0-63.
///
/// Squares use little-endian rank-file mapping: a1 = 0, b1 = 1, ..., h1 = 7,
/// a2 = 8, ..., h8 = 63. The coordinate `x` is the file and `y` the rank,
/// both in `0..8`; a `Square` outside that range cannot be built.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Lowest valid coordinate.
    pub const MIN_COORD: i8 = 0;
    /// Highest valid coordinate.
    pub const MAX_COORD: i8 = 7;

    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Square(rank.index() * 8 + file.index())
    }

    /// Creates a square from signed file/rank coordinates.
    pub const fn from_coords(x: i8, y: i8) -> Result<Self, SquareError> {
        if Self::is_valid(x, y) {
            Ok(Square((y * 8 + x) as u8))
        } else {
            Err(SquareError::OutOfRange { x, y })
        }
    }

    /// Creates a square from its linear index (0-63).
    pub const fn from_index(index: u8) -> Result<Self, SquareError> {
        if index < 64 {
            Ok(Square(index))
        } else {
            Err(SquareError::InvalidIndex(index))
        }
    }

    /// Parses algebraic notation such as "e4" or "E4".
    pub fn from_algebraic(s: &str) -> Result<Self, SquareError> {
        let mut chars = s.chars();
        let (Some(f), Some(r), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(SquareError::InvalidNotation(s.to_string()));
        };
        match (File::from_char(f), Rank::from_char(r)) {
            (Some(file), Some(rank)) => Ok(Square::new(file, rank)),
            _ => Err(SquareError::InvalidNotation(s.to_string())),
        }
    }

    /// True iff both coordinates lie on the board.
    #[inline]
    pub const fn is_valid(x: i8, y: i8) -> bool {
        x >= Self::MIN_COORD && x <= Self::MAX_COORD && y >= Self::MIN_COORD && y <= Self::MAX_COORD
    }

    /// Iterates over all 64 squares from a1 to h8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn file(self) -> File {
        File::ALL[(self.0 % 8) as usize]
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::ALL[(self.0 / 8) as usize]
    }

    /// File coordinate as a signed integer.
    #[inline]
    pub const fn x(self) -> i8 {
        (self.0 % 8) as i8
    }

    /// Rank coordinate as a signed integer.
    #[inline]
    pub const fn y(self) -> i8 {
        (self.0 / 8) as i8
    }

    /// The square `dx` files and `dy` ranks away, if it is on the board.
    #[inline]
    pub fn offset(self, dx: i8, dy: i8) -> Option<Square> {
        Self::from_coords(self.x() + dx, self.y() + dy).ok()
    }

    /// Chebyshev (king-step) distance.
    #[inline]
    pub const fn distance(self, other: Square) -> u8 {
        let dx = (self.x() - other.x()).unsigned_abs();
        let dy = (self.y() - other.y()).unsigned_abs();
        if dx > dy {
            dx
        } else {
            dy
        }
    }

    /// Same diagonal or anti-diagonal. A square is diagonal to itself.
    #[inline]
    pub const fn is_diagonal_to(self, other: Square) -> bool {
        (self.x() - other.x()).abs() == (self.y() - other.y()).abs()
    }

    #[inline]
    pub const fn is_vertical_to(self, other: Square) -> bool {
        self.x() == other.x()
    }

    #[inline]
    pub const fn is_horizontal_to(self, other: Square) -> bool {
        self.y() == other.y()
    }

    #[inline]
    pub const fn is_orthogonal_to(self, other: Square) -> bool {
        self.is_vertical_to(other) || self.is_horizontal_to(other)
    }

    #[inline]
    pub const fn is_aligned_to(self, other: Square) -> bool {
        self.is_orthogonal_to(other) || self.is_diagonal_to(other)
    }

    /// The up-to-8 surrounding squares, clipped to the board.
    pub fn neighbors(self) -> impl Iterator<Item = Square> {
        (-1i8..=1)
            .flat_map(|dx| (-1i8..=1).map(move |dy| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .filter_map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// a1 is dark, so light squares have odd coordinate sums.
    #[inline]
    pub const fn is_light(self) -> bool {
        (self.x() + self.y()) % 2 == 1
    }

    #[inline]
    pub const fn is_dark(self) -> bool {
        !self.is_light()
    }

    /// True if a pawn of `color` promotes on this square.
    #[inline]
    pub const fn is_last_rank(self, color: Color) -> bool {
        self.y() as u8 == color.last_rank()
    }

    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s)
    }
}

impl TryFrom<u8> for Square {
    type Error = SquareError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Square::from_index(index)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
