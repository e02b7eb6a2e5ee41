//! Move descriptor.

use crate::{Direction, Square, SquareError};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing long-algebraic move text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("invalid move '{0}': expected 4 characters such as e2e4")]
    InvalidLength(String),

    #[error("invalid move square: {0}")]
    InvalidSquare(#[from] SquareError),
}

/// An origin/destination pair.
///
/// Nothing about legality is stored here: `from == to` is representable and
/// rejected by the rules. Direction, distance and paths are derived on demand.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// True if both endpoints are the same square.
    #[inline]
    pub fn is_null(self) -> bool {
        self.from == self.to
    }

    /// Compass direction for orthogonal or diagonal moves, `None` otherwise
    /// (knight jumps, unaligned pairs and null moves).
    pub fn direction(self) -> Option<Direction> {
        if self.is_null() || !self.from.is_aligned_to(self.to) {
            return None;
        }
        let dx = (self.to.x() - self.from.x()).signum();
        let dy = (self.to.y() - self.from.y()).signum();
        Direction::from_delta(dx, dy)
    }

    /// Chebyshev distance between the endpoints.
    #[inline]
    pub const fn distance(self) -> u8 {
        self.from.distance(self.to)
    }

    /// Squares strictly between `from` and `to`. Empty for adjacent or
    /// unaligned moves.
    pub fn inner_path(self) -> Vec<Square> {
        let Some(direction) = self.direction() else {
            return Vec::new();
        };
        let (dx, dy) = direction.delta();
        let mut path = Vec::with_capacity(self.distance().saturating_sub(1) as usize);
        let mut current = self.from;
        while let Some(next) = current.offset(dx, dy) {
            if next == self.to {
                break;
            }
            path.push(next);
            current = next;
        }
        path
    }

    /// Squares beyond `to` in the direction of travel, up to the board edge.
    ///
    /// Pin detection walks this from the king through the candidate piece.
    pub fn projected_path(self) -> Vec<Square> {
        let Some(direction) = self.direction() else {
            return Vec::new();
        };
        let (dx, dy) = direction.delta();
        std::iter::successors(self.to.offset(dx, dy), |sq| sq.offset(dx, dy)).collect()
    }

    /// Origin square in algebraic notation ("e2").
    pub fn algebraic(self) -> String {
        self.from.to_algebraic()
    }

    /// Origin and destination in long algebraic notation ("e2e4").
    pub fn long_algebraic(self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Parses "e2e4" (either case).
    pub fn from_long_algebraic(s: &str) -> Result<Self, MoveParseError> {
        if s.len() != 4 || !s.is_ascii() {
            return Err(MoveParseError::InvalidLength(s.to_string()));
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        Ok(Move::new(from, to))
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::from_long_algebraic(s)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.long_algebraic())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.long_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn mv(s: &str) -> Move {
        s.parse().unwrap()
    }

    fn squares(list: &[&str]) -> Vec<Square> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn directions() {
        assert_eq!(mv("e2e4").direction(), Some(Direction::North));
        assert_eq!(mv("e4e2").direction(), Some(Direction::South));
        assert_eq!(mv("a1h8").direction(), Some(Direction::NorthEast));
        assert_eq!(mv("h1a8").direction(), Some(Direction::NorthWest));
        assert_eq!(mv("d4a4").direction(), Some(Direction::West));
        assert_eq!(mv("g1f3").direction(), None);
        assert_eq!(mv("e4e4").direction(), None);
    }

    #[test]
    fn inner_path() {
        assert_eq!(mv("a1d4").inner_path(), squares(&["b2", "c3"]));
        assert_eq!(mv("h1h4").inner_path(), squares(&["h2", "h3"]));
        assert!(mv("e1f1").inner_path().is_empty());
        assert!(mv("g1f3").inner_path().is_empty());
    }

    #[test]
    fn projected_path() {
        assert_eq!(mv("e1e3").projected_path(), squares(&["e4", "e5", "e6", "e7", "e8"]));
        assert_eq!(mv("a1c3").projected_path(), squares(&["d4", "e5", "f6", "g7", "h8"]));
        assert!(mv("a1a8").projected_path().is_empty());
        assert!(mv("b1c3").projected_path().is_empty());
    }

    #[test]
    fn notation() {
        let m = mv("E2E4");
        assert_eq!(m.algebraic(), "e2");
        assert_eq!(m.long_algebraic(), "e2e4");
        assert_eq!(format!("{:?}", m), "Move(e2e4)");
        assert!(matches!(
            "e2e".parse::<Move>(),
            Err(MoveParseError::InvalidLength(_))
        ));
        assert!(matches!(
            "e2e9".parse::<Move>(),
            Err(MoveParseError::InvalidSquare(_))
        ));
    }

    proptest! {
        #[test]
        fn inner_path_excludes_endpoints(from in 0u8..64, to in 0u8..64) {
            let m = Move::new(
                Square::from_index(from).unwrap(),
                Square::from_index(to).unwrap(),
            );
            prop_assume!(m.direction().is_some());
            let path = m.inner_path();
            prop_assert!(!path.contains(&m.from()));
            prop_assert!(!path.contains(&m.to()));
            prop_assert_eq!(path.len(), m.distance() as usize - 1);
        }

        #[test]
        fn projected_path_runs_to_the_edge(from in 0u8..64, to in 0u8..64) {
            let m = Move::new(
                Square::from_index(from).unwrap(),
                Square::from_index(to).unwrap(),
            );
            let projected = m.projected_path();
            match m.direction() {
                None => prop_assert!(projected.is_empty()),
                Some(direction) => {
                    let (dx, dy) = direction.delta();
                    let last = projected.last().copied().unwrap_or(m.to());
                    prop_assert!(last.offset(dx, dy).is_none());
                    for sq in projected {
                        prop_assert_eq!(Move::new(m.from(), sq).direction(), Some(direction));
                    }
                }
            }
        }
    }
}
