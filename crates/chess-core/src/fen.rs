//! Compact position strings (FEN-like) used by fixtures and debugging tools.
//!
//! A position string has six space-separated fields:
//! placement, side to move, castling letters, en-passant square,
//! half-move clock and full-move number.

use thiserror::Error;

use crate::{Color, PieceKind, Square};

/// Errors that can occur when parsing a position string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid position string: expected 6 fields, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid side to move: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// A piece placed on a square by the placement field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub square: Square,
    pub kind: PieceKind,
    pub color: Color,
}

/// A validated, decoded position string.
///
/// The engine turns this into its own board representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Every piece listed by the placement field, rank 8 first.
    pub placements: Vec<Placement>,
    pub active_color: Color,
    /// Castling letters as given ("KQkq", "Kq", "-").
    pub castling: String,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl FenParser {
    /// The standard initial position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses and validates a position string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let placements = Self::parse_piece_placement(parts[0])?;

        let active_color = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = parts[2];
        Self::validate_castling(castling)?;

        let en_passant = Self::parse_en_passant(parts[3], active_color)?;

        let halfmove_clock = parts[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;

        let fullmove_number = parts[5]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;

        Ok(FenParser {
            placements,
            active_color,
            castling: castling.to_string(),
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_piece_placement(placement: &str) -> Result<Vec<Placement>, FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut placements = Vec::new();
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i as i8;
            let mut file = 0i8;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += skip as i8;
                } else if let Some((kind, color)) = PieceKind::from_fen_char(c) {
                    let square = Square::from_coords(file, rank).map_err(|_| {
                        FenError::InvalidPiecePlacement(format!("rank {} overflows", rank + 1))
                    })?;
                    placements.push(Placement {
                        square,
                        kind,
                        color,
                    });
                    file += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        rank + 1
                    )));
                }
                if file > 8 {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "rank {} overflows",
                        rank + 1
                    )));
                }
            }
            if file != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    rank + 1,
                    file
                )));
            }
        }

        for color in Color::BOTH {
            let kings = placements
                .iter()
                .filter(|p| p.kind == PieceKind::King && p.color == color)
                .count();
            if kings > 1 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "{} has {} kings",
                    color, kings
                )));
            }
        }

        Ok(placements)
    }

    fn validate_castling(castling: &str) -> Result<(), FenError> {
        if castling == "-" {
            return Ok(());
        }
        match castling.chars().find(|c| !"KQkq".contains(*c)) {
            Some(c) => Err(FenError::InvalidCastlingRights(format!(
                "invalid character '{}' in '{}'",
                c, castling
            ))),
            None => Ok(()),
        }
    }

    /// The target sits behind a pawn the opponent just double-pushed: rank 6
    /// when White is to move, rank 3 when Black is.
    fn parse_en_passant(ep: &str, active_color: Color) -> Result<Option<Square>, FenError> {
        if ep == "-" {
            return Ok(None);
        }
        let square = Square::from_algebraic(ep)
            .map_err(|_| FenError::InvalidEnPassantSquare(ep.to_string()))?;
        let expected = match active_color {
            Color::White => 5,
            Color::Black => 2,
        };
        if square.y() != expected {
            return Err(FenError::InvalidEnPassantSquare(ep.to_string()));
        }
        Ok(Some(square))
    }
}
