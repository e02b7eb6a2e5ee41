//! Core value types for the rules engine.
//!
//! This crate provides the leaf types every other crate builds on:
//! - [`Color`] and [`PieceKind`] for piece identity
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Direction`] for the eight lines a piece can travel along
//! - [`Move`], an origin/destination pair with derived geometry
//! - [`FenParser`] for compact position strings

mod color;
mod direction;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use direction::Direction;
pub use fen::{FenError, FenParser, Placement};
pub use mov::{Move, MoveParseError};
pub use piece::PieceKind;
pub use square::{File, Rank, Square, SquareError};
