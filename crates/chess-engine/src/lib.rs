//! Chess rules engine.
//!
//! This crate provides:
//! - [`Board`] - the authoritative position: placement, side to move,
//!   castling rights, en-passant target, clocks and repetition history
//! - [`rules`] - one [`PieceRules`] implementation per piece kind, with pin
//!   detection
//! - [`evaluator`] - check, checkmate, stalemate and every draw condition
//! - [`Controller`] - applies accepted moves and reports them to a [`ChessView`]
//! - [`movegen`] - legal move enumeration and perft
//! - [`RulesConfig`] - tunable rule parameters loaded from TOML
//!
//! # Architecture
//!
//! Pieces are plain values in the board's square map. Rules receive the
//! board explicitly and return a [`MoveResult`] describing every side effect
//! of a legal move; only the controller (or a trial replay on a clone)
//! turns that result into board mutations.
//!
//! # Example
//!
//! ```
//! use chess_engine::{Controller, GameState, NullView};
//!
//! let mut game = Controller::new(NullView);
//! assert_eq!(game.legal_moves().len(), 20);
//!
//! for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
//!     let mv: chess_core::Move = mv.parse().unwrap();
//!     assert!(game.attempt_move(mv.from(), mv.to()).unwrap());
//! }
//! assert_eq!(game.board().game_state(), GameState::Checkmate);
//! ```

mod board;
mod castling;
mod config;
mod controller;
pub mod evaluator;
pub mod factory;
mod move_result;
pub mod movegen;
mod piece;
pub mod rules;
mod zobrist;

pub use board::{Board, BoardChange, DrawReason, FullMove, GameState};
pub use castling::{CastlingRights, CastlingSide};
pub use config::{CastlingRevocation, ConfigError, RulesConfig};
pub use controller::{ChessView, Controller, ControllerError, NullView, RecordingView, ViewEvent};
pub use move_result::MoveResult;
pub use movegen::{legal_moves, legal_moves_par};
pub use movegen::perft::{perft, perft_divide, perft_par};
pub use piece::Piece;
pub use rules::PieceRules;
pub use zobrist::placement_hash;
