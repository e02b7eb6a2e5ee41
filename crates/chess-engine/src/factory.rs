//! Board construction from position strings, and named presets.

use chess_core::{FenError, FenParser, Square};

use crate::castling::CastlingRights;
use crate::config::RulesConfig;
use crate::piece::Piece;
use crate::Board;

/// Minor and major pieces on their home squares, no pawns.
pub const PIECES_ONLY: &str = "rnbqkbnr/8/8/8/8/8/8/RNBQKBNR w KQkq - 0 1";
/// Both pawn rows and nothing else, not even kings.
pub const PAWNS_ONLY: &str = "8/pppppppp/8/8/8/8/PPPPPPPP/8 w - - 0 1";
/// White may take the f5 pawn en passant.
pub const EN_PASSANT: &str = "rnbqkbnr/ppppp1pp/8/4Pp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3";

/// Parses a position string into a board with default rules.
pub fn from_fen(fen: &str) -> Result<Board, FenError> {
    from_fen_with_rules(fen, RulesConfig::default())
}

/// Parses a position string into a board governed by `rules`.
///
/// The game state is computed before returning, so a position with the side
/// to move in check starts in [`crate::GameState::Check`].
pub fn from_fen_with_rules(fen: &str, rules: RulesConfig) -> Result<Board, FenError> {
    let parsed = FenParser::parse(fen)?;

    let mut board = Board::empty(rules);
    for placement in &parsed.placements {
        board.place(placement.square, Piece::new(placement.kind, placement.color));
    }
    board.set_current_player(parsed.active_color);
    board.set_castling(CastlingRights::from_fen_field(&parsed.castling));
    board.set_en_passant(parsed.en_passant);
    board.set_counters(parsed.halfmove_clock, parsed.fullmove_number);
    board.refresh_state();
    Ok(board)
}

fn preset(fen: &str) -> Board {
    from_fen(fen).expect("preset position strings are valid")
}

/// Renders a board as a position string.
pub fn to_fen(board: &Board) -> String {
    let mut placement = String::new();
    for y in (0..8).rev() {
        let mut empty = 0;
        for x in 0..8 {
            let piece = Square::from_coords(x, y)
                .ok()
                .and_then(|sq| board.piece_at(sq));
            match piece {
                Some(piece) => {
                    if empty > 0 {
                        placement.push_str(&empty.to_string());
                        empty = 0;
                    }
                    placement.push(piece.fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            placement.push_str(&empty.to_string());
        }
        if y > 0 {
            placement.push('/');
        }
    }

    let en_passant = board
        .en_passant()
        .map_or_else(|| "-".to_string(), |sq| sq.to_string());

    format!(
        "{} {} {} {} {} {}",
        placement,
        board.current_player().fen_char(),
        board.castling().to_fen_field(),
        en_passant,
        board.half_move_clock(),
        board.full_move_count()
    )
}

impl Board {
    /// See [`from_fen`].
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        from_fen(fen)
    }

    /// See [`from_fen_with_rules`].
    pub fn from_fen_with_rules(fen: &str, rules: RulesConfig) -> Result<Self, FenError> {
        from_fen_with_rules(fen, rules)
    }

    /// The standard initial position.
    pub fn initial() -> Self {
        preset(FenParser::STARTPOS)
    }

    /// See [`PIECES_ONLY`].
    pub fn pieces_only() -> Self {
        preset(PIECES_ONLY)
    }

    /// See [`PAWNS_ONLY`].
    pub fn pawns_only() -> Self {
        preset(PAWNS_ONLY)
    }

    /// See [`EN_PASSANT`].
    pub fn en_passant_scenario() -> Self {
        preset(EN_PASSANT)
    }

    pub fn to_fen(&self) -> String {
        to_fen(self)
    }
}
