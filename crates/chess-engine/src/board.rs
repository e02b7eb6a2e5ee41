//! Board state: placement, side to move, castling, clocks and history.

use chess_core::{Color, Move, PieceKind, Square};
use std::collections::HashMap;
use std::fmt;

use crate::castling::{CastlingRights, CastlingSide};
use crate::config::RulesConfig;
use crate::evaluator;
use crate::move_result::MoveResult;
use crate::piece::Piece;
use crate::zobrist;

/// Game state, recomputed after every ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Normal,
    Check,
    Checkmate,
    Draw,
}

impl GameState {
    /// True once no further move may be played.
    #[inline]
    pub const fn is_over(self) -> bool {
        matches!(self, GameState::Checkmate | GameState::Draw)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameState::Normal => "normal",
            GameState::Check => "check",
            GameState::Checkmate => "checkmate",
            GameState::Draw => "draw",
        };
        f.write_str(name)
    }
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    /// No legal moves but not in check.
    Stalemate,
    /// Neither side can mate.
    InsufficientMaterial,
    /// Half-move clock reached [`RulesConfig::fifty_move_plies`].
    FiftyMoveRule,
    /// Half-move clock reached one and a half times the fifty-move threshold.
    SeventyFiveMoveRule,
    ThreefoldRepetition,
    FivefoldRepetition,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DrawReason::Stalemate => "stalemate",
            DrawReason::InsufficientMaterial => "insufficient material",
            DrawReason::FiftyMoveRule => "fifty-move rule",
            DrawReason::SeventyFiveMoveRule => "seventy-five-move rule",
            DrawReason::ThreefoldRepetition => "threefold repetition",
            DrawReason::FivefoldRepetition => "fivefold repetition",
        };
        f.write_str(name)
    }
}

/// A repetition snapshot: two consecutive half-moves and the position they
/// produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FullMove {
    /// The half-move before `second`; `None` for the first ply of a game.
    pub first: Option<Move>,
    pub second: Move,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    /// Zobrist fingerprint of placement and side to move.
    pub placement: u64,
}

/// One square-level mutation, as reported to a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardChange {
    Removed(Square),
    Placed(Square, Piece),
}

/// The authoritative position.
///
/// The square map is the only record of where pieces are; piece positions
/// are found by scanning it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pieces: HashMap<Square, Piece>,
    current_player: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    half_move_clock: u32,
    full_move_count: u32,
    move_history: Vec<FullMove>,
    last_half_move: Option<Move>,
    game_state: GameState,
    draw_reason: Option<DrawReason>,
    rules: RulesConfig,
}

impl Default for Board {
    fn default() -> Self {
        Board::empty(RulesConfig::default())
    }
}

impl Board {
    /// A board with no pieces, White to move, no castling rights.
    pub fn empty(rules: RulesConfig) -> Self {
        Board {
            pieces: HashMap::with_capacity(32),
            current_player: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            half_move_clock: 0,
            full_move_count: 1,
            move_history: Vec::new(),
            last_half_move: None,
            game_state: GameState::Normal,
            draw_reason: None,
            rules,
        }
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.pieces.get(&square).copied()
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        !self.pieces.contains_key(&square)
    }

    /// True if `square` holds a piece of `color`.
    #[inline]
    pub fn is_occupied_by(&self, square: Square, color: Color) -> bool {
        self.piece_at(square).is_some_and(|p| p.color == color)
    }

    /// Every occupied square, in no particular order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces.iter().map(|(square, piece)| (*square, *piece))
    }

    /// Pieces of one color, sorted by square.
    pub fn pieces_of(&self, color: Color) -> Vec<(Square, Piece)> {
        let mut pieces: Vec<_> = self.pieces().filter(|(_, p)| p.color == color).collect();
        pieces.sort_unstable_by_key(|(square, _)| *square);
        pieces
    }

    #[inline]
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// First square holding `piece`, scanning in square order.
    pub fn position_of(&self, piece: Piece) -> Option<Square> {
        Square::all().find(|square| self.piece_at(*square) == Some(piece))
    }

    /// Square of the king of `color`, if there is one.
    #[inline]
    pub fn king(&self, color: Color) -> Option<Square> {
        self.pieces
            .iter()
            .find(|(_, p)| p.is(PieceKind::King, color))
            .map(|(square, _)| *square)
    }

    #[inline]
    pub fn current_player(&self) -> Color {
        self.current_player
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn has_castling(&self, side: CastlingSide) -> bool {
        self.castling.has(side)
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn half_move_clock(&self) -> u32 {
        self.half_move_clock
    }

    #[inline]
    pub fn full_move_count(&self) -> u32 {
        self.full_move_count
    }

    /// Snapshots recorded so far, oldest first.
    #[inline]
    pub fn history(&self) -> &[FullMove] {
        &self.move_history
    }

    #[inline]
    pub fn last_half_move(&self) -> Option<Move> {
        self.last_half_move
    }

    #[inline]
    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    /// Set only while the state is [`GameState::Draw`].
    #[inline]
    pub fn draw_reason(&self) -> Option<DrawReason> {
        self.draw_reason
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_state.is_over()
    }

    #[inline]
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub(crate) fn place(&mut self, square: Square, piece: Piece) {
        self.pieces.insert(square, piece);
    }

    pub(crate) fn take(&mut self, square: Square) -> Option<Piece> {
        self.pieces.remove(&square)
    }

    pub(crate) fn set_current_player(&mut self, color: Color) {
        self.current_player = color;
    }

    pub(crate) fn set_castling(&mut self, castling: CastlingRights) {
        self.castling = castling;
    }

    pub(crate) fn set_en_passant(&mut self, square: Option<Square>) {
        self.en_passant = square;
    }

    pub(crate) fn set_counters(&mut self, half_move_clock: u32, full_move_count: u32) {
        self.half_move_clock = half_move_clock;
        self.full_move_count = full_move_count;
    }

    pub(crate) fn set_rules(&mut self, rules: RulesConfig) {
        self.rules = rules;
    }

    pub(crate) fn set_game_state(&mut self, state: GameState, reason: Option<DrawReason>) {
        self.game_state = state;
        self.draw_reason = reason;
    }

    /// Recomputes the game state for the side to move.
    pub(crate) fn refresh_state(&mut self) {
        let (state, reason) = evaluator::game_state(self);
        self.set_game_state(state, reason);
    }

    /// Applies a legal move and its side effects, then advances the turn.
    ///
    /// `result` must come from evaluating `mv` on this exact board, and
    /// `promotion` must be set when `result` is a promotion. Returns the
    /// square-level changes in the order they were made.
    pub(crate) fn apply(
        &mut self,
        mv: Move,
        result: &MoveResult,
        promotion: Option<PieceKind>,
    ) -> Vec<BoardChange> {
        let mut changes = Vec::new();

        for side in result.lost_castling() {
            self.castling.revoke(*side);
        }

        for square in result.removed() {
            if self.take(*square).is_some() {
                changes.push(BoardChange::Removed(*square));
            }
        }

        for relocation in result.relocations() {
            if let Some(piece) = self.take(relocation.from()) {
                changes.push(BoardChange::Removed(relocation.from()));
                self.place(relocation.to(), piece);
                changes.push(BoardChange::Placed(relocation.to(), piece));
            }
        }

        if result.resets_half_move_clock() {
            self.half_move_clock = 0;
        } else {
            self.half_move_clock = self.half_move_clock.saturating_add(1);
        }

        self.en_passant = result.en_passant();

        if let Some(piece) = self.take(mv.from()) {
            changes.push(BoardChange::Removed(mv.from()));
            if self.take(mv.to()).is_some() {
                changes.push(BoardChange::Removed(mv.to()));
            }
            let landed = match promotion {
                Some(kind) if result.is_promotion() => Piece::new(kind, piece.color),
                _ => piece,
            };
            self.place(mv.to(), landed);
            changes.push(BoardChange::Placed(mv.to(), landed));
        }

        self.move_history.push(FullMove {
            first: self.last_half_move,
            second: mv,
            castling: self.castling,
            en_passant: self.en_passant,
            placement: zobrist::placement_hash(self),
        });
        self.last_half_move = Some(mv);

        self.current_player = !self.current_player;
        if self.current_player == Color::White {
            self.full_move_count = self.full_move_count.saturating_add(1);
        }

        self.refresh_state();
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules;

    fn play(board: &mut Board, text: &str) -> Vec<BoardChange> {
        let mv: Move = text.parse().unwrap();
        let result = rules::evaluate(board, mv);
        assert!(result.is_valid(), "{text} should be legal");
        let promotion = result.is_promotion().then_some(PieceKind::Queen);
        board.apply(mv, &result, promotion)
    }

    #[test]
    fn apply_advances_turn_and_counters() {
        let mut board = Board::from_fen(chess_core::FenParser::STARTPOS).unwrap();
        play(&mut board, "g1f3");
        assert_eq!(board.current_player(), Color::Black);
        assert_eq!(board.full_move_count(), 1);
        assert_eq!(board.half_move_clock(), 1);

        play(&mut board, "e7e5");
        assert_eq!(board.current_player(), Color::White);
        assert_eq!(board.full_move_count(), 2);
        assert_eq!(board.half_move_clock(), 0);
        assert_eq!(board.en_passant(), Some("e6".parse().unwrap()));

        play(&mut board, "b1c3");
        assert_eq!(board.en_passant(), None);
        assert_eq!(board.history().len(), 3);
        assert_eq!(board.last_half_move(), Some("b1c3".parse().unwrap()));
        assert_eq!(board.history()[2].first, Some("e7e5".parse().unwrap()));
    }

    #[test]
    fn castling_reports_rook_relocation() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let changes = play(&mut board, "e1g1");
        assert!(changes.contains(&BoardChange::Removed(Square::H1)));
        assert!(changes.contains(&BoardChange::Placed(
            Square::F1,
            Piece::new(PieceKind::Rook, Color::White)
        )));
        assert_eq!(
            board.piece_at(Square::G1),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert!(!board.has_castling(CastlingSide::WhiteKingside));
        assert!(!board.has_castling(CastlingSide::WhiteQueenside));
        assert!(board.has_castling(CastlingSide::BlackKingside));
    }

    #[test]
    fn capture_reports_removal_of_victim() {
        let mut board = Board::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 5 10").unwrap();
        let changes = play(&mut board, "e4d5");
        let to: Square = "d5".parse().unwrap();
        assert_eq!(
            changes,
            vec![
                BoardChange::Removed("e4".parse().unwrap()),
                BoardChange::Removed(to),
                BoardChange::Placed(to, Piece::new(PieceKind::Pawn, Color::White)),
            ]
        );
        assert_eq!(board.half_move_clock(), 0);
        assert_eq!(board.piece_count(), 3);
    }

    #[test]
    fn promotion_replaces_pawn() {
        let mut board = Board::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        play(&mut board, "e7e8");
        assert_eq!(
            board.piece_at(Square::E8),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
    }

    #[test]
    fn lookups() {
        let board = Board::from_fen(chess_core::FenParser::STARTPOS).unwrap();
        assert_eq!(board.king(Color::White), Some(Square::E1));
        assert_eq!(board.king(Color::Black), Some(Square::E8));
        assert_eq!(
            board.position_of(Piece::new(PieceKind::Queen, Color::Black)),
            Some(Square::D8)
        );
        assert_eq!(board.pieces_of(Color::White).len(), 16);
        assert!(board.is_occupied_by(Square::A1, Color::White));
        assert!(!board.is_occupied_by(Square::A1, Color::Black));
        assert_eq!(Board::default().king(Color::White), None);
    }

    #[test]
    fn counters_saturate_at_their_maximum() {
        let fen = "4k3/8/8/8/8/8/8/R3K3 b - - 4294967295 4294967295";
        let mut board = Board::from_fen(fen).unwrap();
        play(&mut board, "e8d8");
        assert_eq!(board.full_move_count(), u32::MAX);
        assert_eq!(board.half_move_clock(), u32::MAX);
        assert_eq!(board.current_player(), Color::White);
    }
}
