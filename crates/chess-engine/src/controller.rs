//! Move orchestration between a board and a presentation layer.
//!
//! The [`Controller`] owns the board and is the only component that mutates
//! it. Every accepted move is reported square by square to a [`ChessView`].

use chess_core::{FenError, Move, PieceKind, Square};
use thiserror::Error;

use crate::board::{BoardChange, DrawReason, GameState};
use crate::config::RulesConfig;
use crate::evaluator;
use crate::movegen;
use crate::piece::Piece;
use crate::rules;
use crate::Board;

/// Broken contracts between the controller and its view.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ControllerError {
    /// A promotion was required but the view gave no piece.
    #[error("promotion required but no piece was chosen")]
    PromotionUnanswered,
    /// The view chose a piece that is not a promotion option.
    #[error("cannot promote to {0}")]
    InvalidPromotion(PieceKind),
    /// No draw condition is met, or draws are not claimable.
    #[error("cannot claim draw: conditions not met")]
    CannotClaimDraw,
}

/// The presentation layer driven by a [`Controller`].
pub trait ChessView {
    fn put_piece(&mut self, piece: Piece, square: Square);

    fn remove_piece(&mut self, square: Square);

    /// Asked before a promotion is applied. Must return one of `choices`.
    fn promotion_choice(&mut self, choices: &[PieceKind]) -> Option<PieceKind>;

    /// Fired after every completed move.
    fn game_state_changed(&mut self, state: GameState);

    fn message(&mut self, _text: &str) {}
}

/// A view that renders nothing and always promotes to a queen.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl ChessView for NullView {
    fn put_piece(&mut self, _piece: Piece, _square: Square) {}

    fn remove_piece(&mut self, _square: Square) {}

    fn promotion_choice(&mut self, _choices: &[PieceKind]) -> Option<PieceKind> {
        Some(PieceKind::Queen)
    }

    fn game_state_changed(&mut self, _state: GameState) {}
}

/// One callback received by a [`RecordingView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Put(Piece, Square),
    Removed(Square),
    PromotionAsked,
    StateChanged(GameState),
    Message(String),
}

/// A view that records every callback, for tests and tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingView {
    pub events: Vec<ViewEvent>,
    /// What to answer when a promotion piece is requested.
    pub promotion_reply: Option<PieceKind>,
}

impl Default for RecordingView {
    fn default() -> Self {
        RecordingView {
            events: Vec::new(),
            promotion_reply: Some(PieceKind::Queen),
        }
    }
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_promotion(reply: Option<PieceKind>) -> Self {
        RecordingView {
            promotion_reply: reply,
            ..Self::default()
        }
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// The last state reported, if any.
    pub fn last_state(&self) -> Option<GameState> {
        self.events.iter().rev().find_map(|event| match event {
            ViewEvent::StateChanged(state) => Some(*state),
            _ => None,
        })
    }
}

impl ChessView for RecordingView {
    fn put_piece(&mut self, piece: Piece, square: Square) {
        self.events.push(ViewEvent::Put(piece, square));
    }

    fn remove_piece(&mut self, square: Square) {
        self.events.push(ViewEvent::Removed(square));
    }

    fn promotion_choice(&mut self, _choices: &[PieceKind]) -> Option<PieceKind> {
        self.events.push(ViewEvent::PromotionAsked);
        self.promotion_reply
    }

    fn game_state_changed(&mut self, state: GameState) {
        self.events.push(ViewEvent::StateChanged(state));
    }

    fn message(&mut self, text: &str) {
        self.events.push(ViewEvent::Message(text.to_string()));
    }
}

/// Owns the board and applies accepted moves.
pub struct Controller<V: ChessView> {
    board: Board,
    view: V,
    rules: RulesConfig,
}

impl<V: ChessView> Controller<V> {
    /// Starts a standard game with default rules.
    pub fn new(view: V) -> Self {
        Self::with_rules(view, RulesConfig::default())
    }

    /// Starts a standard game governed by `rules`.
    pub fn with_rules(view: V, rules: RulesConfig) -> Self {
        let mut controller = Controller {
            board: Board::empty(rules),
            view,
            rules,
        };
        controller.new_game();
        controller
    }

    /// Resets to the initial position and redraws the view.
    pub fn new_game(&mut self) {
        let mut board = Board::initial();
        board.set_rules(self.rules);
        board.refresh_state();
        self.replace_board(board);
    }

    /// Replaces the board with a position string and redraws the view.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `fen` is malformed; the current game is
    /// left as it was.
    pub fn load_position(&mut self, fen: &str) -> Result<(), FenError> {
        let board = Board::from_fen_with_rules(fen, self.rules)?;
        self.replace_board(board);
        Ok(())
    }

    fn replace_board(&mut self, board: Board) {
        for square in Square::all().filter(|sq| !self.board.is_empty(*sq)) {
            self.view.remove_piece(square);
        }
        self.board = board;
        for square in Square::all() {
            if let Some(piece) = self.board.piece_at(square) {
                self.view.put_piece(piece, square);
            }
        }
        tracing::debug!(fen = %self.board.to_fen(), "position loaded");
        self.view.game_state_changed(self.board.game_state());
    }

    /// Plays `from -> to` for the side to move.
    ///
    /// Returns `Ok(false)` without touching the board when the game is over,
    /// when `from` holds no piece of the side to move, or when the move is
    /// illegal.
    ///
    /// # Errors
    ///
    /// When the move promotes, the view is asked for a piece before anything
    /// changes. No answer, or an answer outside
    /// [`PieceKind::PROMOTION_CHOICES`], is an error and the board is left
    /// untouched.
    pub fn attempt_move(&mut self, from: Square, to: Square) -> Result<bool, ControllerError> {
        let mv = Move::new(from, to);

        if self.board.is_game_over() {
            tracing::trace!(%mv, state = %self.board.game_state(), "rejected: game is over");
            self.view.message("the game is over");
            return Ok(false);
        }
        let Some(piece) = self.board.piece_at(from) else {
            tracing::trace!(%mv, "rejected: no piece on origin");
            return Ok(false);
        };
        if piece.color != self.board.current_player() {
            tracing::trace!(%mv, %piece, "rejected: not this side's turn");
            return Ok(false);
        }

        let result = rules::evaluate(&self.board, mv);
        if !result.is_valid() {
            tracing::trace!(%mv, %piece, "rejected: illegal move");
            return Ok(false);
        }

        let promotion = if result.is_promotion() {
            match self.view.promotion_choice(&PieceKind::PROMOTION_CHOICES) {
                None => {
                    tracing::warn!(%mv, "view gave no promotion piece");
                    return Err(ControllerError::PromotionUnanswered);
                }
                Some(kind) if !PieceKind::PROMOTION_CHOICES.contains(&kind) => {
                    tracing::warn!(%mv, %kind, "view chose an invalid promotion piece");
                    return Err(ControllerError::InvalidPromotion(kind));
                }
                Some(kind) => Some(kind),
            }
        } else {
            None
        };

        let changes = self.board.apply(mv, &result, promotion);
        tracing::debug!(
            mv = %mv.long_algebraic(),
            %piece,
            removed = ?result.removed(),
            relocations = ?result.relocations(),
            lost_castling = ?result.lost_castling(),
            en_passant = ?result.en_passant(),
            ?promotion,
            "move applied"
        );
        for change in changes {
            match change {
                BoardChange::Removed(square) => self.view.remove_piece(square),
                BoardChange::Placed(square, piece) => self.view.put_piece(piece, square),
            }
        }
        self.announce();
        Ok(true)
    }

    fn announce(&mut self) {
        let state = self.board.game_state();
        match state {
            GameState::Normal => {}
            GameState::Check | GameState::Checkmate => {
                tracing::info!(side = %self.board.current_player(), %state, "game state changed");
                self.view.message(&state.to_string());
            }
            GameState::Draw => {
                let reason = self.board.draw_reason();
                tracing::info!(?reason, "game drawn");
                match reason {
                    Some(reason) => self.view.message(&format!("draw by {reason}")),
                    None => self.view.message("draw"),
                }
            }
        }
        self.view.game_state_changed(state);
    }

    /// True if the side to move may claim a draw now.
    pub fn can_claim_draw(&self) -> bool {
        evaluator::claimable_draw(&self.board).is_some()
    }

    /// Ends the game as a draw by threefold repetition or the fifty-move rule.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::CannotClaimDraw`] if neither applies or
    /// draws are not claimable under the current rules.
    pub fn claim_draw(&mut self) -> Result<DrawReason, ControllerError> {
        let reason =
            evaluator::claimable_draw(&self.board).ok_or(ControllerError::CannotClaimDraw)?;
        self.board.set_game_state(GameState::Draw, Some(reason));
        self.announce();
        Ok(reason)
    }

    /// Legal moves for the side to move, sorted.
    pub fn legal_moves(&self) -> Vec<Move> {
        movegen::legal_moves(&self.board)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn view(&self) -> &V {
        &self.view
    }

    #[inline]
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    #[inline]
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }
}

impl Default for Controller<NullView> {
    fn default() -> Self {
        Controller::new(NullView)
    }
}
