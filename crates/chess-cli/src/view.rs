//! A [`ChessView`] for the terminal: board changes go to the log, game
//! messages to stdout.

use chess_core::{PieceKind, Square};
use chess_engine::{ChessView, GameState, Piece};

pub struct TerminalView {
    echo: bool,
    promotion: Option<PieceKind>,
}

impl TerminalView {
    /// `echo` prints controller messages ("check", "draw by ...") to stdout.
    pub fn new(echo: bool) -> Self {
        TerminalView {
            echo,
            promotion: None,
        }
    }

    /// Piece to answer the next promotion question with. Queen when unset.
    pub fn set_promotion(&mut self, kind: Option<PieceKind>) {
        self.promotion = kind;
    }
}

impl ChessView for TerminalView {
    fn put_piece(&mut self, piece: Piece, square: Square) {
        tracing::trace!(%square, ?piece, "put");
    }

    fn remove_piece(&mut self, square: Square) {
        tracing::trace!(%square, "remove");
    }

    fn promotion_choice(&mut self, choices: &[PieceKind]) -> Option<PieceKind> {
        let kind = self.promotion.take().unwrap_or(PieceKind::Queen);
        tracing::debug!(?choices, %kind, "promotion answered");
        Some(kind)
    }

    fn game_state_changed(&mut self, state: GameState) {
        tracing::debug!(%state, "game state");
    }

    fn message(&mut self, text: &str) {
        if self.echo {
            println!("{text}");
        }
    }
}
