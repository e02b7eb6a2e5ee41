//! Command output, printable as text or serialized to JSON.

use std::fmt;
use std::time::Duration;

use chess_core::{Color, Move, PieceKind};
use chess_engine::{evaluator, movegen, Board};
use serde::Serialize;

/// Legal moves of the side to move. Promotions are listed once per piece.
#[derive(Serialize)]
pub struct MovesReport {
    side: String,
    count: usize,
    moves: Vec<String>,
}

impl MovesReport {
    pub fn new(board: &Board, moves: &[Move]) -> Self {
        let mut names = Vec::with_capacity(moves.len());
        for mv in moves {
            if movegen::is_promotion(board, *mv) {
                for kind in PieceKind::PROMOTION_CHOICES {
                    names.push(format!("{mv}{}", kind.to_fen_char(Color::Black)));
                }
            } else {
                names.push(mv.long_algebraic());
            }
        }
        MovesReport {
            side: board.current_player().to_string(),
            count: names.len(),
            moves: names,
        }
    }
}

impl fmt::Display for MovesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} to move, {} legal moves", self.side, self.count)?;
        for line in self.moves.chunks(10) {
            writeln!(f, "  {}", line.join(" "))?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
pub struct DivideEntry {
    #[serde(rename = "move")]
    mv: String,
    nodes: u64,
}

#[derive(Serialize)]
pub struct PerftReport {
    depth: u32,
    nodes: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    divide: Vec<DivideEntry>,
    elapsed_ms: u64,
}

impl PerftReport {
    pub fn total(depth: u32, nodes: u64) -> Self {
        PerftReport {
            depth,
            nodes,
            divide: Vec::new(),
            elapsed_ms: 0,
        }
    }

    pub fn divided(depth: u32, divide: Vec<(String, u64)>) -> Self {
        let nodes = divide.iter().map(|(_, n)| n).sum();
        PerftReport {
            depth,
            nodes,
            divide: divide
                .into_iter()
                .map(|(mv, nodes)| DivideEntry { mv, nodes })
                .collect(),
            elapsed_ms: 0,
        }
    }

    pub fn timed(mut self, elapsed: Duration) -> Self {
        self.elapsed_ms = elapsed.as_millis() as u64;
        self
    }
}

impl fmt::Display for PerftReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.divide {
            writeln!(f, "{}: {}", entry.mv, entry.nodes)?;
        }
        if !self.divide.is_empty() {
            writeln!(f)?;
        }
        writeln!(
            f,
            "perft({}) = {} ({} ms)",
            self.depth, self.nodes, self.elapsed_ms
        )
    }
}

/// Position summary after loading or playing moves.
#[derive(Serialize)]
pub struct StateReport {
    fen: String,
    side_to_move: String,
    state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    draw_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    claimable_draw: Option<String>,
    half_move_clock: u32,
    full_move: u32,
    repetitions: usize,
}

impl StateReport {
    pub fn new(board: &Board) -> Self {
        StateReport {
            fen: board.to_fen(),
            side_to_move: board.current_player().to_string(),
            state: board.game_state().to_string(),
            draw_reason: board.draw_reason().map(|r| r.to_string()),
            claimable_draw: evaluator::claimable_draw(board).map(|r| r.to_string()),
            half_move_clock: board.half_move_clock(),
            full_move: board.full_move_count(),
            repetitions: evaluator::repetitions(board),
        }
    }
}

impl fmt::Display for StateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "fen:        {}", self.fen)?;
        writeln!(f, "to move:    {}", self.side_to_move)?;
        match &self.draw_reason {
            Some(reason) => writeln!(f, "state:      {} ({reason})", self.state)?,
            None => writeln!(f, "state:      {}", self.state)?,
        }
        if let Some(reason) = &self.claimable_draw {
            writeln!(f, "claimable:  {reason}")?;
        }
        writeln!(
            f,
            "clocks:     half-move {}, full move {}",
            self.half_move_clock, self.full_move
        )?;
        writeln!(f, "repeated:   {}", self.repetitions)
    }
}
