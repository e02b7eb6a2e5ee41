//! Zobrist fingerprints of piece placement.
//!
//! Each piece on each square (6 kinds x 2 colors x 64 squares) and the side
//! to move get a fixed random key; a placement hashes to the XOR of the keys
//! present. Repetition snapshots store this fingerprint instead of a copy of
//! the square map.

use chess_core::{Color, Square};

use crate::board::Board;
use crate::piece::Piece;

/// Zobrist hash keys, generated from a fixed seed.
pub struct ZobristKeys {
    /// Keys for pieces: [kind][color][square]
    pieces: [[[u64; 64]; 2]; 6],
    /// XORed in when Black is to move.
    black_to_move: u64,
}

impl ZobristKeys {
    pub const fn new() -> Self {
        // xorshift64, usable in const context
        const fn next_random(state: u64) -> u64 {
            let mut x = state;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        }

        let mut state = 0x9E3779B97F4A7C15u64;
        let mut pieces = [[[0u64; 64]; 2]; 6];

        let mut kind = 0;
        while kind < 6 {
            let mut color = 0;
            while color < 2 {
                let mut square = 0;
                while square < 64 {
                    state = next_random(state);
                    pieces[kind][color][square] = state;
                    square += 1;
                }
                color += 1;
            }
            kind += 1;
        }

        let black_to_move = next_random(state);

        ZobristKeys {
            pieces,
            black_to_move,
        }
    }

    #[inline]
    pub const fn piece_key(&self, piece: Piece, square: Square) -> u64 {
        self.pieces[piece.kind.index()][piece.color.index()][square.index() as usize]
    }

    #[inline]
    pub const fn side_key(&self, side: Color) -> u64 {
        match side {
            Color::White => 0,
            Color::Black => self.black_to_move,
        }
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

/// Global Zobrist keys (initialized at compile time).
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

/// Fingerprint of the board's piece placement and side to move.
pub fn placement_hash(board: &Board) -> u64 {
    board
        .pieces()
        .fold(ZOBRIST.side_key(board.current_player()), |hash, (square, piece)| {
            hash ^ ZOBRIST.piece_key(piece, square)
        })
}
