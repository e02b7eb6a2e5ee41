//! King safety and game-end detection.
//!
//! Every query takes the board explicitly and tolerates a missing king: with
//! no king of the relevant color there is no check, no mate and no stalemate.

use chess_core::{Color, Move, PieceKind, Square};

use crate::board::{DrawReason, GameState};
use crate::rules;
use crate::Board;

/// True if the piece on `from` attacks `target`.
///
/// Pins are ignored: a pinned piece still gives check. Pawns attack one
/// step diagonally forward only. Sliders need an empty inner path, except
/// that `transparent` (if set) is treated as empty.
fn attacks_through(
    board: &Board,
    from: Square,
    target: Square,
    transparent: Option<Square>,
) -> bool {
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    if from == target {
        return false;
    }
    let mv = Move::new(from, target);
    let (dx, dy) = rules::offset(mv);

    match piece.kind {
        PieceKind::Pawn => dx.abs() == 1 && dy == piece.color.pawn_direction(),
        PieceKind::Knight => matches!((dx.abs(), dy.abs()), (1, 2) | (2, 1)),
        PieceKind::King => mv.distance() == 1,
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            let Some(direction) = mv.direction() else {
                return false;
            };
            let pattern = (direction.is_diagonal() && piece.kind.slides_diagonally())
                || (direction.is_orthogonal() && piece.kind.slides_orthogonally());
            pattern
                && mv
                    .inner_path()
                    .iter()
                    .all(|sq| Some(*sq) == transparent || board.is_empty(*sq))
        }
    }
}

/// True if the piece on `from` attacks `target`.
pub fn attacks(board: &Board, from: Square, target: Square) -> bool {
    attacks_through(board, from, target, None)
}

/// Squares of `by`'s pieces attacking `square`.
pub fn square_attacked_by(board: &Board, square: Square, by: Color) -> Vec<Square> {
    board
        .pieces_of(by)
        .into_iter()
        .filter(|(from, _)| attacks(board, *from, square))
        .map(|(from, _)| from)
        .collect()
}

/// True if `defender`'s enemies attack `square`.
///
/// The defending king does not block sliders, so a king cannot step back
/// along the line it is being checked on.
pub fn square_under_attack(board: &Board, square: Square, defender: Color) -> bool {
    let transparent = board.king(defender);
    board
        .pieces_of(defender.opposite())
        .into_iter()
        .any(|(from, _)| attacks_through(board, from, square, transparent))
}

/// Enemy pieces attacking the king of `color`. Empty without a king.
pub fn attackers(board: &Board, color: Color) -> Vec<Square> {
    match board.king(color) {
        Some(king) => square_attacked_by(board, king, color.opposite()),
        None => Vec::new(),
    }
}

#[inline]
pub fn is_check(board: &Board, color: Color) -> bool {
    !attackers(board, color).is_empty()
}

/// Moves by `color` that answer a single check by interposing or capturing.
///
/// Empty unless exactly one piece gives check. The only king move listed is
/// the capture of an adjacent, undefended attacker.
pub fn defending_moves(board: &Board, color: Color) -> Vec<Move> {
    let Some(king) = board.king(color) else {
        return Vec::new();
    };
    let checkers = attackers(board, color);
    let [attacker] = checkers.as_slice() else {
        return Vec::new();
    };
    let attacker = *attacker;

    let mut targets = Move::new(attacker, king).inner_path();
    targets.push(attacker);

    // A pawn that just double-pushed into check can also be taken en passant.
    let en_passant = board.en_passant().filter(|ep| {
        board.piece_at(attacker).is_some_and(|p| {
            p.kind == PieceKind::Pawn && ep.offset(0, p.color.pawn_direction()) == Some(attacker)
        })
    });

    let mut moves = Vec::new();
    for (from, piece) in board.pieces_of(color) {
        if piece.kind == PieceKind::King {
            continue;
        }
        let rules = rules::rules_for(piece.kind);
        for to in targets.iter().copied() {
            let mv = Move::new(from, to);
            if rules.pseudo_move(board, piece, mv) {
                moves.push(mv);
            }
        }
        if let Some(ep) = en_passant {
            let mv = Move::new(from, ep);
            if piece.kind == PieceKind::Pawn && rules.pseudo_move(board, piece, mv) {
                moves.push(mv);
            }
        }
    }

    if king.distance(attacker) == 1 && !square_under_attack(board, attacker, color) {
        moves.push(Move::new(king, attacker));
    }
    moves
}

#[inline]
pub fn can_defend(board: &Board, color: Color) -> bool {
    !defending_moves(board, color).is_empty()
}

/// True if every square around the king of `color` holds one of its pieces.
pub fn is_surrounded(board: &Board, color: Color) -> bool {
    board
        .king(color)
        .is_some_and(|king| king.neighbors().all(|sq| board.is_occupied_by(sq, color)))
}

/// True if the king of `color` has no square to step to: each neighbor
/// holds an ally or is attacked.
pub fn is_stuck(board: &Board, color: Color) -> bool {
    let Some(king) = board.king(color) else {
        return false;
    };
    if is_surrounded(board, color) {
        return true;
    }
    king.neighbors()
        .all(|sq| board.is_occupied_by(sq, color) || square_under_attack(board, sq, color))
}

/// True if no piece of `color`, king included, has a legal move.
pub fn no_ally_can_move(board: &Board, color: Color) -> bool {
    board.pieces_of(color).into_iter().all(|(from, piece)| {
        let rules = rules::rules_for(piece.kind);
        Square::all().all(|to| !rules.evaluate(board, piece, Move::new(from, to)).is_valid())
    })
}

pub fn is_checkmate(board: &Board, color: Color) -> bool {
    is_check(board, color) && is_stuck(board, color) && !can_defend(board, color)
}

pub fn is_stalemate(board: &Board, color: Color) -> bool {
    board.king(color).is_some()
        && !is_check(board, color)
        && is_stuck(board, color)
        && no_ally_can_move(board, color)
}

/// K v K, K and one minor piece v K, or K+B v K+B with both bishops on
/// squares of the same color. Requires both kings.
pub fn is_insufficient_material(board: &Board) -> bool {
    if board.king(Color::White).is_none() || board.king(Color::Black).is_none() {
        return false;
    }
    let others: Vec<_> = board
        .pieces()
        .filter(|(_, p)| p.kind != PieceKind::King)
        .collect();

    match others.as_slice() {
        [] => true,
        [(_, piece)] => piece.kind.is_minor(),
        [(sq1, p1), (sq2, p2)] => {
            p1.kind == PieceKind::Bishop
                && p2.kind == PieceKind::Bishop
                && p1.color != p2.color
                && sq1.is_light() == sq2.is_light()
        }
        _ => false,
    }
}

/// How many times the latest snapshot occurs in the history, itself included.
pub fn repetitions(board: &Board) -> usize {
    match board.history().last() {
        Some(latest) => board.history().iter().filter(|fm| *fm == latest).count(),
        None => 0,
    }
}

/// True when the latest snapshot recurred on each of the last four
/// repetition cycles, giving five uninterrupted occurrences.
///
/// A position can come back at most every four plies, so the cycle stride is
/// four history entries.
pub fn is_fivefold_repetition(board: &Board) -> bool {
    const CYCLE: usize = 4;
    let history = board.history();
    let Some(latest) = history.last() else {
        return false;
    };
    let last = history.len() - 1;
    last >= 4 * CYCLE
        && (1..=4).all(|k| history.get(last - k * CYCLE) == Some(latest))
}

/// The draw the side to move could claim, when draws are claimable.
pub fn claimable_draw(board: &Board) -> Option<DrawReason> {
    if board.is_game_over() || !board.rules().claimable_draws {
        return None;
    }
    if repetitions(board) >= 3 {
        Some(DrawReason::ThreefoldRepetition)
    } else if board.half_move_clock() >= board.rules().fifty_move_plies {
        Some(DrawReason::FiftyMoveRule)
    } else {
        None
    }
}

fn automatic_draw(board: &Board, color: Color) -> Option<DrawReason> {
    let rules = board.rules();
    if is_stalemate(board, color) {
        return Some(DrawReason::Stalemate);
    }
    if is_insufficient_material(board) {
        return Some(DrawReason::InsufficientMaterial);
    }

    if is_fivefold_repetition(board) {
        return Some(DrawReason::FivefoldRepetition);
    }
    if rules.claimable_draws {
        if board.half_move_clock() >= rules.seventy_five_move_plies() {
            return Some(DrawReason::SeventyFiveMoveRule);
        }
    } else {
        if repetitions(board) >= 3 {
            return Some(DrawReason::ThreefoldRepetition);
        }
        if board.half_move_clock() >= rules.fifty_move_plies {
            return Some(DrawReason::FiftyMoveRule);
        }
    }
    None
}

/// State of the game for the side to move.
pub fn game_state(board: &Board) -> (GameState, Option<DrawReason>) {
    let color = board.current_player();
    let state = if is_checkmate(board, color) {
        (GameState::Checkmate, None)
    } else if let Some(reason) = automatic_draw(board, color) {
        (GameState::Draw, Some(reason))
    } else if is_check(board, color) {
        (GameState::Check, None)
    } else {
        (GameState::Normal, None)
    };
    tracing::trace!(side = %color, state = %state.0, "game state evaluated");
    state
}
