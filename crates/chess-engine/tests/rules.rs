//! Whole-game scenarios driven through the public API.

use chess_core::{Color, Move, PieceKind, Square};
use chess_engine::{
    evaluator, movegen, Board, CastlingRevocation, CastlingSide, Controller, ControllerError,
    DrawReason, GameState, NullView, Piece, RecordingView, RulesConfig, ViewEvent,
};

fn sq(text: &str) -> Square {
    text.parse().unwrap()
}

fn play<V: chess_engine::ChessView>(game: &mut Controller<V>, moves: &[&str]) {
    for text in moves {
        let mv: Move = text.parse().unwrap();
        assert!(
            game.attempt_move(mv.from(), mv.to()).unwrap(),
            "{text} rejected in {}",
            game.board().to_fen()
        );
    }
}

const KNIGHT_SHUFFLE: [&str; 4] = ["g1f3", "g8f6", "f3g1", "f6g8"];

#[test]
fn twenty_moves_from_the_start() {
    let game = Controller::new(NullView);
    let moves = game.legal_moves();
    assert_eq!(moves.len(), 20);
    assert_eq!(movegen::legal_moves_par(game.board()), moves);
}

#[test]
fn en_passant_removes_the_pawn_beside_the_destination() {
    let mut game = Controller::new(RecordingView::new());
    play(&mut game, &["e2e4", "a7a6", "e4e5", "f7f5"]);
    assert_eq!(game.board().en_passant(), Some(sq("f6")));

    game.view_mut().clear();
    play(&mut game, &["e5f6"]);
    assert!(game.board().is_empty(sq("f5")));
    assert_eq!(
        game.board().piece_at(sq("f6")),
        Some(Piece::new(PieceKind::Pawn, Color::White))
    );
    assert!(game.view().events.contains(&ViewEvent::Removed(sq("f5"))));
    assert_eq!(game.board().en_passant(), None);
}

#[test]
fn en_passant_expires_after_one_ply() {
    let mut game = Controller::new(NullView);
    play(&mut game, &["e2e4", "a7a6", "e4e5", "f7f5", "h2h3", "a6a5"]);
    assert!(!game.attempt_move(sq("e5"), sq("f6")).unwrap());
}

#[test]
fn interposition_prevents_mate() {
    let mut game = Controller::new(NullView);
    game.load_position("6k1/5ppp/8/8/8/8/4RPPP/r5K1 w - - 0 1").unwrap();
    assert_eq!(game.board().game_state(), GameState::Check);
    assert!(evaluator::can_defend(game.board(), Color::White));
    play(&mut game, &["e2e1"]);
    assert_eq!(game.board().game_state(), GameState::Normal);
}

#[test]
fn back_rank_mate_ends_the_game() {
    let mut game = Controller::new(RecordingView::new());
    game.load_position("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
    play(&mut game, &["a1a8"]);
    assert_eq!(game.board().game_state(), GameState::Checkmate);
    assert_eq!(game.view().last_state(), Some(GameState::Checkmate));
    assert!(game
        .view()
        .events
        .contains(&ViewEvent::Message("checkmate".to_string())));
    assert!(game.legal_moves().is_empty());
}

#[test]
fn moves_after_game_over_leave_the_board_alone() {
    let mut game = Controller::new(NullView);
    play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert_eq!(game.board().game_state(), GameState::Checkmate);

    let before = game.board().clone();
    assert!(!game.attempt_move(sq("a2"), sq("a3")).unwrap());
    assert!(!game.attempt_move(sq("b8"), sq("c6")).unwrap());
    assert_eq!(game.board(), &before);
}

#[test]
fn moves_after_a_draw_leave_the_board_alone() {
    let mut stalemate = Controller::new(NullView);
    stalemate.load_position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(stalemate.board().draw_reason(), Some(DrawReason::Stalemate));
    let before = stalemate.board().clone();
    assert_eq!(stalemate.attempt_move(sq("h8"), sq("g8")), Ok(false));
    assert_eq!(stalemate.board(), &before);

    let rules = RulesConfig {
        claimable_draws: true,
        ..RulesConfig::default()
    };
    let mut claimed = Controller::with_rules(NullView, rules);
    play(&mut claimed, &KNIGHT_SHUFFLE);
    play(&mut claimed, &KNIGHT_SHUFFLE);
    play(&mut claimed, &["g1f3", "g8f6"]);
    assert_eq!(claimed.claim_draw(), Ok(DrawReason::ThreefoldRepetition));
    let before = claimed.board().clone();
    assert_eq!(claimed.attempt_move(sq("f3"), sq("g1")), Ok(false));
    assert_eq!(claimed.board(), &before);
}

#[test]
fn bishops_on_same_colored_squares_are_a_draw() {
    let same = Board::from_fen("4k3/8/8/4b3/8/8/8/2B1K3 w - - 0 1").unwrap();
    assert!(evaluator::is_insufficient_material(&same));
    assert_eq!(same.game_state(), GameState::Draw);
    assert_eq!(same.draw_reason(), Some(DrawReason::InsufficientMaterial));

    let opposite = Board::from_fen("4k3/8/8/3b4/8/8/8/2B1K3 w - - 0 1").unwrap();
    assert!(!evaluator::is_insufficient_material(&opposite));
    assert_eq!(opposite.game_state(), GameState::Normal);
}

#[test]
fn capture_down_to_bare_kings_draws() {
    let mut game = Controller::new(RecordingView::new());
    game.load_position("4k3/8/8/8/8/8/3q4/4K3 w - - 0 1").unwrap();
    assert_eq!(game.board().game_state(), GameState::Check);
    play(&mut game, &["e1d2"]);
    assert_eq!(game.board().draw_reason(), Some(DrawReason::InsufficientMaterial));
    assert!(game
        .view()
        .events
        .contains(&ViewEvent::Message("draw by insufficient material".to_string())));
}

#[test]
fn threefold_repetition_on_the_tenth_ply() {
    let mut game = Controller::new(NullView);
    play(&mut game, &KNIGHT_SHUFFLE);
    play(&mut game, &KNIGHT_SHUFFLE);
    play(&mut game, &["g1f3"]);
    assert_eq!(game.board().game_state(), GameState::Normal);
    assert_eq!(evaluator::repetitions(game.board()), 2);

    play(&mut game, &["g8f6"]);
    assert_eq!(game.board().game_state(), GameState::Draw);
    assert_eq!(game.board().draw_reason(), Some(DrawReason::ThreefoldRepetition));
}

#[test]
fn claimable_threefold_then_automatic_fivefold() {
    let rules = RulesConfig {
        claimable_draws: true,
        ..RulesConfig::default()
    };
    let mut game = Controller::with_rules(NullView, rules);
    play(&mut game, &KNIGHT_SHUFFLE);
    play(&mut game, &KNIGHT_SHUFFLE);
    play(&mut game, &["g1f3", "g8f6"]);
    assert_eq!(game.board().game_state(), GameState::Normal);
    assert!(game.can_claim_draw());

    let mut claimed = Controller::with_rules(NullView, rules);
    play(&mut claimed, &KNIGHT_SHUFFLE);
    play(&mut claimed, &KNIGHT_SHUFFLE);
    play(&mut claimed, &["g1f3", "g8f6"]);
    assert_eq!(claimed.claim_draw(), Ok(DrawReason::ThreefoldRepetition));
    assert!(claimed.board().is_game_over());

    play(&mut game, &["f3g1", "f6g8"]);
    play(&mut game, &KNIGHT_SHUFFLE);
    play(&mut game, &["g1f3", "g8f6"]);
    assert_eq!(game.board().draw_reason(), Some(DrawReason::FivefoldRepetition));
}

#[test]
fn interrupted_repetition_restarts_the_fivefold_count() {
    let rules = RulesConfig {
        claimable_draws: true,
        ..RulesConfig::default()
    };
    let mut game = Controller::with_rules(NullView, rules);
    play(&mut game, &KNIGHT_SHUFFLE);
    play(&mut game, &KNIGHT_SHUFFLE);
    play(&mut game, &["b1c3", "b8c6", "c3b1", "c6b8"]);
    play(&mut game, &KNIGHT_SHUFFLE);
    play(&mut game, &KNIGHT_SHUFFLE);
    play(&mut game, &["g1f3", "g8f6"]);
    assert_eq!(evaluator::repetitions(game.board()), 5);
    assert!(!evaluator::is_fivefold_repetition(game.board()));
    assert_eq!(game.board().game_state(), GameState::Normal);
    assert!(game.can_claim_draw());

    play(&mut game, &["f3g1", "f6g8", "g1f3", "g8f6"]);
    assert_eq!(game.board().game_state(), GameState::Normal);
    play(&mut game, &["f3g1", "f6g8", "g1f3", "g8f6"]);
    assert!(evaluator::is_fivefold_repetition(game.board()));
    assert_eq!(game.board().draw_reason(), Some(DrawReason::FivefoldRepetition));
}

#[test]
fn nothing_to_claim_from_the_start() {
    let mut game = Controller::new(NullView);
    assert!(!game.can_claim_draw());
    assert_eq!(game.claim_draw(), Err(ControllerError::CannotClaimDraw));
}

#[test]
fn fifty_move_rule_counts_plies() {
    let mut game = Controller::new(NullView);
    game.load_position("4k3/8/8/8/8/8/8/R3K3 w - - 98 80").unwrap();
    play(&mut game, &["a1a2"]);
    assert_eq!(game.board().game_state(), GameState::Normal);
    play(&mut game, &["e8d8"]);
    assert_eq!(game.board().half_move_clock(), 100);
    assert_eq!(game.board().draw_reason(), Some(DrawReason::FiftyMoveRule));
}

#[test]
fn counters_at_their_maximum_keep_the_game_going() {
    let mut game = Controller::new(NullView);
    game.load_position("4k3/8/8/8/8/8/8/R3K3 b - - 0 4294967295").unwrap();
    assert!(game.attempt_move(sq("e8"), sq("d8")).unwrap());
    assert_eq!(game.board().full_move_count(), u32::MAX);
    assert_eq!(game.board().half_move_clock(), 1);
}

#[test]
fn huge_fifty_move_setting_never_draws() {
    let rules =
        RulesConfig::from_toml_str("fifty-move-plies = 4000000000\nclaimable-draws = true\n").unwrap();
    let mut game = Controller::with_rules(NullView, rules);
    assert_eq!(game.board().game_state(), GameState::Normal);
    play(&mut game, &["e2e4", "e7e5"]);
    assert_eq!(game.board().game_state(), GameState::Normal);
    assert!(!game.can_claim_draw());
}

#[test]
fn legacy_rules_draw_after_fifty_plies() {
    let mut game = Controller::with_rules(NullView, RulesConfig::legacy());
    game.load_position("4k3/8/8/8/8/8/8/R3K3 w - - 48 80").unwrap();
    play(&mut game, &["a1a2", "e8d8"]);
    assert_eq!(game.board().draw_reason(), Some(DrawReason::FiftyMoveRule));
}

#[test]
fn promotion_errors_leave_the_board_untouched() {
    let fen = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1";

    let mut unanswered = Controller::new(RecordingView::with_promotion(None));
    unanswered.load_position(fen).unwrap();
    let before = unanswered.board().clone();
    assert_eq!(
        unanswered.attempt_move(sq("a7"), sq("a8")),
        Err(ControllerError::PromotionUnanswered)
    );
    assert_eq!(unanswered.board(), &before);

    let mut king = Controller::new(RecordingView::with_promotion(Some(PieceKind::King)));
    king.load_position(fen).unwrap();
    assert_eq!(
        king.attempt_move(sq("a7"), sq("a8")),
        Err(ControllerError::InvalidPromotion(PieceKind::King))
    );
    assert_eq!(king.board(), &before);

    let mut knight = Controller::new(RecordingView::with_promotion(Some(PieceKind::Knight)));
    knight.load_position(fen).unwrap();
    assert!(knight.attempt_move(sq("a7"), sq("a8")).unwrap());
    assert_eq!(
        knight.board().piece_at(sq("a8")),
        Some(Piece::new(PieceKind::Knight, Color::White))
    );
}

#[test]
fn castling_moves_the_rook_and_spends_rights() {
    let mut game = Controller::new(RecordingView::new());
    game.load_position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    game.view_mut().clear();
    play(&mut game, &["e1g1"]);

    let board = game.board();
    assert_eq!(board.piece_at(sq("g1")), Some(Piece::new(PieceKind::King, Color::White)));
    assert_eq!(board.piece_at(sq("f1")), Some(Piece::new(PieceKind::Rook, Color::White)));
    assert!(board.is_empty(sq("h1")));
    assert!(!board.has_castling(CastlingSide::WhiteKingside));
    assert!(!board.has_castling(CastlingSide::WhiteQueenside));
    assert!(board.has_castling(CastlingSide::BlackKingside));
    assert!(game.view().events.contains(&ViewEvent::Removed(sq("h1"))));

    play(&mut game, &["e8c8"]);
    assert_eq!(
        game.board().piece_at(sq("d8")),
        Some(Piece::new(PieceKind::Rook, Color::Black))
    );
    assert!(game.board().castling().is_empty());
}

#[test]
fn all_sides_revocation_clears_both_colors() {
    let rules = RulesConfig {
        castling_revocation: CastlingRevocation::AllSides,
        ..RulesConfig::default()
    };
    let mut game = Controller::with_rules(NullView, rules);
    game.load_position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    play(&mut game, &["e1f1"]);
    assert!(game.board().castling().is_empty());
}

#[test]
fn castling_refused_through_attacked_squares() {
    let mut game = Controller::new(NullView);
    game.load_position("r3k2r/8/8/8/8/8/5r2/R3K2R w KQkq - 0 1").unwrap();
    assert!(!game.attempt_move(sq("e1"), sq("g1")).unwrap());

    game.load_position("1r2k2r/8/8/8/8/8/8/R3K2R w KQk - 0 1").unwrap();
    assert!(game.attempt_move(sq("e1"), sq("c1")).unwrap());
}

#[test]
fn full_move_count_advances_after_black() {
    let mut game = Controller::new(NullView);
    assert_eq!(game.board().full_move_count(), 1);
    play(&mut game, &["e2e4"]);
    assert_eq!(game.board().full_move_count(), 1);
    play(&mut game, &["e7e5"]);
    assert_eq!(game.board().full_move_count(), 2);
    assert_eq!(
        game.board().to_fen(),
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
    );
}
