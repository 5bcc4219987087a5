//! Integration tests driving complete game sessions through the public API.

use arbiter_engine::{
    CastleSide, Color, DrawOfferError, DrawReason, GameSession, GameStatus, MoveError,
    MoveOutcome, Piece, PieceKind, Position, PromotionError, SessionConfig, Square,
};

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).expect("valid square")
}

fn session(fen: &str) -> GameSession {
    GameSession::from_position(Position::from_fen(fen).expect("valid FEN"))
        .expect("playable position")
}

fn play(game: &mut GameSession, moves: &[&str]) -> GameStatus {
    let mut status = game.status();
    for uci in moves {
        match game.propose_uci(uci) {
            Ok(MoveOutcome::Applied(s)) => status = s,
            other => panic!("move {} not applied: {:?}", uci, other),
        }
    }
    status
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[test]
fn test_threefold_repetition_by_knight_shuffle() {
    init_tracing();
    let mut game = GameSession::new();
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];

    assert_eq!(play(&mut game, &shuffle), GameStatus::Active);
    assert_eq!(play(&mut game, &shuffle), GameStatus::Active);
    assert_eq!(game.history().len(), 8);

    // The position after Nf3 now occurs for the third time.
    assert_eq!(
        play(&mut game, &["g1f3"]),
        GameStatus::Draw(DrawReason::Repetition)
    );
    assert_eq!(game.propose_uci("g8f6"), Err(MoveError::GameOver));
}

#[test]
fn test_fifty_move_rule() {
    let mut game = session("4k3/8/8/8/8/8/8/R3K3 w - - 49 60");
    assert_eq!(
        play(&mut game, &["a1a2"]),
        GameStatus::Draw(DrawReason::FiftyMoveRule)
    );
    assert_eq!(game.status().to_string(), "draw by fifty-move rule");
}

#[test]
fn test_capture_or_pawn_move_resets_clock() {
    let mut game = session("4k3/8/8/8/8/8/p7/R3K3 w - - 49 60");
    assert_eq!(play(&mut game, &["a1a2"]), GameStatus::Active);
    assert_eq!(game.position().halfmove_clock(), 0);

    let mut game = session("4k3/8/8/8/8/8/4P3/R3K3 w - - 49 60");
    assert_eq!(play(&mut game, &["e2e3"]), GameStatus::Active);
    assert_eq!(game.position().halfmove_clock(), 0);
    assert_eq!(play(&mut game, &["e8d8"]), GameStatus::Active);
    assert_eq!(game.position().halfmove_clock(), 1);
}

#[test]
fn test_promotion_two_phase() {
    let mut game = session("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");

    assert_eq!(
        game.propose_uci("a7a8"),
        Ok(MoveOutcome::PendingPromotion { square: Square::A8 })
    );
    assert_eq!(
        game.pending_promotion().map(|p| p.square),
        Some(Square::A8)
    );
    assert_eq!(game.position().side_to_move(), Color::White);
    assert_eq!(game.propose_uci("e1d1"), Err(MoveError::PromotionPending));
    assert_eq!(
        game.finalize_promotion(PieceKind::Pawn),
        Err(PromotionError::InvalidChoice(PieceKind::Pawn))
    );

    assert_eq!(game.finalize_promotion(PieceKind::Queen), Ok(GameStatus::Active));
    assert_eq!(
        game.position().piece_at(Square::A8),
        Some(Piece::new(Color::White, PieceKind::Queen))
    );
    assert_eq!(game.position().side_to_move(), Color::Black);
    assert_eq!(game.pending_promotion(), None);
}

#[test]
fn test_promotion_choice_in_request() {
    let mut game = session("4k3/8/8/8/8/8/p7/4K3 b - - 0 1");
    assert_eq!(play(&mut game, &["a2a1q"]), GameStatus::Active);
    assert_eq!(
        game.position().piece_at(Square::A1),
        Some(Piece::new(Color::Black, PieceKind::Queen))
    );
}

#[test]
fn test_promotion_capturing_king() {
    let mut game = session("1k6/P7/8/8/8/8/8/4K3 w - - 0 1");
    assert_eq!(
        game.propose_uci("a7b8"),
        Ok(MoveOutcome::PendingPromotion { square: sq("b8") })
    );
    assert_eq!(game.status(), GameStatus::Won(Color::White));
    assert_eq!(
        game.finalize_promotion(PieceKind::Rook),
        Ok(GameStatus::Won(Color::White))
    );
    assert_eq!(game.propose_uci("b8b1"), Err(MoveError::GameOver));
}

#[test]
fn test_en_passant_only_immediately() {
    let mut game = GameSession::new();
    play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert_eq!(play(&mut game, &["e5d6"]), GameStatus::Active);
    let effects = game.last_effects().expect("a move was played");
    assert_eq!(effects.en_passant_capture, Some(sq("d5")));
    assert_eq!(game.position().piece_at(sq("d5")), None);

    let mut late = GameSession::new();
    play(&mut late, &["e2e4", "a7a6", "e4e5", "d7d5", "h2h3", "h7h6"]);
    assert_eq!(
        late.propose_uci("e5d6"),
        Err(MoveError::Illegal {
            from: sq("e5"),
            to: sq("d6")
        })
    );
}

#[test]
fn test_castling() {
    let mut game = session("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    play(&mut game, &["e1g1"]);
    assert_eq!(
        game.last_effects().and_then(|e| e.castled),
        Some(CastleSide::Kingside)
    );
    assert_eq!(
        game.position().piece_at(sq("f1")),
        Some(Piece::new(Color::White, PieceKind::Rook))
    );
    play(&mut game, &["e8c8"]);
    assert_eq!(
        game.position().piece_at(sq("d8")),
        Some(Piece::new(Color::Black, PieceKind::Rook))
    );
}

#[test]
fn test_castling_rejected_after_king_moves() {
    let mut game = session("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    play(&mut game, &["e1f1", "e8f8", "f1e1", "f8e8"]);
    assert!(matches!(game.propose_uci("e1g1"), Err(MoveError::Illegal { .. })));
    assert!(matches!(game.propose_uci("e1c1"), Err(MoveError::Illegal { .. })));
}

#[test]
fn test_castling_rejected_through_attack() {
    // The f8 rook covers f1.
    let mut game = session("r3kr2/8/8/8/8/8/8/R3K2R w KQq - 0 1");
    assert!(matches!(game.propose_uci("e1g1"), Err(MoveError::Illegal { .. })));
    assert!(game.propose_uci("e1c1").is_ok());
}

#[test]
fn test_king_capture_ends_game() {
    let mut game = session("4k3/8/8/8/8/8/8/4RK2 w - - 0 1");
    assert_eq!(
        play(&mut game, &["e1e8"]),
        GameStatus::Won(Color::White)
    );
    assert_eq!(game.position().king_square(Color::Black), None);
    assert_eq!(game.propose_uci("f1f2"), Err(MoveError::GameOver));
    assert_eq!(game.offer_draw(), Err(DrawOfferError::GameOver));
    assert!(game.legal_moves().is_empty());
}

#[test]
fn test_stalemate_fixture() {
    let game = session("8/8/8/8/8/kq6/8/K7 w - - 0 1");
    assert_eq!(game.status(), GameStatus::Draw(DrawReason::Stalemate));

    // Same material with the queen elsewhere: b1 is free.
    let game = session("8/8/8/3q4/8/k7/8/K7 w - - 0 1");
    assert_eq!(game.status(), GameStatus::Active);
}

#[test]
fn test_stalemate_reached_by_move() {
    let mut game = session("8/8/8/3q4/8/k7/8/K7 b - - 0 1");
    assert_eq!(
        play(&mut game, &["d5b3"]),
        GameStatus::Draw(DrawReason::Stalemate)
    );
}

#[test]
fn test_insufficient_material_after_capture() {
    let mut game = session("4k3/8/8/8/8/8/3p4/4K3 w - - 0 1");
    assert_eq!(
        play(&mut game, &["e1d2"]),
        GameStatus::Draw(DrawReason::InsufficientMaterial)
    );
}

#[test]
fn test_draw_by_agreement() {
    let mut game = GameSession::new();
    play(&mut game, &["d2d4"]);
    game.offer_draw().expect("offer accepted");
    assert!(game.draw_offered());
    assert_eq!(game.accept_draw(), Ok(GameStatus::Draw(DrawReason::Agreement)));
    assert!(game.is_over());
}

#[test]
fn test_reset_with_configured_start() {
    let config = SessionConfig::from_toml_str(
        r#"
        start_fen = "4k3/8/8/8/8/8/8/R3K3 w Q - 0 1"
        "#,
    )
    .expect("valid config");
    let mut game = GameSession::with_config(config).expect("valid session");
    play(&mut game, &["a1a8"]);
    assert_eq!(game.history().len(), 1);

    game.reset();
    assert!(game.history().is_empty());
    assert_eq!(game.position().to_fen(), "4k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
}

#[test]
fn test_status_serialization() {
    let json = serde_json::to_string(&GameStatus::Won(Color::Black)).expect("serializable");
    let back: GameStatus = serde_json::from_str(&json).expect("deserializable");
    assert_eq!(back, GameStatus::Won(Color::Black));
}

#[test]
fn test_kingless_position_rejected() {
    let position = Position::from_fen("4k3/8/8/8/8/8/8/R7 w - - 0 1").expect("valid FEN");
    assert!(
        GameSession::from_position(position).is_err(),
        "a side without a king can never lose"
    );
}
