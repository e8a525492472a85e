//! End-to-end session behavior: opening moves, turn alternation, rejection
//! semantics, and the terminal state.

use blokus::{
    GameConfig, GameSession, Move, MoveRejection, Orientation, PieceId, Player, RuleViolation,
};

fn mv(piece: PieceId, anchor: (usize, usize), player: Player) -> Move {
    Move { piece, orientation: Orientation::default(), anchor, player }
}

/// Drives a seeded AI-vs-AI game to its terminal state.
fn finished_session(seed: u64) -> GameSession {
    let mut session = GameSession::with_seed(GameConfig::duo(), seed);
    for _ in 0..40 {
        if session.is_game_over() {
            break;
        }
        let player = session.current_player();
        let mv = session
            .select_move(player)
            .or_else(|| session.first_legal_move(player))
            .expect("the seat holding the turn always has a move");
        session.submit_move(mv).expect("selected moves are legal");
    }
    assert!(session.is_game_over(), "playout did not terminate");
    session
}

#[test]
fn opening_moves_toggle_turn_and_record_used_pieces() {
    let mut session = GameSession::with_seed(GameConfig::duo(), 3);

    assert_eq!(session.current_player(), Player(0));
    assert!(!session.is_game_over());

    // Seat one opens on its starting cell (4,4).
    let report = session.submit_move(mv(PieceId::V3, (3, 3), Player(0))).unwrap();
    assert_eq!(report.next_player, Some(Player(1)));
    assert_eq!(session.current_player(), Player(1));
    assert!(report.skipped.is_empty());

    let used: Vec<PieceId> = session.used_pieces(Player(0)).iter().copied().collect();
    assert_eq!(used, vec![PieceId::V3]);
    assert!(session.used_pieces(Player(1)).is_empty());

    // Seat two opens on its starting cell (9,9).
    session.submit_move(mv(PieceId::T5, (9, 8), Player(1))).unwrap();
    assert_eq!(session.current_player(), Player(0));

    assert_eq!(session.score(Player(0)), -84 + 3);
    assert_eq!(session.score(Player(1)), -84 + 5);
}

#[test]
fn rejected_moves_leave_the_session_untouched() {
    let mut session = GameSession::with_seed(GameConfig::duo(), 3);
    session.submit_move(mv(PieceId::O4, (4, 4), Player(0))).unwrap();

    let before_scores: Vec<i32> = session.scores().to_vec();
    let before_moves = session.move_count();

    // Out of turn.
    assert_eq!(
        session.submit_move(mv(PieceId::I1, (5, 5), Player(0))).unwrap_err(),
        MoveRejection::WrongPlayerTurn { expected: Player(1) }
    );
    // Occupied starting area.
    assert_eq!(
        session.submit_move(mv(PieceId::I1, (4, 4), Player(1))).unwrap_err(),
        MoveRejection::Rule(RuleViolation::CellOccupied)
    );
    // Missing the starting cell entirely.
    assert_eq!(
        session.submit_move(mv(PieceId::I1, (12, 12), Player(1))).unwrap_err(),
        MoveRejection::Rule(RuleViolation::FirstMoveRuleViolation)
    );
    // Spent piece, even though the other seat spent it.
    assert_eq!(
        session.submit_move(mv(PieceId::O4, (9, 9), Player(1))).unwrap_err(),
        MoveRejection::PieceAlreadyUsed { by: Player(0) }
    );

    assert_eq!(session.scores(), before_scores.as_slice());
    assert_eq!(session.move_count(), before_moves);
    assert_eq!(session.current_player(), Player(1));
    assert_eq!(session.board().owner_at(12, 12), None);
}

#[test]
fn finished_game_freezes_state_and_rejects_moves() {
    let mut session = finished_session(11);

    let final_scores: Vec<i32> = session.scores().to_vec();
    assert_eq!(
        session.submit_move(mv(PieceId::I1, (0, 0), Player(0))).unwrap_err(),
        MoveRejection::GameAlreadyOver
    );
    assert_eq!(session.scores(), final_scores.as_slice());

    // Neither seat has a legal move in the terminal position.
    assert!(!session.has_any_legal_move(Player(0)));
    assert!(!session.has_any_legal_move(Player(1)));

    let history = session.format_history();
    assert!(history.contains("Result:"));
}

#[test]
fn scores_equal_baseline_plus_placed_squares() {
    let session = finished_session(5);

    for player in [Player(0), Player(1)] {
        let placed: i32 = session
            .used_pieces(player)
            .iter()
            .map(|id| id.square_count() as i32)
            .sum();
        let mut expected = -84 + placed;
        if session.used_pieces(player).len() == PieceId::ALL.len() {
            expected += 15;
        }
        assert_eq!(session.score(player), expected, "{}", player);
    }
}

#[test]
fn shared_pool_never_hands_a_piece_to_both_seats() {
    let session = finished_session(8);

    let used_by_0 = session.used_pieces(Player(0));
    let used_by_1 = session.used_pieces(Player(1));
    assert!(used_by_0.is_disjoint(used_by_1));
    assert_eq!(
        used_by_0.len() + used_by_1.len() + session.remaining_pieces().len(),
        PieceId::ALL.len()
    );
    assert_eq!(session.move_count(), used_by_0.len() + used_by_1.len());
}

#[test]
fn reset_starts_a_fresh_game_after_a_playout() {
    let mut session = finished_session(2);
    session.reset();

    assert!(!session.is_game_over());
    assert_eq!(session.current_player(), Player(0));
    assert_eq!(session.scores(), &[-84, -84]);
    assert_eq!(session.remaining_pieces().len(), 20);
    session.submit_move(mv(PieceId::I2, (4, 3), Player(0))).unwrap();
}
