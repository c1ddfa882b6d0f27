/// Integration tests for the turn protocol across several hands
///
/// These drive a session the way a live caller would: seat the table,
/// then capture, update, commit and act hand after hand.
use poker_copilot::{
    game::entities::Card,
    session::{
        Capture, HandUpdate, MissingStep, Phase, PlayerSeat, PokerSession, SessionConfig,
        SessionError, SessionSnapshot, TurnView,
    },
    table::Position,
};
use rand::{SeedableRng, rngs::StdRng};

fn capture(a: &str, b: &str) -> Capture {
    Capture::Cards([Card::parse(a).unwrap(), Card::parse(b).unwrap()])
}

fn six_max() -> PokerSession {
    let config = SessionConfig {
        hero_name: "me".to_string(),
        ..Default::default()
    };
    let mut session = PokerSession::new(config).unwrap();
    let players = ["ann", "ben", "cat", "dan", "eve"].map(PlayerSeat::new);
    let summary = session.setup(&players, 2000).unwrap();
    assert_eq!(summary.total_seats, 6);
    assert_eq!(summary.hero_seat, 5);
    assert_eq!(summary.positions["me"], Position::Cutoff);
    session
}

fn play_hand(session: &mut PokerSession, a: &str, b: &str) {
    session.capture_hole_cards(capture(a, b)).unwrap();
    session
        .update(HandUpdate::new(15, ["ben posts", "cat posts", "dan raises to 30"]))
        .unwrap();
    session.commit_read(Some("dan opens wide".to_string())).unwrap();
    session.act("I call").unwrap();
    assert_eq!(session.phase(), Phase::Acted);
}

#[test]
fn test_act_immediately_after_setup_is_a_protocol_violation() {
    let mut session = six_max();
    let err = session.act("all in").unwrap_err();
    assert!(matches!(err, SessionError::ProtocolViolation { .. }));
    assert_eq!(err.to_string(), "not ready: no cards captured");
}

#[test]
fn test_several_hands_rotate_the_button() {
    let mut session = six_max();
    let mut button = session.data().geometry().unwrap().button_seat();

    for (a, b) in [("Ah", "Kh"), ("7c", "2d"), ("Qs", "Qd"), ("9h", "8h")] {
        play_hand(&mut session, a, b);
        let summary = session
            .update(HandUpdate::new(15, ["new hand"]).starting_new_hand())
            .unwrap();
        let rotated = summary.button_seat.unwrap();
        assert_eq!(rotated, (button + 1) % 6);
        assert!(summary.community_cards.is_empty());
        assert!(session.reveal_hole_cards().is_none());
        assert_eq!(session.phase(), Phase::HandStart);
        button = rotated;
    }
    // Four rotations leave the button on seat 4, right before the hero.
    assert_eq!(session.hero_position().unwrap(), Position::SmallBlind);
}

#[test]
fn test_tendencies_accumulate_across_hands() {
    let mut session = six_max();
    for _ in 0..3 {
        session
            .update(
                HandUpdate::new(40, ["dan raises"])
                    .with_action("dan", "raises to 30")
                    .with_action("eve", "folds"),
            )
            .unwrap();
        session
            .update(HandUpdate::new(15, ["next"]).starting_new_hand())
            .unwrap();
    }
    let summary = session
        .update(HandUpdate::new(45, ["dan calls"]).with_action("dan", "calls"))
        .unwrap();
    let dan = &summary.opponent_tendencies["dan"];
    assert_eq!(dan.total_actions, 4);
    assert_eq!(dan.aggression_pct, 75.0);
    assert_eq!(dan.vpip_pct, 100.0);
    assert_eq!(summary.opponent_tendencies["eve"].fold_pct, 100.0);
}

#[test]
fn test_board_grows_through_the_streets() {
    let mut session = six_max();
    session.capture_hole_cards(capture("Ah", "Kh")).unwrap();
    let streets: [&[&str]; 4] = [
        &[],
        &["2h", "7h", "Tc"],
        &["2h", "7h", "Tc", "Js"],
        &["2h", "7h", "Tc", "Js", "Qh"],
    ];
    let mut rng = StdRng::seed_from_u64(99);
    for board in streets {
        let board = Card::parse_many(board).unwrap();
        session
            .update(HandUpdate::new(100, ["dan bets"]).with_board(board))
            .unwrap();
        let equity = session.hero_equity(200, &mut rng).unwrap();
        assert!(!equity.is_fallback());
    }
    // Nut flush on the river.
    assert!(session.hero_equity(200, &mut rng).unwrap().probability > 0.95);
    assert_eq!(session.next_step(), Some(MissingStep::ReadCommit));
}

#[test]
fn test_snapshot_restores_into_a_working_session() {
    let mut session = six_max();
    play_hand(&mut session, "Jd", "Jc");
    let json = session.snapshot().unwrap().to_json().unwrap();
    assert!(!json.contains("Jd"));

    let config = SessionConfig {
        hero_name: "me".to_string(),
        ..Default::default()
    };
    let snapshot = SessionSnapshot::from_json(&json).unwrap();
    let mut restored = PokerSession::restore(snapshot, config).unwrap();
    assert_eq!(restored.phase(), Phase::StateUpdated);
    assert_eq!(restored.next_step(), Some(MissingStep::Cards));

    restored.capture_hole_cards(Capture::Signal).unwrap();
    restored.commit_read(None).unwrap();
    assert!(restored.act("check").is_ok());
}
