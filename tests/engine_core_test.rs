// tests/engine_core_test.rs

use big_two_engine::domain::card::{parse_cards, Card};
use big_two_engine::domain::settings::{GameMode, GameSettings};
use big_two_engine::domain::table::{SeatIndex, TablePhase};
use big_two_engine::engine::{
    AbortReason, GameEventKind, GameSession, PlayError, PlayerAction, TurnOutcome,
};

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

fn c(s: &str) -> Card {
    s.parse().unwrap()
}

const SEATS: [u64; 4] = [101, 102, 103, 104];

/// Короткие руки для сценариев; 3♦ у места 2.
fn scenario_session(settings: GameSettings) -> GameSession {
    GameSession::start_with_hands(
        1,
        SEATS,
        [
            cards("4c 9h Kd 2h"),
            cards("5d 7s Jc Ac"),
            cards("3d 6h Tc Qs 2s"),
            cards("8d 8c 9s Ks"),
        ],
        settings,
    )
    .expect("сценарная раздача корректна")
}

fn play(session: &mut GameSession, seat: SeatIndex, s: &str) -> TurnOutcome {
    session
        .apply_play(seat, &cards(s))
        .unwrap_or_else(|e| panic!("место {seat} не смогло сыграть {s}: {e}"))
}

//
// Старт
//
#[test]
fn holder_of_three_of_diamonds_leads() {
    let session = scenario_session(GameSettings::standard());
    assert_eq!(session.table.turn_seat, 2);
    assert_eq!(session.table.control_seat, 2);
    assert!(session.table.active.is_none());
    assert_eq!(session.table.round_number, 1);
    assert_eq!(session.seat_of(103), Some(2));
    assert_eq!(session.dealt, [4, 4, 5, 4]);
    assert_eq!(session.cards_played_by_table(), 0);
}

#[test]
fn start_emits_deal_then_start_then_turn() {
    let session = scenario_session(GameSettings::standard());
    let kinds: Vec<&GameEventKind> = session.history.events.iter().map(|e| &e.kind).collect();

    assert_eq!(kinds.len(), 6);
    assert!(kinds[..4]
        .iter()
        .all(|k| matches!(k, GameEventKind::CardsDealt { .. })));
    assert!(matches!(
        kinds[4],
        GameEventKind::GameStarted { first_seat: 2, .. }
    ));
    assert!(matches!(
        kinds[5],
        GameEventKind::TurnAdvanced { next_seat: 2, .. }
    ));
    let indices: Vec<u32> = session.history.events.iter().map(|e| e.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
}

//
// Первый ход
//
#[test]
fn opening_without_three_of_diamonds_is_rejected_and_state_kept() {
    let mut session = scenario_session(GameSettings::standard());
    let table_before = session.table.clone();
    let hand_before = session.players[2].clone();

    let err = session.apply_play(2, &cards("6h")).unwrap_err();

    assert_eq!(err, PlayError::OpeningMustContainLowestCard);
    assert_eq!(session.table, table_before);
    assert_eq!(session.players[2], hand_before);
}

#[test]
fn opening_with_three_of_diamonds_passes_turn() {
    let mut session = scenario_session(GameSettings::standard());

    let outcome = play(&mut session, 2, "3d");

    assert_eq!(outcome, TurnOutcome::Advanced { next_seat: 3 });
    assert_eq!(session.table.turn_seat, 3);
    assert_eq!(session.table.control_seat, 2);
    assert_eq!(session.table.active.as_ref().map(|h| h.cards().to_vec()), Some(cards("3d")));
    assert_eq!(session.table.phase, TablePhase::AwaitingResponse);
    assert_eq!(session.table.round_number, 2);
    assert!(!session.players[2].holds(c("3d")));
    assert_eq!(session.cards_played_by_table(), 1);
}

//
// Пасы и очистка стола
//
#[test]
fn full_circle_of_passes_clears_table_for_last_player() {
    let mut session = scenario_session(GameSettings::standard());
    play(&mut session, 2, "3d");
    play(&mut session, 3, "8d");

    assert_eq!(session.apply_pass(0).unwrap(), TurnOutcome::Advanced { next_seat: 1 });
    assert_eq!(session.apply_pass(1).unwrap(), TurnOutcome::Advanced { next_seat: 2 });
    assert_eq!(session.table.consecutive_passes, 2);
    let outcome = session.apply_pass(2).unwrap();

    assert_eq!(outcome, TurnOutcome::TableCleared { leader: 3 });
    assert!(session.table.active.is_none());
    assert_eq!(session.table.turn_seat, 3);
    assert_eq!(session.table.control_seat, 3);
    assert_eq!(session.table.consecutive_passes, 0);
    assert_eq!(session.table.phase, TablePhase::AwaitingOpeningPlay);

    // свободный ход: любая допустимая комбинация, 3♦ уже не нужна
    assert_eq!(play(&mut session, 3, "Ks"), TurnOutcome::Advanced { next_seat: 0 });
}

#[test]
fn two_of_spades_clears_table_without_passes() {
    let mut session = scenario_session(GameSettings::standard());
    play(&mut session, 2, "3d");
    play(&mut session, 3, "8d");
    play(&mut session, 0, "2h");
    session.apply_pass(1).unwrap();

    let outcome = play(&mut session, 2, "2s");

    assert_eq!(outcome, TurnOutcome::AutoCleared { seat: 2 });
    assert_eq!(session.table.turn_seat, 2);
    assert_eq!(session.table.control_seat, 2);
    assert!(session.table.active.is_none());

    // после 2♠ только очистка и передача хода, никаких пасов за других
    let last_play = session
        .history
        .events
        .iter()
        .rposition(|e| matches!(e.kind, GameEventKind::Played { .. }))
        .unwrap();
    let tail: Vec<&GameEventKind> = session.history.events[last_play + 1..]
        .iter()
        .map(|e| &e.kind)
        .collect();
    assert_eq!(tail.len(), 2);
    assert!(matches!(tail[0], GameEventKind::RoundCleared { leader: 2 }));
    assert!(matches!(tail[1], GameEventKind::TurnAdvanced { next_seat: 2, .. }));
}

#[test]
fn control_player_cannot_pass_voluntarily() {
    let mut session = scenario_session(GameSettings::standard());
    assert!(session.apply_pass(2).is_err());

    play(&mut session, 2, "3d");
    session.apply_pass(3).unwrap();
    session.apply_pass(0).unwrap();
    assert_eq!(session.apply_pass(1).unwrap(), TurnOutcome::TableCleared { leader: 2 });
    assert!(session.apply_pass(2).is_err(), "ведущий на пустом столе");
}

//
// Принудительные пасы
//
#[test]
fn forced_pass_by_leader_moves_lead_to_next_seat() {
    let mut session = scenario_session(GameSettings::standard());

    let outcome = session.force_pass(2).unwrap();

    assert_eq!(outcome, TurnOutcome::TableCleared { leader: 3 });
    assert_eq!(session.table.control_seat, 3);
    assert_eq!(session.table.turn_seat, 3);
    assert!(session.table.active.is_none());
    assert_eq!(session.table.idle_passes, 1);
    assert!(!session.table.is_first_round(), "правило 3♦ действует только на первом ходу");
    assert!(matches!(
        session.history.events.iter().rev().nth(2).map(|e| &e.kind),
        Some(GameEventKind::Passed { seat: 2, forced: true })
    ));
}

#[test]
fn forced_pass_of_responder_behaves_like_pass() {
    let mut session = scenario_session(GameSettings::standard());
    play(&mut session, 2, "3d");

    assert_eq!(session.force_pass(3).unwrap(), TurnOutcome::Advanced { next_seat: 0 });
    assert_eq!(session.table.control_seat, 2);
    assert_eq!(session.table.idle_passes, 1);

    // добровольное действие сбрасывает счётчик
    session.apply_pass(0).unwrap();
    assert_eq!(session.table.idle_passes, 0);
}

#[test]
fn game_aborts_after_too_many_forced_passes() {
    let mut session = scenario_session(GameSettings::standard());
    assert_eq!(session.settings.idle_pass_limit, 4);

    for expected_leader in [3, 0, 1, 2] {
        let seat = session.table.turn_seat;
        assert_eq!(
            session.force_pass(seat).unwrap(),
            TurnOutcome::TableCleared { leader: expected_leader }
        );
    }
    assert_eq!(session.table.idle_passes, 4);

    let outcome = session.force_pass(session.table.turn_seat).unwrap();

    assert_eq!(outcome, TurnOutcome::Aborted(AbortReason::Idle));
    assert!(session.is_terminal());
    assert_eq!(session.table.phase, TablePhase::Aborted);
    assert!(matches!(
        session.history.last().map(|e| &e.kind),
        Some(GameEventKind::SessionAborted { reason: AbortReason::Idle })
    ));
}

#[test]
fn play_resets_idle_counter() {
    let mut session = scenario_session(GameSettings::standard());
    session.force_pass(2).unwrap();
    session.force_pass(3).unwrap();
    assert_eq!(session.table.idle_passes, 2);

    play(&mut session, 0, "4c");
    assert_eq!(session.table.idle_passes, 0);
}

//
// Конец партии
//
#[test]
fn emptying_hand_finishes_game() {
    let mut session = GameSession::start_with_hands(
        9,
        SEATS,
        [cards("4c 5c"), cards("2d 2c"), cards("3d"), cards("9h 9s 9d 9c 8h")],
        GameSettings::standard(),
    )
    .unwrap();

    let outcome = play(&mut session, 2, "3d");

    let TurnOutcome::Finished(summary) = outcome else {
        panic!("ожидали конец партии, получили {outcome:?}");
    };
    assert_eq!(summary.winner_seat, 2);
    assert_eq!(summary.winner_id, 103);
    assert_eq!(summary.final_cards, cards("3d"));
    assert_eq!(summary.net_stake(), 0);
    assert!(summary.results.iter().all(|r| r.stake_delta == 0), "без денег");
    assert_eq!(summary.result_for(104).map(|r| r.cards_left.len()), Some(5));
    assert!(session.is_terminal());
    assert_eq!(session.table.phase, TablePhase::HandEmptied { winner: 2 });

    // после конца партии ходить нельзя
    assert_eq!(
        session.apply_play(3, &cards("8h")),
        Err(PlayError::SessionAlreadyTerminal)
    );
}

#[test]
fn money_mode_settles_stakes_at_finish() {
    let mut session = GameSession::start_with_hands(
        9,
        SEATS,
        [cards("4c 5c"), cards("2d 2c"), cards("3d"), cards("9h 9s 9d 9c 8h")],
        GameSettings::standard().with_mode(GameMode::Money),
    )
    .unwrap();

    let TurnOutcome::Finished(summary) = play(&mut session, 2, "3d") else {
        panic!("ожидали конец партии");
    };

    let deltas: Vec<i64> = summary.results.iter().map(|r| r.stake_delta).collect();
    // 2 карты → 10; две двойки → 5·2·2·2 = 40; каре + 1 → 5·5·2 = 50
    assert_eq!(deltas, vec![-10, -40, 100, -50]);
    assert_eq!(summary.net_stake(), 0);
    assert!(session
        .history
        .events
        .iter()
        .any(|e| e.kind == GameEventKind::StakesSettled { deltas: [-10, -40, 100, -50] }));
}

#[test]
fn abandon_stops_running_game() {
    let mut session = scenario_session(GameSettings::standard());
    let outcome = session.abandon(AbortReason::ForceStopped).unwrap();
    assert_eq!(outcome, TurnOutcome::Aborted(AbortReason::ForceStopped));
    assert!(session.abandon(AbortReason::ForceStopped).is_err());
}

//
// Выбор карт
//
#[test]
fn staged_cards_can_be_played() {
    let mut session = scenario_session(GameSettings::standard());
    session.stage_card(2, c("3d")).unwrap();
    assert_eq!(session.players[2].staged, cards("3d"));
    assert_eq!(session.players[2].cards_remaining(), 5);
    assert_eq!(session.snapshot().cards_remaining, [4, 4, 5, 4]);

    let outcome = session.play_staged(2).unwrap();

    assert_eq!(outcome, TurnOutcome::Advanced { next_seat: 3 });
    assert!(session.players[2].staged.is_empty());
    assert_eq!(session.players[2].cards_remaining(), 4);
}

#[test]
fn rejected_staged_play_returns_cards_to_hand() {
    let mut session = scenario_session(GameSettings::standard());
    session.stage_card(2, c("6h")).unwrap();

    let err = session.play_staged(2).unwrap_err();

    assert_eq!(err, PlayError::OpeningMustContainLowestCard);
    assert!(session.players[2].staged.is_empty());
    assert!(session.players[2].cards.contains(&c("6h")));
    assert_eq!(session.table.round_number, 1);
}

#[test]
fn staging_rules() {
    let mut session = scenario_session(GameSettings::standard());
    assert_eq!(
        session.stage_card(0, c("4c")),
        Err(PlayError::WrongTurn { expected: 2, actual: 0 })
    );
    assert_eq!(session.stage_card(2, c("4c")), Err(PlayError::CardNotHeld(c("4c"))));

    session.stage_card(2, c("Qs")).unwrap();
    session.unstage_all(2).unwrap();
    assert!(session.players[2].staged.is_empty());
    assert_eq!(session.players[2].cards_remaining(), 5);
}

#[test]
fn pass_returns_staged_cards() {
    let mut session = scenario_session(GameSettings::standard());
    play(&mut session, 2, "3d");
    session.stage_card(3, c("8d")).unwrap();

    session.apply_pass(3).unwrap();

    assert!(session.players[3].staged.is_empty());
    assert!(session.players[3].cards.contains(&c("8d")));
}

//
// Действия
//
#[test]
fn apply_action_dispatches_play_and_pass() {
    let mut session = scenario_session(GameSettings::standard());
    let outcome = session
        .apply_action(PlayerAction::play(103, 2, cards("3d")))
        .unwrap();
    assert_eq!(outcome, TurnOutcome::Advanced { next_seat: 3 });

    let outcome = session.apply_action(PlayerAction::pass(104, 3)).unwrap();
    assert_eq!(outcome, TurnOutcome::Advanced { next_seat: 0 });
}
