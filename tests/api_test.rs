use std::collections::HashMap;

use big_two_engine::api::{
    execute_command, execute_query, ApiError, Command, CommandResponse, JoinCommand, Query,
    QueryResponse, SeatAction, SeatCommand,
};
use big_two_engine::domain::card::{parse_cards, Card};
use big_two_engine::domain::settings::{GameMode, GameSettings};
use big_two_engine::engine::{AbortReason, SessionManager};
use big_two_engine::eval::CombinationCategory;
use big_two_engine::infra::{DefaultNameResolver, NoShuffle};

const DIAMONDS: &str = "3d 4d 5d 6d 7d 8d 9d Td Jd Qd Kd Ad 2d";

fn names() -> HashMap<u64, String> {
    [
        (1, "Аня".to_string()),
        (2, "Боря".to_string()),
        (3, "Вика".to_string()),
        (4, "Гена".to_string()),
    ]
    .into()
}

fn run(manager: &mut SessionManager, command: Command) -> Result<CommandResponse, ApiError> {
    execute_command(manager, command, &mut NoShuffle, &names())
}

fn join(session_id: u64, player_id: u64) -> Command {
    Command::Join(JoinCommand {
        session_id,
        player_id,
        display_name: names()[&player_id].clone(),
        balance: 500,
    })
}

fn seat(session_id: u64, seat: u8, action: SeatAction) -> Command {
    Command::Seat(SeatCommand {
        session_id,
        seat,
        action,
    })
}

/// Открыть лобби и посадить четверых. Возвращает id партии.
fn start(manager: &mut SessionManager, settings: GameSettings) -> u64 {
    let CommandResponse::Lobby(lobby) = run(manager, Command::OpenLobby { settings }).unwrap() else {
        panic!("ожидали лобби");
    };
    let id = lobby.session_id;
    for player in 1..=3 {
        assert!(matches!(
            run(manager, join(id, player)).unwrap(),
            CommandResponse::Lobby(_)
        ));
    }
    let CommandResponse::TableState(table) = run(manager, join(id, 4)).unwrap() else {
        panic!("четвёртый игрок раздаёт партию");
    };
    assert_eq!(table.turn_seat, 3);
    id
}

#[test]
fn lobby_view_lists_joined_names() {
    let mut manager = SessionManager::new();
    let CommandResponse::Lobby(lobby) = run(
        &mut manager,
        Command::OpenLobby {
            settings: GameSettings::standard(),
        },
    )
    .unwrap() else {
        panic!("ожидали лобби");
    };

    let CommandResponse::Lobby(view) = run(&mut manager, join(lobby.session_id, 2)).unwrap() else {
        panic!("ожидали лобби");
    };
    assert_eq!(view.players, vec!["Боря".to_string()]);
    assert_eq!(view.join_timer_secs, 60);
}

#[test]
fn public_table_hides_cards() {
    let mut manager = SessionManager::new();
    let id = start(&mut manager, GameSettings::standard());

    let CommandResponse::TableState(view) =
        run(&mut manager, seat(id, 3, SeatAction::PlayText("3d".into()))).unwrap()
    else {
        panic!("партия идёт");
    };

    assert_eq!(view.turn_seat, 0);
    assert_eq!(view.active_cards, parse_cards("3d").unwrap());
    assert_eq!(view.active_category, Some(CombinationCategory::Single));
    assert!(view.players.iter().all(|p| p.cards.is_none()));
    assert_eq!(view.players[3].cards_remaining, 12);
    assert_eq!(view.players[0].display_name, "Аня");
}

#[test]
fn hero_sees_own_cards_only() {
    let mut manager = SessionManager::new();
    let id = start(&mut manager, GameSettings::standard());

    let QueryResponse::Table(view) = execute_query(
        &manager,
        Query::GetTable {
            session_id: id,
            hero: Some(4),
        },
        &DefaultNameResolver,
    )
    .unwrap() else {
        panic!("ожидали стол");
    };

    assert_eq!(view.players[3].cards.as_ref().map(Vec::len), Some(13));
    assert!(view.players[..3].iter().all(|p| p.cards.is_none()));
    assert_eq!(view.players[3].display_name, "Player 4");
}

#[test]
fn legal_plays_query() {
    let mut manager = SessionManager::new();
    let id = start(&mut manager, GameSettings::standard());
    let three = Card::THREE_OF_DIAMONDS;

    let QueryResponse::LegalPlays(plays) = execute_query(
        &manager,
        Query::LegalPlays {
            session_id: id,
            seat: 3,
        },
        &DefaultNameResolver,
    )
    .unwrap() else {
        panic!("ожидали список ходов");
    };
    assert!(plays.iter().all(|p| p.contains(&three)));
    assert!(plays.contains(&parse_cards(DIAMONDS).unwrap()));

    // не твой ход: подсказок нет
    assert_eq!(
        execute_query(
            &manager,
            Query::LegalPlays {
                session_id: id,
                seat: 0
            },
            &DefaultNameResolver
        ),
        Ok(QueryResponse::LegalPlays(Vec::new()))
    );
    assert!(matches!(
        execute_query(
            &manager,
            Query::LegalPlays {
                session_id: id,
                seat: 9
            },
            &DefaultNameResolver
        ),
        Err(ApiError::BadRequest(_))
    ));
}

#[test]
fn dragon_ends_game_with_named_winner() {
    let mut manager = SessionManager::new();
    let id = start(&mut manager, GameSettings::standard().with_mode(GameMode::Money));

    let response = run(&mut manager, seat(id, 3, SeatAction::PlayText(DIAMONDS.into()))).unwrap();

    let CommandResponse::GameFinished(summary) = response else {
        panic!("ожидали итог партии, получили {response:?}");
    };
    assert_eq!(summary.winner_name, "Гена");
    assert_eq!(summary.results.iter().map(|r| r.stake_delta).sum::<i64>(), 0);
    assert_eq!(
        run(&mut manager, seat(id, 0, SeatAction::Pass)),
        Err(ApiError::SessionNotFound(id))
    );
}

#[test]
fn rule_violations_are_rejected() {
    let mut manager = SessionManager::new();
    let id = start(&mut manager, GameSettings::standard());

    assert!(matches!(
        run(&mut manager, seat(id, 0, SeatAction::Pass)),
        Err(ApiError::Rejected(_))
    ));
    assert!(matches!(
        run(&mut manager, seat(id, 3, SeatAction::Pass)),
        Err(ApiError::Rejected(_))
    ));
    assert!(matches!(
        run(&mut manager, seat(id, 3, SeatAction::PlayText("4d".into()))),
        Err(ApiError::Rejected(_))
    ));
    assert!(matches!(
        run(&mut manager, seat(id, 3, SeatAction::PlayText("3x".into()))),
        Err(ApiError::BadRequest(_))
    ));
}

#[test]
fn staging_commands_return_table() {
    let mut manager = SessionManager::new();
    let id = start(&mut manager, GameSettings::standard());
    let three = Card::THREE_OF_DIAMONDS;

    assert!(matches!(
        run(&mut manager, seat(id, 3, SeatAction::StageCard(three))),
        Ok(CommandResponse::TableState(_))
    ));
    assert!(matches!(
        run(&mut manager, seat(id, 3, SeatAction::UnstageAll)),
        Ok(CommandResponse::TableState(_))
    ));
    run(&mut manager, seat(id, 3, SeatAction::StageCard(three))).unwrap();
    let CommandResponse::TableState(view) =
        run(&mut manager, seat(id, 3, SeatAction::PlayStaged)).unwrap()
    else {
        panic!("партия идёт");
    };
    assert_eq!(view.turn_seat, 0);
}

#[test]
fn timer_commands() {
    let mut manager = SessionManager::new();
    let CommandResponse::Lobby(lobby) = run(
        &mut manager,
        Command::OpenLobby {
            settings: GameSettings::standard(),
        },
    )
    .unwrap() else {
        panic!("ожидали лобби");
    };
    run(&mut manager, join(lobby.session_id, 1)).unwrap();

    assert_eq!(
        run(
            &mut manager,
            Command::ExpireLobby {
                session_id: lobby.session_id
            }
        ),
        Ok(CommandResponse::Aborted {
            session_id: lobby.session_id,
            reason: AbortReason::NotEnoughPlayers
        })
    );
    assert_eq!(
        run(
            &mut manager,
            Command::ExpireLobby {
                session_id: lobby.session_id
            }
        ),
        Ok(CommandResponse::Ok)
    );

    let id = start(&mut manager, GameSettings::standard());
    let response = run(&mut manager, seat(id, 3, SeatAction::ForcePass)).unwrap();
    let CommandResponse::TableState(view) = response else {
        panic!("партия идёт");
    };
    assert_eq!(view.turn_seat, 0);
    assert_eq!(view.control_seat, 0);

    assert_eq!(
        run(
            &mut manager,
            Command::Abandon {
                session_id: id,
                reason: AbortReason::ForceStopped
            }
        ),
        Ok(CommandResponse::Aborted {
            session_id: id,
            reason: AbortReason::ForceStopped
        })
    );
}

#[test]
fn deal_and_settings_commands() {
    let mut manager = SessionManager::new();
    assert!(matches!(
        run(
            &mut manager,
            Command::Deal {
                seats: [11, 12, 13, 14],
                settings: GameSettings::standard()
            }
        ),
        Ok(CommandResponse::TableState(_))
    ));

    let CommandResponse::Lobby(lobby) = run(
        &mut manager,
        Command::OpenLobby {
            settings: GameSettings::standard(),
        },
    )
    .unwrap() else {
        panic!("ожидали лобби");
    };
    let CommandResponse::Lobby(updated) = run(
        &mut manager,
        Command::UpdateSettings {
            session_id: lobby.session_id,
            settings: GameSettings::standard().with_mode(GameMode::Money),
        },
    )
    .unwrap() else {
        panic!("ожидали лобби");
    };
    assert_eq!(updated.mode, GameMode::Money);

    let mut bad = GameSettings::standard();
    bad.join_timer_secs = 500;
    assert!(matches!(
        run(&mut manager, Command::OpenLobby { settings: bad }),
        Err(ApiError::EngineError(_))
    ));
}

#[test]
fn commands_are_serializable() {
    let command = seat(3, 1, SeatAction::Play(parse_cards("3d 4d").unwrap()));
    let json = serde_json::to_string(&command).unwrap();
    assert!(json.contains("Seat"));
    let back: Command = serde_json::from_str(&json).unwrap();
    assert!(matches!(back, Command::Seat(SeatCommand { seat: 1, .. })));
}
