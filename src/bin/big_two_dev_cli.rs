// src/bin/big_two_dev_cli.rs

use std::collections::HashMap;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use big_two_engine::domain::card::Card;
use big_two_engine::domain::player::PlayerProfile;
use big_two_engine::domain::settings::{GameMode, GameSettings};
use big_two_engine::domain::stats::{record_game, GroupStats, PlayerStats, INITIAL_MONEY};
use big_two_engine::domain::{PlayerId, SessionId};
use big_two_engine::engine::{AbortReason, GameEventKind, JoinOutcome, SessionManager, TurnOutcome};
use big_two_engine::eval::{describe_category, legal_plays};
use big_two_engine::infra::{
    map_summary_to_dto, IdGenerator, InMemorySessionStorage, RngSeed, SessionStorage,
};
use big_two_engine::SessionSnapshot;

/// Сколько партий гоняем.
const NUM_GAMES: u64 = 20;
/// Защита от зацикливания одной партии.
const MAX_TURNS_PER_GAME: u32 = 1_000;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let base_seed: u64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    println!("big_two_dev_cli: стартуем симуляцию, seed={base_seed}, партий={NUM_GAMES}");

    let id_gen = IdGenerator::new();
    let mut manager = SessionManager::new();
    let mut storage = InMemorySessionStorage::new();
    let root_seed = RngSeed::from_u64(base_seed);

    // Четыре бота за одним "чатом".
    let mut names: HashMap<PlayerId, String> = HashMap::new();
    let profiles: Vec<PlayerProfile> = (0..4)
        .map(|i| {
            let id = id_gen.next_player_id();
            let name = format!("Bot {}", i + 1);
            names.insert(id, name.clone());
            PlayerProfile::new(id, name)
        })
        .collect();

    let settings = GameSettings::standard().with_mode(GameMode::Money);

    for game_index in 0..NUM_GAMES {
        let session_id = match manager.open_lobby(settings.clone()) {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, "не удалось открыть лобби");
                return;
            }
        };

        let mut rng = root_seed.derive(session_id, game_index).to_rng();

        for profile in &profiles {
            let balance = storage
                .load_player_stats(profile.id)
                .map_or(INITIAL_MONEY, |s| s.money);
            match manager.join(session_id, profile.clone(), balance, &mut rng) {
                Ok(JoinOutcome::Waiting { joined }) => {
                    info!(session_id, joined, "игрок присоединился");
                }
                Ok(JoinOutcome::Dealt) => {}
                Err(e) => {
                    // Например, у бота кончились деньги.
                    println!("[CLI] {} не может сесть: {e}", profile.name);
                }
            }
        }

        if manager.session(session_id).is_none() {
            manager.expire_lobby(session_id);
            print_events(&mut manager);
            continue;
        }

        play_until_done(&mut manager, &mut storage, session_id, &names);
        print_events(&mut manager);
    }

    print_stats(&storage, &names);
    println!("[CLI] Завершение работы dev-CLI.");
}

/// Гоняем партию ботами: каждый ходит самой слабой допустимой комбинацией,
/// а если бить нечем – пасует.
fn play_until_done(
    manager: &mut SessionManager,
    storage: &mut InMemorySessionStorage,
    session_id: SessionId,
    names: &HashMap<PlayerId, String>,
) {
    for _ in 0..MAX_TURNS_PER_GAME {
        let Some(session) = manager.session(session_id) else {
            return;
        };

        // Снимок после каждого хода: как делал бы внешний слой хранения.
        let snapshot = SessionSnapshot::from_session(session);
        storage.save_session(&snapshot);

        let seat = session.table.turn_seat;
        let Some(player) = session.player(seat) else {
            return;
        };
        let must_include = session
            .table
            .is_first_round()
            .then_some(Card::THREE_OF_DIAMONDS);
        let options = legal_plays(&player.all_cards(), session.table.active.as_ref(), must_include);
        let table_has_active = session.table.active.is_some();

        let outcome = match options.first() {
            Some(cards) => manager.play(session_id, seat, cards).map_err(|e| e.to_string()),
            None if table_has_active => {
                manager.pass(session_id, seat).map_err(|e| e.to_string())
            }
            // Ведущему нечем ходить не бывает, но на всякий случай – как таймер.
            None => manager.force_pass(session_id, seat).map_err(|e| e.to_string()),
        };

        match outcome {
            Ok(TurnOutcome::Finished(summary)) => {
                storage.remove_session(session_id);
                let dto = map_summary_to_dto(&summary, names);
                println!(
                    "[CLI] Партия {} окончена: победил {} за {} ходов",
                    session_id, dto.winner_name, dto.rounds_played
                );
                for r in &dto.results {
                    println!(
                        "    место {} {:<6} карт осталось: {:>2}  баланс: {:+}",
                        r.seat_index,
                        r.display_name,
                        r.cards_left.len(),
                        r.stake_delta
                    );
                }

                let mut players: HashMap<PlayerId, PlayerStats> = summary
                    .results
                    .iter()
                    .filter_map(|r| storage.load_player_stats(r.player_id))
                    .map(|s| (s.player_id, s))
                    .collect();
                let mut group = storage.load_group_stats();
                record_game(&summary, names, &mut players, &mut group);
                for stats in players.values() {
                    storage.save_player_stats(stats);
                }
                storage.save_group_stats(&group);
                return;
            }
            Ok(TurnOutcome::Aborted(reason)) => {
                storage.remove_session(session_id);
                println!("[CLI] Партия {session_id} прервана: {reason:?}");
                return;
            }
            Ok(_) => {}
            Err(e) => {
                error!(session_id, seat, error = %e, "бот сделал недопустимый ход");
                let _ = manager.abandon(session_id, AbortReason::ForceStopped);
                return;
            }
        }
    }

    let _ = manager.abandon(session_id, AbortReason::ForceStopped);
}

fn print_events(manager: &mut SessionManager) {
    for event in manager.drain_events() {
        if let GameEventKind::Played { seat, cards, category, .. } = &event.kind {
            let text: Vec<String> = cards.iter().map(Card::to_string).collect();
            println!(
                "    [{}#{}] место {} → {} ({})",
                event.session_id,
                event.index,
                seat,
                text.join(" "),
                describe_category(*category)
            );
        }
    }
}

fn print_stats(storage: &InMemorySessionStorage, names: &HashMap<PlayerId, String>) {
    let group: GroupStats = storage.load_group_stats();
    println!();
    println!("================ СТАТИСТИКА =================");
    println!("Партий сыграно: {}", group.games);
    let mut ids: Vec<&PlayerId> = names.keys().collect();
    ids.sort();
    for id in ids {
        if let Some(s) = storage.load_player_stats(*id) {
            println!(
                "{:<6} партий: {:>3} побед: {:>3} ({:.0}%) деньги: {}",
                s.name,
                s.games,
                s.games_won,
                s.win_rate() * 100.0,
                s.money
            );
        }
    }
    if let Some(best) = &group.best_win_rate_player {
        println!("Лучший процент побед: {best}");
    }
    if let Some(rich) = &group.most_money_earned_player {
        println!("Больше всех заработал: {rich}");
    }
}
