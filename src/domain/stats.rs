//! Статистика игроков и группы по итогам партий.
//!
//! Хранение на стороне внешнего слоя, здесь только правила пересчёта.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::hand::GameSummary;
use crate::domain::table::HAND_SIZE;
use crate::domain::PlayerId;

/// Стартовый баланс нового игрока.
pub const INITIAL_MONEY: i64 = 1000;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlayerStats {
    pub player_id: PlayerId,
    pub name: String,
    pub games: u32,
    pub games_won: u32,
    /// Всего выложено карт за все партии.
    pub cards_played: u32,
    /// Текущий баланс. Может уйти в минус.
    pub money: i64,
    /// Сколько всего выиграно/проиграно за всё время.
    pub money_earned: i64,
}

impl PlayerStats {
    pub fn new(player_id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            player_id,
            name: name.into(),
            games: 0,
            games_won: 0,
            cards_played: 0,
            money: INITIAL_MONEY,
            money_earned: 0,
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            f64::from(self.games_won) / f64::from(self.games)
        }
    }

    /// Может ли игрок сесть за денежный стол.
    pub fn can_afford_money_game(&self) -> bool {
        self.money > 0
    }
}

/// Лучшие показатели группы.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct GroupStats {
    pub games: u32,
    pub best_win_rate: f64,
    pub best_win_rate_player: Option<String>,
    pub most_money_earned: i64,
    pub most_money_earned_player: Option<String>,
}

/// Учесть завершённую партию.
///
/// `names`: отображаемые имена; игрок без записи в `players` получает новую.
pub fn record_game(
    summary: &GameSummary,
    names: &HashMap<PlayerId, String>,
    players: &mut HashMap<PlayerId, PlayerStats>,
    group: &mut GroupStats,
) {
    group.games += 1;

    for result in &summary.results {
        let name = names
            .get(&result.player_id)
            .cloned()
            .unwrap_or_else(|| format!("Player {}", result.player_id));

        let stats = players
            .entry(result.player_id)
            .or_insert_with(|| PlayerStats::new(result.player_id, name.clone()));

        stats.games += 1;
        stats.cards_played += (HAND_SIZE - result.cards_left.len()) as u32;
        if result.is_winner {
            stats.games_won += 1;
        }
        stats.money += result.stake_delta;
        stats.money_earned += result.stake_delta;

        let rate = stats.win_rate();
        if rate > group.best_win_rate {
            group.best_win_rate = rate;
            group.best_win_rate_player = Some(stats.name.clone());
        }
        if stats.money_earned > group.most_money_earned {
            group.most_money_earned = stats.money_earned;
            group.most_money_earned_player = Some(stats.name.clone());
        }
    }
}
