use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::settings::GameMode;
use crate::domain::table::TablePhase;
use crate::domain::{PlayerId, SessionId};
use crate::engine::AbortReason;
use crate::eval::CombinationCategory;

/// DTO игрока за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAtSeatDto {
    pub player_id: PlayerId,
    pub display_name: String,
    pub seat_index: u8,
    pub cards_remaining: u8,
    /// Карты на руке – только для "героя".
    pub cards: Option<Vec<Card>>,
    /// Выбранные для хода карты – тоже только для "героя".
    pub staged: Option<Vec<Card>>,
}

/// DTO стола идущей партии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableViewDto {
    pub session_id: SessionId,
    pub mode: GameMode,
    pub phase: TablePhase,
    pub round_number: u32,
    pub turn_seat: u8,
    pub control_seat: u8,
    /// Пусто, если стол очищен.
    pub active_cards: Vec<Card>,
    pub active_category: Option<CombinationCategory>,
    pub players: Vec<PlayerAtSeatDto>,
    /// Сколько секунд планировщик ждёт до автоматического паса.
    pub pass_timer_secs: u32,
}

/// DTO лобби.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LobbyViewDto {
    pub session_id: SessionId,
    pub players: Vec<String>,
    pub mode: GameMode,
    pub join_timer_secs: u32,
    /// Максимально возможный проигрыш (показываем перед денежной игрой).
    pub max_stake_loss: Chips,
}

/// Результат одного места по итогам партии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatResultDto {
    pub player_id: PlayerId,
    pub display_name: String,
    pub seat_index: u8,
    pub cards_left: Vec<Card>,
    pub stake_delta: i64,
    pub is_winner: bool,
}

/// Итог партии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSummaryDto {
    pub session_id: SessionId,
    pub winner_seat: u8,
    pub winner_name: String,
    pub final_cards: Vec<Card>,
    pub rounds_played: u32,
    pub results: Vec<SeatResultDto>,
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    /// Успешный результат без доп.данных.
    Ok,

    /// Лобби открыто / игрок присоединился.
    Lobby(LobbyViewDto),

    /// Обновлённое состояние стола (партия идёт).
    TableState(TableViewDto),

    /// Партия завершена победой.
    GameFinished(GameSummaryDto),

    /// Партия прервана (или лобби закрыто).
    Aborted {
        session_id: SessionId,
        reason: AbortReason,
    },
}
