use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::table::SeatIndex;
use crate::domain::{PlayerId, SessionId};

/// Комбинация, выложенная на стол (или предложенная игроком).
///
/// Гарантии конструктора:
/// - минимум одна карта;
/// - без повторов;
/// - карты отсортированы по силе (ранг, затем масть).
///
/// Категория не хранится: она вычисляется `eval::classify` по набору карт.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Hand {
    cards: Vec<Card>,
}

/// Почему набор карт нельзя превратить в `Hand`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandBuildError {
    Empty,
    Duplicate(Card),
}

impl Hand {
    pub fn new(mut cards: Vec<Card>) -> Result<Self, HandBuildError> {
        if cards.is_empty() {
            return Err(HandBuildError::Empty);
        }
        cards.sort();
        if let Some(w) = cards.windows(2).find(|w| w[0] == w[1]) {
            return Err(HandBuildError::Duplicate(w[0]));
        }
        Ok(Self { cards })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.binary_search(&card).is_ok()
    }

    /// Самая сильная карта комбинации.
    pub fn highest(&self) -> Card {
        self.cards[self.cards.len() - 1]
    }

    /// Самая слабая карта комбинации.
    pub fn lowest(&self) -> Card {
        self.cards[0]
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

/// Результат конкретного места по итогам партии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatResult {
    pub seat: SeatIndex,
    pub player_id: PlayerId,
    /// Карты, оставшиеся на руках к концу партии.
    pub cards_left: Vec<Card>,
    /// Сколько карт игрок успел выложить.
    pub cards_played: u8,
    /// Изменение баланса: >0 выигрыш, <0 проигрыш. В обычном режиме всегда 0.
    pub stake_delta: i64,
    pub is_winner: bool,
}

/// Краткое описание завершённой партии. Удобно для статистики/истории.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSummary {
    pub session_id: SessionId,
    pub winner_seat: SeatIndex,
    pub winner_id: PlayerId,
    /// Последняя комбинация победителя.
    pub final_cards: Vec<Card>,
    pub rounds_played: u32,
    /// Результаты в порядке мест 0..3.
    pub results: Vec<SeatResult>,
}

impl GameSummary {
    pub fn result_for(&self, player_id: PlayerId) -> Option<&SeatResult> {
        self.results.iter().find(|r| r.player_id == player_id)
    }

    /// Сумма всех изменений баланса (в корректной партии всегда 0).
    pub fn net_stake(&self) -> i64 {
        self.results.iter().map(|r| r.stake_delta).sum()
    }
}
