use serde::{Deserialize, Serialize};

use crate::domain::card::{sort_by_rank, Card};
use crate::domain::table::SeatIndex;
use crate::domain::PlayerId;

/// Базовый профиль игрока – то, что не зависит от конкретной партии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerProfile {
    pub id: PlayerId,
    pub name: String,
}

impl PlayerProfile {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Состояние игрока за конкретным местом.
///
/// Карты живут в двух списках: `cards`: на руках, `staged`: выбраны для хода,
/// но ещё не подтверждены. Вместе это всегда вся рука игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAtSeat {
    pub player_id: PlayerId,
    pub seat: SeatIndex,
    pub cards: Vec<Card>,
    pub staged: Vec<Card>,
}

impl PlayerAtSeat {
    pub fn new(player_id: PlayerId, seat: SeatIndex) -> Self {
        Self {
            player_id,
            seat,
            cards: Vec::new(),
            staged: Vec::new(),
        }
    }

    /// Получить карты при раздаче.
    pub fn receive(&mut self, cards: Vec<Card>) {
        self.cards.extend(cards);
        sort_by_rank(&mut self.cards);
    }

    /// Сколько карт у игрока (включая выбранные, но не сыгранные).
    pub fn cards_remaining(&self) -> usize {
        self.cards.len() + self.staged.len()
    }

    pub fn has_no_cards(&self) -> bool {
        self.cards_remaining() == 0
    }

    pub fn holds(&self, card: Card) -> bool {
        self.cards.contains(&card) || self.staged.contains(&card)
    }

    /// Все карты игрока, отсортированные по силе.
    pub fn all_cards(&self) -> Vec<Card> {
        let mut all = self.cards.clone();
        all.extend_from_slice(&self.staged);
        sort_by_rank(&mut all);
        all
    }

    /// Переложить карту из руки в выбранные. `false`, если такой карты на руке нет.
    pub fn stage(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|c| *c == card) {
            Some(pos) => {
                self.cards.remove(pos);
                self.staged.push(card);
                true
            }
            None => false,
        }
    }

    /// Вернуть все выбранные карты обратно в руку.
    pub fn unstage_all(&mut self) {
        let staged = std::mem::take(&mut self.staged);
        self.receive(staged);
    }

    /// Убрать сыгранные карты. Вызывается только после успешной валидации,
    /// поэтому отсутствие карты здесь = ошибка программиста, а не игрока.
    pub fn remove_played(&mut self, played: &[Card]) {
        self.unstage_all();
        self.cards.retain(|c| !played.contains(c));
    }
}
