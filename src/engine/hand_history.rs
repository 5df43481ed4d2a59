use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::table::{SeatIndex, TableSnapshot, NUM_SEATS};
use crate::domain::{PlayerId, SessionId};
use crate::eval::CombinationCategory;

/// Почему партия прервана, не дойдя до победителя.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AbortReason {
    /// Слишком много пасов по таймеру подряд.
    Idle,
    /// Остановлена снаружи (админ, /stop).
    ForceStopped,
    /// За время сбора не набралось 4 игрока.
    NotEnoughPlayers,
}

/// Тип события в партии.
///
/// Это же исходящие уведомления для слоя сообщений.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameEventKind {
    /// Партия собрана и роздана.
    GameStarted {
        seats: [PlayerId; NUM_SEATS],
        first_seat: SeatIndex,
    },

    /// Игрок получил карты.
    CardsDealt { seat: SeatIndex, cards: Vec<Card> },

    /// Принятый ход картами.
    Played {
        seat: SeatIndex,
        player_id: PlayerId,
        cards: Vec<Card>,
        category: CombinationCategory,
    },

    /// Пас. `forced = true`: пас по таймеру.
    Passed { seat: SeatIndex, forced: bool },

    /// Ход перешёл к следующему месту.
    TurnAdvanced {
        next_seat: SeatIndex,
        table_snapshot: TableSnapshot,
    },

    /// Стол очищен, `leader` ходит чем угодно.
    RoundCleared { leader: SeatIndex },

    /// Игрок сбросил все карты.
    HandEmptied {
        winner_seat: SeatIndex,
        final_cards: Vec<Card>,
    },

    /// Партия прервана.
    SessionAborted { reason: AbortReason },

    /// Денежный расчёт (по местам 0..3).
    StakesSettled { deltas: [i64; NUM_SEATS] },
}

/// Событие в партии с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameEvent {
    pub index: u32,
    pub session_id: SessionId,
    pub kind: GameEventKind,
}

/// Полная история партии.
///
/// `published`: сколько событий уже отдано наружу (`take_unpublished`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameHistory {
    pub session_id: SessionId,
    pub events: Vec<GameEvent>,
    published: usize,
}

impl GameHistory {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            events: Vec::new(),
            published: 0,
        }
    }

    pub fn push(&mut self, kind: GameEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(GameEvent {
            index: idx,
            session_id: self.session_id,
            kind,
        });
    }

    /// Забрать события, которые ещё не уходили наружу.
    pub fn take_unpublished(&mut self) -> Vec<GameEvent> {
        let fresh = self.events[self.published..].to_vec();
        self.published = self.events.len();
        fresh
    }

    pub fn last(&self) -> Option<&GameEvent> {
        self.events.last()
    }

    /// Номера событий идут подряд с нуля, счётчик отданных не убегает за конец.
    pub fn is_consistent(&self) -> bool {
        self.published <= self.events.len()
            && self
                .events
                .iter()
                .enumerate()
                .all(|(i, e)| e.index as usize == i && e.session_id == self.session_id)
    }
}
