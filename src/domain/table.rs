use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::hand::Hand;

/// Индекс места за столом (0..NUM_SEATS-1).
pub type SeatIndex = u8;

/// Big Two всегда играется вчетвером.
pub const NUM_SEATS: usize = 4;

/// Карт на руке после раздачи.
pub const HAND_SIZE: usize = 13;

/// Фаза розыгрыша.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TablePhase {
    /// На столе нет комбинации: игрок под контролем ходит чем угодно
    /// (в первом раунде: обязательно с 3♦).
    AwaitingOpeningPlay,
    /// На столе лежит комбинация, остальные бьют или пасуют.
    AwaitingResponse,
    /// Кто-то сбросил все карты: партия окончена.
    HandEmptied { winner: SeatIndex },
    /// Партия прервана снаружи (idle, force stop, недобор игроков).
    Aborted,
}

/// Состояние розыгрыша (раунд/взятка).
///
/// Инвариант: `active` равен `None` только до первого хода партии
/// или сразу после того, как ход вернулся к `control_seat` по кругу пасов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableState {
    /// Номер хода, начиная с 1. Растёт на каждом принятом ходе и пасе.
    pub round_number: u32,
    /// Чей сейчас ход.
    pub turn_seat: SeatIndex,
    /// Чья комбинация лежит на столе и ещё не побита.
    pub control_seat: SeatIndex,
    /// Текущая комбинация на столе.
    pub active: Option<Hand>,
    /// Пасов подряд после последней комбинации.
    pub consecutive_passes: u8,
    /// Принудительных (по таймеру) пасов подряд: для детекта брошенной партии.
    pub idle_passes: u8,
    pub phase: TablePhase,
}

impl TableState {
    /// Начальное состояние: ходит владелец 3♦.
    pub fn opening(first_seat: SeatIndex) -> Self {
        Self {
            round_number: 1,
            turn_seat: first_seat,
            control_seat: first_seat,
            active: None,
            consecutive_passes: 0,
            idle_passes: 0,
            phase: TablePhase::AwaitingOpeningPlay,
        }
    }

    pub fn is_first_round(&self) -> bool {
        self.round_number == 1
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.phase,
            TablePhase::HandEmptied { .. } | TablePhase::Aborted
        )
    }

    /// Снять состояние стола для уведомлений/DTO.
    pub fn snapshot(&self, cards_remaining: [u8; NUM_SEATS]) -> TableSnapshot {
        TableSnapshot {
            round_number: self.round_number,
            turn_seat: self.turn_seat,
            control_seat: self.control_seat,
            active_cards: self
                .active
                .as_ref()
                .map(|h| h.cards().to_vec())
                .unwrap_or_default(),
            cards_remaining,
        }
    }
}

/// Публичный снимок стола: то, что видят все игроки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSnapshot {
    pub round_number: u32,
    pub turn_seat: SeatIndex,
    pub control_seat: SeatIndex,
    /// Пусто, если стол очищен.
    pub active_cards: Vec<Card>,
    /// Сколько карт на руках у каждого места.
    pub cards_remaining: [u8; NUM_SEATS],
}
