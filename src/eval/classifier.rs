use crate::domain::card::Card;
use crate::domain::hand::Hand;

use super::combination::CombinationCategory;
use super::lookup_tables::{is_run, rank_mask, rank_shape, ALL_RANKS_MASK};

/// Определить категорию комбинации.
///
/// `None` = недопустимый набор. Это обычное значение, а не ошибка:
/// вызывающий код обязан явно его обработать.
///
/// Функция чистая и не зависит от порядка карт.
pub fn classify(cards: &[Card]) -> Option<CombinationCategory> {
    match cards.len() {
        1 => Some(CombinationCategory::Single),
        2 => same_rank(cards).then_some(CombinationCategory::Pair),
        3 => same_rank(cards).then_some(CombinationCategory::ThreeOfAKind),
        5 => classify_five(cards),
        13 => classify_thirteen(cards),
        _ => None,
    }
}

impl Hand {
    /// Категория комбинации (см. `classify`).
    pub fn category(&self) -> Option<CombinationCategory> {
        classify(self.cards())
    }
}

fn same_rank(cards: &[Card]) -> bool {
    cards.windows(2).all(|w| w[0].rank == w[1].rank)
}

fn same_suit(cards: &[Card]) -> bool {
    cards.windows(2).all(|w| w[0].suit == w[1].suit)
}

/// 5 карт: первая подходящая проверка выигрывает.
fn classify_five(cards: &[Card]) -> Option<CombinationCategory> {
    let flush = same_suit(cards);
    let run = is_run(rank_mask(cards));

    if flush && run {
        return Some(CombinationCategory::StraightFlush);
    }
    if flush {
        return Some(CombinationCategory::Flush);
    }

    match rank_shape(cards).as_slice() {
        [4, 1] => return Some(CombinationCategory::FourOfAKind),
        [3, 2] => return Some(CombinationCategory::FullHouse),
        _ => {}
    }

    run.then_some(CombinationCategory::Straight)
}

/// 13 карт: дракон, если есть каждый ранг ровно по разу.
fn classify_thirteen(cards: &[Card]) -> Option<CombinationCategory> {
    if rank_mask(cards) != ALL_RANKS_MASK {
        return None;
    }
    if same_suit(cards) {
        Some(CombinationCategory::SameSuitDragon)
    } else {
        Some(CombinationCategory::Dragon)
    }
}
