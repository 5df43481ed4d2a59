//! Денежный расчёт по итогам партии.
//!
//! Каждый проигравший платит победителю сумму, которая зависит только
//! от оставшихся у него карт и от того, сколько карт вообще ушло на стол.

use crate::domain::card::{Card, Rank};
use crate::domain::chips::Chips;
use crate::domain::settings::MAX_STAKE_DOUBLINGS;
use crate::domain::table::{SeatIndex, HAND_SIZE, NUM_SEATS};
use crate::eval::contains_bomb;

/// С какого количества карт на руках проигрыш удваивается.
pub const MANY_CARDS_THRESHOLD: usize = 10;

/// Число удвоений в объявляемой верхней границе проигрыша.
const MAX_DOUBLINGS: u32 = 5;

/// Проигрыш одного игрока.
///
/// - `held`: карты, оставшиеся на руках;
/// - `base`: цена одной карты;
/// - `cards_played_by_table`: сколько карт всего выложено за партию.
///   Если это ровно 13, значит ходил только победитель.
pub fn stake_loss(held: &[Card], base: Chips, cards_played_by_table: usize) -> Chips {
    let mut doublings: u32 = 0;

    if held.len() >= MANY_CARDS_THRESHOLD {
        doublings += 1;
    }

    doublings += held.iter().filter(|c| c.rank == Rank::Two).count() as u32;

    if held.len() == HAND_SIZE {
        doublings += 1;
    }

    if cards_played_by_table == HAND_SIZE {
        doublings += 1;
    }

    if contains_bomb(held) {
        doublings += 1;
    }

    base.times(held.len() as u64).doubled(doublings)
}

/// Объявляемый максимум проигрыша (предупреждение перед денежной игрой).
///
/// Это типичный худший случай, а не строгая граница: с несколькими двойками
/// на руках проигрыш бывает больше, строгая граница в `stake_loss_ceiling`.
pub fn max_stake_loss(base: Chips) -> Chips {
    base.times(HAND_SIZE as u64).doubled(MAX_DOUBLINGS)
}

/// Строгая верхняя граница проигрыша одного игрока.
pub fn stake_loss_ceiling(base: Chips) -> Chips {
    base.times(HAND_SIZE as u64).doubled(MAX_STAKE_DOUBLINGS)
}

/// Расчёт по всем местам: проигравшие платят, победитель получает сумму.
///
/// Сумма всех изменений всегда равна нулю. Для ставок из `GameSettings::validate`
/// урезание проигрыша никогда не срабатывает (см. `MAX_BASE_UNIT`).
pub fn settle(
    held: &[Vec<Card>; NUM_SEATS],
    winner: SeatIndex,
    base: Chips,
    cards_played_by_table: usize,
) -> [i64; NUM_SEATS] {
    let mut deltas = [0i64; NUM_SEATS];
    let mut pot: i64 = 0;

    for (seat, cards) in held.iter().enumerate() {
        if seat == winner as usize {
            continue;
        }
        // Банк не переполняется: при огромной ставке проигрыш урезается до остатка.
        let loss = stake_loss(cards, base, cards_played_by_table)
            .as_delta()
            .min(i64::MAX - pot);
        deltas[seat] = -loss;
        pot += loss;
    }

    deltas[winner as usize] = pot;
    deltas
}
