use crate::domain::card::{Card, Rank};

/// Битовая маска рангов.
///
/// Используем 13 бит в игровом порядке:
/// бит 0 = тройка, бит 12 = двойка.
pub type RankMask = u16;

/// Маска "все 13 рангов": дракон.
pub const ALL_RANKS_MASK: RankMask = (1 << 13) - 1;

/// Все допустимые 5-карточные "ряды" (стриты).
///
/// Индексы:
///    0: 3-4-5-A-2  (wheel: двойка и туз играют снизу)
///    1: 3-4-5-6-2  (wheel: двойка играет снизу)
///    2: 34567
///    3: 45678
///    4: 56789
///    5: 6789T
///    6: 789TJ
///    7: 89TJQ
///    8: 9TJQK
///    9: TJQKA
///   10: JQKA2
pub const RUN_MASKS: [RankMask; 11] = [
    mask_from_ranks(&[Rank::Three, Rank::Four, Rank::Five, Rank::Ace, Rank::Two]),
    mask_from_ranks(&[Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Two]),
    mask_from_ranks(&[Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven]),
    mask_from_ranks(&[Rank::Four, Rank::Five, Rank::Six, Rank::Seven, Rank::Eight]),
    mask_from_ranks(&[Rank::Five, Rank::Six, Rank::Seven, Rank::Eight, Rank::Nine]),
    mask_from_ranks(&[Rank::Six, Rank::Seven, Rank::Eight, Rank::Nine, Rank::Ten]),
    mask_from_ranks(&[Rank::Seven, Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack]),
    mask_from_ranks(&[Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen]),
    mask_from_ranks(&[Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King]),
    mask_from_ranks(&[Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace]),
    mask_from_ranks(&[Rank::Jack, Rank::Queen, Rank::King, Rank::Ace, Rank::Two]),
];

/// Получить битовую маску для одного ранга.
pub fn rank_to_bit(rank: Rank) -> RankMask {
    1u16 << rank.index()
}

/// Построить маску из списка рангов.
pub const fn mask_from_ranks(ranks: &[Rank]) -> RankMask {
    let mut mask: RankMask = 0;
    let mut i = 0;
    while i < ranks.len() {
        mask |= 1 << ranks[i].index();
        i += 1;
    }
    mask
}

/// Маска рангов набора карт (повторы рангов схлопываются).
pub fn rank_mask(cards: &[Card]) -> RankMask {
    cards.iter().fold(0, |m, c| m | rank_to_bit(c.rank))
}

/// Образуют ли ранги ровно один из допустимых рядов.
pub fn is_run(rank_mask: RankMask) -> bool {
    RUN_MASKS.contains(&rank_mask)
}

/// Счётчики по рангам, индекс = `Rank::index()`.
pub fn rank_counts(cards: &[Card]) -> [u8; 13] {
    let mut counts = [0u8; 13];
    for card in cards {
        counts[card.rank.index()] += 1;
    }
    counts
}

/// Форма набора: количества одинаковых рангов по убыванию, например [4,1] или [3,2].
pub fn rank_shape(cards: &[Card]) -> Vec<u8> {
    let mut shape: Vec<u8> = rank_counts(cards).into_iter().filter(|&c| c > 0).collect();
    shape.sort_unstable_by(|a, b| b.cmp(a));
    shape
}

/// Ранг, встречающийся ровно `count` раз (для каре/фулл-хауса).
pub fn rank_with_count(cards: &[Card], count: u8) -> Option<Rank> {
    let counts = rank_counts(cards);
    Rank::ALL.into_iter().find(|r| counts[r.index()] == count)
}
