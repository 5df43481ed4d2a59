use crate::domain::card::Card;
use crate::domain::hand::Hand;

use super::classifier::classify;
use super::comparator::is_greater;

/// Есть ли среди карт "бомба": 5-карточное подмножество, которое
/// классифицируется как стрит-флеш или каре.
///
/// Перебираем все сочетания по 5 (на руке максимум 13 карт → 1287 вариантов).
pub fn contains_bomb(cards: &[Card]) -> bool {
    let mut found = false;
    for_each_five(cards, |five| {
        if classify(&five[..]).is_some_and(|c| c.is_bomb()) {
            found = true;
        }
        found
    });
    found
}

/// Все допустимые ходы из `cards` против текущей комбинации на столе.
///
/// `active = None`: стол пуст (ход под контролем).
/// `must_include`: карта, которая обязана быть в ходе (3♦ на первом ходу).
///
/// Порядок результата: сначала по размеру, внутри размера: по порядку перебора.
pub fn legal_plays(
    cards: &[Card],
    active: Option<&Hand>,
    must_include: Option<Card>,
) -> Vec<Vec<Card>> {
    let mut sorted = cards.to_vec();
    sorted.sort();

    let table: &[Card] = active.map(Hand::cards).unwrap_or(&[]);
    let sizes: Vec<usize> = match active {
        Some(hand) => vec![hand.len()],
        None => vec![1, 2, 3, 5, 13],
    };

    let mut out = Vec::new();
    let mut accept = |candidate: &[Card]| {
        if let Some(card) = must_include {
            if !candidate.contains(&card) {
                return;
            }
        }
        if is_greater(table, candidate) {
            out.push(candidate.to_vec());
        }
    };

    for size in sizes {
        match size {
            1 => sorted.iter().for_each(|c| accept(std::slice::from_ref(c))),
            2 => {
                for i in 0..sorted.len() {
                    for j in (i + 1)..sorted.len() {
                        accept(&[sorted[i], sorted[j]][..]);
                    }
                }
            }
            3 => {
                for i in 0..sorted.len() {
                    for j in (i + 1)..sorted.len() {
                        for k in (j + 1)..sorted.len() {
                            accept(&[sorted[i], sorted[j], sorted[k]][..]);
                        }
                    }
                }
            }
            5 => for_each_five(&sorted, |five| {
                accept(&five[..]);
                false
            }),
            13 if sorted.len() == 13 => accept(&sorted[..]),
            _ => {}
        }
    }

    out
}

/// Перебор всех сочетаний по 5. Колбэк возвращает `true`, чтобы остановить перебор.
fn for_each_five<F>(cards: &[Card], mut f: F)
where
    F: FnMut(&[Card; 5]) -> bool,
{
    let n = cards.len();
    if n < 5 {
        return;
    }

    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        if f(&five) {
                            return;
                        }
                    }
                }
            }
        }
    }
}
