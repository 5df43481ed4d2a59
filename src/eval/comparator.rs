use std::cmp::Ordering;

use crate::domain::card::Card;

use super::classifier::classify;
use super::combination::CombinationCategory;
use super::lookup_tables::rank_with_count;

/// Бьёт ли `candidate` комбинацию `table`.
///
/// - пустой стол (`table` без карт) бьётся любой допустимой комбинацией;
/// - разный размер или недопустимый набор → `false`;
/// - 13-карточные руки не сравниваются → всегда `false`.
///
/// Не паникует ни на каком входе.
pub fn is_greater(table: &[Card], candidate: &[Card]) -> bool {
    let Some(cand_cat) = classify(candidate) else {
        return false;
    };
    if table.is_empty() {
        return true;
    }
    let Some(table_cat) = classify(table) else {
        return false;
    };
    if table.len() != candidate.len() {
        return false;
    }

    let mut t = table.to_vec();
    let mut c = candidate.to_vec();
    t.sort();
    c.sort();

    compare_same_size(table_cat, &t, cand_cat, &c) == Ordering::Greater
}

/// Сравнение двух отсортированных комбинаций одного размера (`candidate` против `table`).
fn compare_same_size(
    table_cat: CombinationCategory,
    table: &[Card],
    cand_cat: CombinationCategory,
    cand: &[Card],
) -> Ordering {
    match cand.len() {
        1 => cand[0].cmp(&table[0]),
        2 | 3 => compare_same_rank_group(table, cand),
        5 => compare_five(table_cat, table, cand_cat, cand),
        _ => Ordering::Equal,
    }
}

/// Пара/тройка: сначала ранг, потом старшая масть в группе.
/// После сортировки старшая карта группы: последняя.
fn compare_same_rank_group(table: &[Card], cand: &[Card]) -> Ordering {
    let t_top = table[table.len() - 1];
    let c_top = cand[cand.len() - 1];
    c_top.rank.cmp(&t_top.rank).then(c_top.suit.cmp(&t_top.suit))
}

fn compare_five(
    table_cat: CombinationCategory,
    table: &[Card],
    cand_cat: CombinationCategory,
    cand: &[Card],
) -> Ordering {
    if cand_cat != table_cat {
        return cand_cat.cmp(&table_cat);
    }

    match cand_cat {
        CombinationCategory::StraightFlush => cand[0]
            .suit
            .cmp(&table[0].suit)
            .then(cand[4].rank.cmp(&table[4].rank)),
        CombinationCategory::FourOfAKind => rank_with_count(cand, 4).cmp(&rank_with_count(table, 4)),
        CombinationCategory::FullHouse => rank_with_count(cand, 3).cmp(&rank_with_count(table, 3)),
        CombinationCategory::Flush => cand[0]
            .suit
            .cmp(&table[0].suit)
            .then_with(|| compare_ranks_desc(table, cand)),
        CombinationCategory::Straight => {
            compare_ranks_desc(table, cand).then(cand[4].suit.cmp(&table[4].suit))
        }
        _ => Ordering::Equal,
    }
}

/// Ранги от старшего к младшему, первое различие решает.
fn compare_ranks_desc(table: &[Card], cand: &[Card]) -> Ordering {
    cand.iter()
        .rev()
        .zip(table.iter().rev())
        .map(|(c, t)| c.rank.cmp(&t.rank))
        .find(|o| *o != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}
