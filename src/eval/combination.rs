use serde::{Deserialize, Serialize};

/// Категория комбинации Big Two.
///
/// Порядок объявления = порядок силы. Сравнивать категории между собой имеет смысл
/// только внутри одного размера (5-карточные между собой, драконы между собой).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CombinationCategory {
    Single,
    Pair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    Dragon,
    SameSuitDragon,
}

impl CombinationCategory {
    /// Сколько карт в комбинации этой категории.
    pub const fn card_count(self) -> usize {
        match self {
            CombinationCategory::Single => 1,
            CombinationCategory::Pair => 2,
            CombinationCategory::ThreeOfAKind => 3,
            CombinationCategory::Straight
            | CombinationCategory::Flush
            | CombinationCategory::FullHouse
            | CombinationCategory::FourOfAKind
            | CombinationCategory::StraightFlush => 5,
            CombinationCategory::Dragon | CombinationCategory::SameSuitDragon => 13,
        }
    }

    /// "Бомбы": то, что удваивает проигрыш, если осталось на руках.
    pub const fn is_bomb(self) -> bool {
        matches!(
            self,
            CombinationCategory::FourOfAKind | CombinationCategory::StraightFlush
        )
    }
}

/// Человеческое описание категории (без локализации: это забота фронта).
pub fn describe_category(category: CombinationCategory) -> &'static str {
    match category {
        CombinationCategory::Single => "Single",
        CombinationCategory::Pair => "Pair",
        CombinationCategory::ThreeOfAKind => "Three of a kind",
        CombinationCategory::Straight => "Straight",
        CombinationCategory::Flush => "Flush",
        CombinationCategory::FullHouse => "Full house",
        CombinationCategory::FourOfAKind => "Four of a kind",
        CombinationCategory::StraightFlush => "Straight flush",
        CombinationCategory::Dragon => "Dragon",
        CombinationCategory::SameSuitDragon => "Same-suit dragon",
    }
}
