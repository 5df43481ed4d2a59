use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Масть карты.
///
/// Порядок объявления = порядок старшинства в Big Two:
/// ♦ < ♣ < ♥ < ♠. Масть используется только как тай-брейк.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Suit {
    Diamonds, // ♦
    Clubs,    // ♣
    Hearts,   // ♥
    Spades,   // ♠
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Diamonds, Suit::Clubs, Suit::Hearts, Suit::Spades];
}

/// Ранг карты.
///
/// Игровой порядок: 3 < 4 < … < K < A < 2. Двойка старше всех,
/// поэтому `Two` стоит последней и имеет значение 15.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Three = 3,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    Two,
}

impl Rank {
    /// Все 13 рангов по возрастанию силы.
    pub const ALL: [Rank; 13] = [
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
        Rank::Two,
    ];

    /// Порядковый индекс ранга 0..=12 (3 → 0, 2 → 12).
    pub const fn index(self) -> usize {
        self as usize - 3
    }
}

/// Карта стандартной 52-карточной колоды.
///
/// Порядок полей важен: derive(Ord) сравнивает сначала ранг, потом масть,
/// что и есть сила одиночной карты в Big Two.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// 3♦: обязательная карта первого хода.
    pub const THREE_OF_DIAMONDS: Card = Card::new(Rank::Three, Suit::Diamonds);
    /// 2♠: самая сильная карта колоды.
    pub const TWO_OF_SPADES: Card = Card::new(Rank::Two, Suit::Spades);

    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
            Rank::Two => '2',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Card {
    /// Формат вида `3d`, `Ts`, `2s`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Парсинг строки вида "3d", "Ts", "10h", "2s".
impl FromStr for Card {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rank_part, suit_part) = match s.char_indices().last() {
            Some((idx, _)) if idx > 0 => s.split_at(idx),
            _ => return Err(format!("Card string too short: {s:?}")),
        };

        let rank = match rank_part {
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "T" | "t" | "10" => Rank::Ten,
            "J" | "j" => Rank::Jack,
            "Q" | "q" => Rank::Queen,
            "K" | "k" => Rank::King,
            "A" | "a" => Rank::Ace,
            "2" => Rank::Two,
            _ => return Err(format!("Invalid rank: {rank_part}")),
        };

        let suit = match suit_part {
            "d" | "D" => Suit::Diamonds,
            "c" | "C" => Suit::Clubs,
            "h" | "H" => Suit::Hearts,
            "s" | "S" => Suit::Spades,
            _ => return Err(format!("Invalid suit: {suit_part}")),
        };

        Ok(Card { rank, suit })
    }
}

/// Разобрать список карт через пробел/запятую: "3d 4d 5d".
pub fn parse_cards(s: &str) -> Result<Vec<Card>, String> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect()
}

/// Сортировка по силе (ранг, затем масть): стандартный вид руки.
pub fn sort_by_rank(cards: &mut [Card]) {
    cards.sort();
}

/// Сортировка по масти, внутри масти: по рангу.
pub fn sort_by_suit(cards: &mut [Card]) {
    cards.sort_by(|a, b| a.suit.cmp(&b.suit).then(a.rank.cmp(&b.rank)));
}
