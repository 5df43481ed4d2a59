use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};
use crate::domain::table::{HAND_SIZE, NUM_SEATS};

/// Колода карт. В домене: просто упорядоченный список карт.
/// Перемешивание делает engine (через RNG из infra), НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// Diamonds 3..2, Clubs 3..2, Hearts 3..2, Spades 3..2.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Взять n карт сверху.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        let take = n.min(self.cards.len());
        let at = self.cards.len() - take;
        let mut taken = self.cards.split_off(at);
        taken.reverse();
        taken
    }

    /// Разложить колоду на 4 руки по 13 карт.
    ///
    /// Возвращает `None`, если в колоде не ровно 52 карты.
    pub fn deal_hands(&mut self) -> Option<[Vec<Card>; NUM_SEATS]> {
        if self.cards.len() != HAND_SIZE * NUM_SEATS {
            return None;
        }
        Some(std::array::from_fn(|_| self.draw_n(HAND_SIZE)))
    }
}
