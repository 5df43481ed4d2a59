use core::iter::Sum;
use core::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Денежная сумма ставки. Обёртка над u64, чтобы не путать с количеством карт.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Chips(pub u64);

impl Chips {
    pub const ZERO: Chips = Chips(0);

    pub fn new(amount: u64) -> Self {
        Chips(amount)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Умножить на количество (например, базовая ставка × число карт).
    pub fn times(self, n: u64) -> Chips {
        Chips(self.0.saturating_mul(n))
    }

    /// Удвоить `n` раз.
    pub fn doubled(self, n: u32) -> Chips {
        let factor = 1u64.checked_shl(n).unwrap_or(u64::MAX);
        Chips(self.0.saturating_mul(factor))
    }

    /// Как знаковое изменение баланса.
    pub fn as_delta(self) -> i64 {
        i64::try_from(self.0).unwrap_or(i64::MAX)
    }
}

impl Add for Chips {
    type Output = Chips;

    fn add(self, rhs: Chips) -> Self::Output {
        Chips(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Chips {
    fn add_assign(&mut self, rhs: Chips) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for Chips {
    fn sum<I: Iterator<Item = Chips>>(iter: I) -> Self {
        iter.fold(Chips::ZERO, |acc, c| acc + c)
    }
}
