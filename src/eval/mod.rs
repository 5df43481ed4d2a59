//! Модуль оценки комбинаций Big Two.
//!
//! Основные функции:
//!   `classify(cards) -> Option<CombinationCategory>`
//!   `is_greater(table, candidate) -> bool`

pub mod classifier;
pub mod combination;
pub mod comparator;
pub mod evaluator;
pub mod lookup_tables;

pub use classifier::classify;
pub use combination::{describe_category, CombinationCategory};
pub use comparator::is_greater;
pub use evaluator::{contains_bomb, legal_plays};
