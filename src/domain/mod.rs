//! Доменная модель Big Two: карты, колода, комбинации, игроки, стол, настройки.

pub mod card;
pub mod chips;
pub mod deck;
pub mod hand;
pub mod player;
pub mod settings;
pub mod stats;
pub mod table;

// Базовые идентификаторы.
pub type PlayerId = u64;
pub type SessionId = u64;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use chips::*;
pub use deck::*;
pub use hand::*;
pub use player::*;
pub use settings::*;
pub use stats::*;
pub use table::*;
