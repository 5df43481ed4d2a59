//! Движок карточной игры Big Two на четырёх игроков.
//!
//! Слои:
//! - `domain` – карты, колода, руки, стол, настройки, статистика;
//! - `eval` – классификация и сравнение комбинаций;
//! - `engine` – партия (очередь ходов, контроль, пасы, победа, расчёт) и менеджер партий;
//! - `api` – команды / запросы / DTO для слоя сообщений;
//! - `infra` – RNG, id, хранилище, маппинги;
//! - `state` – сериализуемый снимок партии.
//!
//! Транспорт (чат-бот), локализация и таймеры живут снаружи:
//! движок только принимает `force_pass` / `abandon` от внешнего планировщика.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod state;

pub use state::SessionSnapshot;
