//! Движок Big Two: раздача, очередь ходов, контроль стола, пасы, победа и расчёт.
//!
//! Высокоуровневый объект: `GameSession`
//! Основные операции:
//!   - `start_game` – раздать партию на четырёх игроков
//!   - `GameSession::apply_play` / `apply_pass` – ход игрока
//!   - `GameSession::force_pass` / `abandon` – входы для внешнего планировщика
//!
//! Над отдельными партиями: `SessionManager` (лобби, много партий, очередь событий).

pub mod actions;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod lobby;
pub mod positions;
pub mod session_manager;
pub mod settlement;
pub mod validation;

pub use actions::{PlayerAction, PlayerActionKind};
pub use errors::{EngineError, LobbyError, PassError, PlayError};
pub use game_loop::{start_game, GameSession, TurnOutcome};
pub use hand_history::{AbortReason, GameEvent, GameEventKind, GameHistory};
pub use lobby::{JoinOutcome, Lobby};
pub use session_manager::SessionManager;
pub use settlement::{max_stake_loss, settle, stake_loss, stake_loss_ceiling};

/// RNG интерфейс для engine.
/// Реализации лежат в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
