use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{PlayerId, SessionId};

/// Простая генерация ID на основе монотонных счётчиков.
///
/// Снаружи (чат-бот) id игроков обычно приходят готовыми,
/// генератор нужен для партий, тестов и локальных симуляций.
#[derive(Debug)]
pub struct IdGenerator {
    session_counter: AtomicU64,
    player_counter: AtomicU64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Создать генератор с начальным значением 1 для всех сущностей.
    pub fn new() -> Self {
        Self {
            session_counter: AtomicU64::new(1),
            player_counter: AtomicU64::new(1),
        }
    }

    #[inline]
    pub fn next_session_id(&self) -> SessionId {
        self.session_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_player_id(&self) -> PlayerId {
        self.player_counter.fetch_add(1, Ordering::Relaxed)
    }

    /// Учесть id, пришедший извне (восстановление из снимка),
    /// чтобы следующие id с ним не совпали.
    pub fn observe_session_id(&self, seen: SessionId) {
        self.session_counter
            .fetch_max(seen.saturating_add(1), Ordering::Relaxed);
    }
}
