use std::collections::HashMap;

use crate::domain::stats::{GroupStats, PlayerStats};
use crate::domain::{PlayerId, SessionId};
use crate::state::SessionSnapshot;

/// Абстракция хранилища.
///
/// Движок сам ничего не хранит: внешний слой сохраняет снимки партий
/// и статистику в ту базу, которая у него есть.
pub trait SessionStorage {
    /// Загрузить снимок идущей партии.
    fn load_session(&self, id: SessionId) -> Option<SessionSnapshot>;

    /// Сохранить снимок.
    fn save_session(&mut self, snapshot: &SessionSnapshot);

    /// Партия закончилась – снимок больше не нужен.
    fn remove_session(&mut self, id: SessionId);

    fn load_player_stats(&self, id: PlayerId) -> Option<PlayerStats>;

    fn save_player_stats(&mut self, stats: &PlayerStats);

    fn load_group_stats(&self) -> GroupStats;

    fn save_group_stats(&mut self, stats: &GroupStats);
}

/// Простая in-memory реализация для тестов и локального запуска.
#[derive(Debug, Default)]
pub struct InMemorySessionStorage {
    sessions: HashMap<SessionId, SessionSnapshot>,
    players: HashMap<PlayerId, PlayerStats>,
    group: GroupStats,
}

impl InMemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl SessionStorage for InMemorySessionStorage {
    fn load_session(&self, id: SessionId) -> Option<SessionSnapshot> {
        self.sessions.get(&id).cloned()
    }

    fn save_session(&mut self, snapshot: &SessionSnapshot) {
        self.sessions.insert(snapshot.session_id, snapshot.clone());
    }

    fn remove_session(&mut self, id: SessionId) {
        self.sessions.remove(&id);
    }

    fn load_player_stats(&self, id: PlayerId) -> Option<PlayerStats> {
        self.players.get(&id).cloned()
    }

    fn save_player_stats(&mut self, stats: &PlayerStats) {
        self.players.insert(stats.player_id, stats.clone());
    }

    fn load_group_stats(&self) -> GroupStats {
        self.group.clone()
    }

    fn save_group_stats(&mut self, stats: &GroupStats) {
        self.group = stats.clone();
    }
}
