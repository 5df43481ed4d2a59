//! Сбор игроков до раздачи.
//!
//! Лобби живёт от открытия до четвёртого игрока (тогда партия раздаётся)
//! или до истечения таймера сбора (тогда лобби закрывается).

use serde::{Deserialize, Serialize};

use crate::domain::player::PlayerProfile;
use crate::domain::settings::GameSettings;
use crate::domain::table::NUM_SEATS;
use crate::domain::{PlayerId, SessionId};
use crate::engine::errors::LobbyError;
use crate::engine::RandomSource;

/// Что произошло после присоединения.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Ждём остальных.
    Waiting { joined: usize },
    /// Четвёртый игрок: партия роздана.
    Dealt,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lobby {
    pub session_id: SessionId,
    pub settings: GameSettings,
    pub joined: Vec<PlayerProfile>,
}

impl Lobby {
    pub fn new(session_id: SessionId, settings: GameSettings) -> Self {
        Self {
            session_id,
            settings,
            joined: Vec::with_capacity(NUM_SEATS),
        }
    }

    pub fn is_full(&self) -> bool {
        self.joined.len() == NUM_SEATS
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.joined.iter().any(|p| p.id == player_id)
    }

    /// Добавить игрока.
    ///
    /// `balance` учитывается только в денежном режиме: с пустым кошельком не садятся.
    pub fn join(&mut self, profile: PlayerProfile, balance: i64) -> Result<usize, LobbyError> {
        if self.contains(profile.id) {
            return Err(LobbyError::AlreadyJoined(profile.id));
        }
        if self.is_full() {
            return Err(LobbyError::LobbyFull);
        }
        if self.settings.is_money_mode() && balance <= 0 {
            return Err(LobbyError::InsufficientBalance(profile.id));
        }
        self.joined.push(profile);
        Ok(self.joined.len())
    }

    /// Случайная рассадка полного лобби. `None`, если игроков меньше четырёх.
    pub fn seating<R: RandomSource>(&self, rng: &mut R) -> Option<[PlayerId; NUM_SEATS]> {
        if !self.is_full() {
            return None;
        }
        let mut ids: Vec<PlayerId> = self.joined.iter().map(|p| p.id).collect();
        rng.shuffle(&mut ids);
        let mut seats = [0; NUM_SEATS];
        seats.copy_from_slice(&ids);
        Some(seats)
    }
}
