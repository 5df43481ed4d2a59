use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::player::PlayerAtSeat;
use crate::domain::settings::GameSettings;
use crate::domain::table::{TableState, HAND_SIZE, NUM_SEATS};
use crate::domain::SessionId;
use crate::engine::errors::EngineError;
use crate::engine::game_loop::GameSession;
use crate::engine::hand_history::GameHistory;
use crate::engine::positions::is_valid_seat;
use crate::eval::classify;

/// Снэпшот GameSession, который можно отдать внешнему хранилищу.
/// Это «замороженная» партия: всё, что нужно, чтобы восстановить GameSession.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub settings: GameSettings,
    pub players: Vec<PlayerAtSeat>,
    pub table: TableState,
    pub dealt: [u8; NUM_SEATS],
    pub history: GameHistory,
}

impl SessionSnapshot {
    /// Упаковать живую партию в снапшот.
    pub fn from_session(session: &GameSession) -> Self {
        Self {
            session_id: session.session_id,
            settings: session.settings.clone(),
            players: session.players.clone(),
            table: session.table.clone(),
            dealt: session.dealt,
            history: session.history.clone(),
        }
    }

    /// Проверить снимок, пришедший из внешнего хранилища.
    ///
    /// Живая партия из такого снимка не должна паниковать ни на одном ходе.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.settings.validate()?;

        if self.players.len() != NUM_SEATS {
            return Err(EngineError::InvalidSnapshot("за столом должно быть 4 места"));
        }
        for (i, p) in self.players.iter().enumerate() {
            if p.seat as usize != i {
                return Err(EngineError::InvalidSnapshot("место игрока не совпадает с индексом"));
            }
            if self.players[..i].iter().any(|q| q.player_id == p.player_id) {
                return Err(EngineError::DuplicatePlayer(p.player_id));
            }
            let dealt = self.dealt[i] as usize;
            if dealt == 0 || dealt > HAND_SIZE || p.cards_remaining() > dealt {
                return Err(EngineError::InvalidSnapshot("число карт не сходится с раздачей"));
            }
        }

        let table = &self.table;
        if !is_valid_seat(table.turn_seat) || !is_valid_seat(table.control_seat) {
            return Err(EngineError::InvalidSnapshot("ход или контроль у несуществующего места"));
        }
        if table.consecutive_passes as usize >= NUM_SEATS {
            return Err(EngineError::InvalidSnapshot("слишком много пасов подряд"));
        }

        let mut all: Vec<Card> = self.players.iter().flat_map(|p| p.all_cards()).collect();
        if let Some(active) = &table.active {
            if classify(active.cards()).is_none() {
                return Err(EngineError::InvalidSnapshot("на столе не комбинация"));
            }
            all.extend_from_slice(active.cards());
        }
        all.sort();
        if all.windows(2).any(|w| w[0] == w[1]) {
            return Err(EngineError::InvalidSnapshot("карта встречается дважды"));
        }

        if self.history.session_id != self.session_id || !self.history.is_consistent() {
            return Err(EngineError::InvalidSnapshot("история не от этой партии"));
        }
        Ok(())
    }

    /// Развернуть снапшот обратно в GameSession (в памяти). Снимок сначала проверяется.
    pub fn into_session(self) -> Result<GameSession, EngineError> {
        self.validate()?;
        Ok(GameSession {
            session_id: self.session_id,
            settings: self.settings,
            players: self.players,
            table: self.table,
            dealt: self.dealt,
            history: self.history,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
