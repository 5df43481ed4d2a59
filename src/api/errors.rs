use serde::{Deserialize, Serialize};

use crate::domain::SessionId;
use crate::engine::{EngineError, LobbyError, PassError, PlayError};

/// Ошибки внешнего API (то, что отдаём клиенту / слою сообщений).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON или карта "1x").
    BadRequest(String),

    /// Партия не найдена.
    SessionNotFound(SessionId),

    /// Ход/пас отклонён правилами игры.
    Rejected(String),

    /// Ошибка движка (лобби, настройки, состояние партии).
    EngineError(String),

    /// Внутренняя ошибка сервера.
    Internal(String),
}

impl From<PlayError> for ApiError {
    fn from(err: PlayError) -> Self {
        match err {
            PlayError::SessionNotFound(id) => ApiError::SessionNotFound(id),
            other => ApiError::Rejected(other.to_string()),
        }
    }
}

impl From<PassError> for ApiError {
    fn from(err: PassError) -> Self {
        match err {
            PassError::SessionNotFound(id) => ApiError::SessionNotFound(id),
            other => ApiError::Rejected(other.to_string()),
        }
    }
}

impl From<LobbyError> for ApiError {
    fn from(err: LobbyError) -> Self {
        match err {
            LobbyError::LobbyNotFound(id) => ApiError::SessionNotFound(id),
            other => ApiError::EngineError(other.to_string()),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Play(e) => e.into(),
            EngineError::Pass(e) => e.into(),
            EngineError::Lobby(e) => e.into(),
            EngineError::SessionNotFound(id) => ApiError::SessionNotFound(id),
            e @ EngineError::PlayerNotAtSeat { .. } => ApiError::Rejected(e.to_string()),
            other => ApiError::EngineError(other.to_string()),
        }
    }
}
