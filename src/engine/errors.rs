use thiserror::Error;

use crate::domain::card::Card;
use crate::domain::settings::SettingsError;
use crate::domain::{PlayerId, SeatIndex, SessionId};

/// Почему ход картами отклонён.
///
/// Во всех случаях состояние партии не меняется,
/// выбранные (staged) карты возвращаются игроку на руку.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlayError {
    #[error("Партия {0} не найдена")]
    SessionNotFound(SessionId),

    #[error("Партия уже завершена")]
    SessionAlreadyTerminal,

    #[error("Место {0} не существует за столом")]
    InvalidSeat(SeatIndex),

    #[error("Сейчас ход места {expected}, а не {actual}")]
    WrongTurn {
        expected: SeatIndex,
        actual: SeatIndex,
    },

    #[error("Не выбрано ни одной карты")]
    EmptyPlay,

    #[error("Карта {0} указана дважды")]
    DuplicateCard(Card),

    #[error("Карты {0} нет на руке")]
    CardNotHeld(Card),

    #[error("Эти карты не образуют комбинацию")]
    InvalidCombination,

    #[error("Первый ход партии должен содержать 3♦")]
    OpeningMustContainLowestCard,

    #[error("На столе комбинация из {expected} карт, а выложено {actual}")]
    WrongSize { expected: usize, actual: usize },

    #[error("Комбинация не бьёт ту, что на столе")]
    NotBigEnough,
}

/// Почему пас отклонён.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PassError {
    #[error("Партия {0} не найдена")]
    SessionNotFound(SessionId),

    #[error("Партия уже завершена")]
    SessionAlreadyTerminal,

    #[error("Место {0} не существует за столом")]
    InvalidSeat(SeatIndex),

    #[error("Сейчас ход места {expected}, а не {actual}")]
    WrongTurn {
        expected: SeatIndex,
        actual: SeatIndex,
    },

    #[error("Игрок под контролем не может пасовать")]
    ControlPlayerCannotPass,
}

/// Ошибки сбора игроков.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LobbyError {
    #[error("Лобби {0} не найдено")]
    LobbyNotFound(SessionId),

    #[error("Игрок {0} уже в этой партии")]
    AlreadyJoined(PlayerId),

    #[error("Игрок {player_id} уже играет в партии {session_id}")]
    PlayerInAnotherSession {
        player_id: PlayerId,
        session_id: SessionId,
    },

    #[error("За столом уже 4 игрока")]
    LobbyFull,

    #[error("У игрока {0} нет денег для игры на деньги")]
    InsufficientBalance(PlayerId),
}

/// Общая ошибка движка.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Play(#[from] PlayError),

    #[error(transparent)]
    Pass(#[from] PassError),

    #[error(transparent)]
    Lobby(#[from] LobbyError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Партия {0} не найдена")]
    SessionNotFound(SessionId),

    #[error("Партия {0} уже идёт")]
    SessionInProgress(SessionId),

    #[error("Партия уже завершена")]
    SessionAlreadyTerminal,

    #[error("Игрок {0} указан дважды")]
    DuplicatePlayer(PlayerId),

    #[error("Раздача некорректна: {0}")]
    InvalidDeal(&'static str),

    #[error("Игрок {player_id} не сидит на месте {seat}")]
    PlayerNotAtSeat { player_id: PlayerId, seat: SeatIndex },

    #[error("Снимок партии повреждён: {0}")]
    InvalidSnapshot(&'static str),
}
