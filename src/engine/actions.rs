use serde::{Deserialize, Serialize};

use crate::domain::{Card, PlayerId, SeatIndex};

/// Тип действия игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    /// Выложить комбинацию.
    Play(Vec<Card>),
    /// Пропустить ход.
    Pass,
}

/// Конкретное действие игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    /// Какой игрок действует.
    pub player_id: PlayerId,
    /// В каком месте он сидит (0..3).
    pub seat: SeatIndex,
    /// Само действие.
    pub kind: PlayerActionKind,
}

impl PlayerAction {
    pub fn play(player_id: PlayerId, seat: SeatIndex, cards: Vec<Card>) -> Self {
        Self {
            player_id,
            seat,
            kind: PlayerActionKind::Play(cards),
        }
    }

    pub fn pass(player_id: PlayerId, seat: SeatIndex) -> Self {
        Self {
            player_id,
            seat,
            kind: PlayerActionKind::Pass,
        }
    }
}
