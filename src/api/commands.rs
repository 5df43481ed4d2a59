use serde::{Deserialize, Serialize};

use crate::domain::card::{parse_cards, Card};
use crate::domain::player::PlayerProfile;
use crate::domain::settings::GameSettings;
use crate::domain::table::NUM_SEATS;
use crate::domain::{PlayerId, SeatIndex, SessionId};
use crate::engine::{AbortReason, JoinOutcome, RandomSource, SessionManager, TurnOutcome};
use crate::infra::mapping::{map_lobby_to_dto, map_summary_to_dto, PlayerNameResolver};

use super::dto::CommandResponse;
use super::errors::ApiError;
use super::queries::build_table_view;

/// Команда верхнего уровня.
///
/// Это то, что слой сообщений (чат-бот, планировщик таймеров) отправляет движку.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    /// Открыть сбор игроков.
    OpenLobby { settings: GameSettings },

    /// Присоединиться к лобби.
    Join(JoinCommand),

    /// Таймер сбора истёк.
    ExpireLobby { session_id: SessionId },

    /// Раздать партию на четырёх известных игроков, минуя лобби.
    Deal {
        seats: [PlayerId; NUM_SEATS],
        settings: GameSettings,
    },

    /// Изменить настройки, пока партия собирается.
    UpdateSettings {
        session_id: SessionId,
        settings: GameSettings,
    },

    /// Действие за столом.
    Seat(SeatCommand),

    /// Остановить партию.
    Abandon {
        session_id: SessionId,
        reason: AbortReason,
    },
}

/// Присоединение к лобби.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JoinCommand {
    pub session_id: SessionId,
    pub player_id: PlayerId,
    pub display_name: String,
    /// Текущий баланс игрока (проверяется в денежном режиме).
    pub balance: i64,
}

/// Команда конкретного места в идущей партии.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeatCommand {
    pub session_id: SessionId,
    pub seat: SeatIndex,
    pub action: SeatAction,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum SeatAction {
    /// Выложить карты.
    Play(Vec<Card>),
    /// То же, но карты в текстовом виде: "3d 4d 5d".
    PlayText(String),
    Pass,
    /// Пас по таймеру (от планировщика).
    ForcePass,
    StageCard(Card),
    UnstageAll,
    PlayStaged,
}

/// Выполнить команду.
///
/// После партии (победа/прерывание) возвращается итог, а не стол: партии уже нет.
pub fn execute_command<R: RandomSource>(
    manager: &mut SessionManager,
    command: Command,
    rng: &mut R,
    name_resolver: &impl PlayerNameResolver,
) -> Result<CommandResponse, ApiError> {
    match command {
        Command::OpenLobby { settings } => {
            let session_id = manager.open_lobby(settings)?;
            lobby_response(manager, session_id)
        }

        Command::Join(cmd) => {
            let profile = PlayerProfile::new(cmd.player_id, cmd.display_name);
            match manager.join(cmd.session_id, profile, cmd.balance, rng)? {
                JoinOutcome::Waiting { .. } => lobby_response(manager, cmd.session_id),
                JoinOutcome::Dealt => table_response(manager, cmd.session_id, name_resolver),
            }
        }

        Command::ExpireLobby { session_id } => {
            if manager.expire_lobby(session_id) {
                Ok(CommandResponse::Aborted {
                    session_id,
                    reason: AbortReason::NotEnoughPlayers,
                })
            } else {
                Ok(CommandResponse::Ok)
            }
        }

        Command::Deal { seats, settings } => {
            let session_id = manager.deal(seats, settings, rng)?;
            table_response(manager, session_id, name_resolver)
        }

        Command::UpdateSettings {
            session_id,
            settings,
        } => {
            manager.update_settings(session_id, settings)?;
            lobby_response(manager, session_id)
        }

        Command::Seat(cmd) => {
            let SeatCommand {
                session_id,
                seat,
                action,
            } = cmd;

            let outcome = match action {
                SeatAction::Play(cards) => manager.play(session_id, seat, &cards)?,
                SeatAction::PlayText(text) => {
                    let cards = parse_cards(&text).map_err(ApiError::BadRequest)?;
                    manager.play(session_id, seat, &cards)?
                }
                SeatAction::Pass => manager.pass(session_id, seat)?,
                SeatAction::ForcePass => manager.force_pass(session_id, seat)?,
                SeatAction::StageCard(card) => {
                    manager.stage_card(session_id, seat, card)?;
                    return table_response(manager, session_id, name_resolver);
                }
                SeatAction::UnstageAll => {
                    manager.unstage_all(session_id, seat)?;
                    return table_response(manager, session_id, name_resolver);
                }
                SeatAction::PlayStaged => manager.play_staged(session_id, seat)?,
            };

            outcome_response(manager, session_id, outcome, name_resolver)
        }

        Command::Abandon { session_id, reason } => {
            let outcome = manager.abandon(session_id, reason)?;
            outcome_response(manager, session_id, outcome, name_resolver)
        }
    }
}

fn outcome_response(
    manager: &SessionManager,
    session_id: SessionId,
    outcome: TurnOutcome,
    name_resolver: &impl PlayerNameResolver,
) -> Result<CommandResponse, ApiError> {
    match outcome {
        TurnOutcome::Finished(summary) => Ok(CommandResponse::GameFinished(map_summary_to_dto(
            &summary,
            name_resolver,
        ))),
        TurnOutcome::Aborted(reason) => Ok(CommandResponse::Aborted { session_id, reason }),
        TurnOutcome::Advanced { .. }
        | TurnOutcome::TableCleared { .. }
        | TurnOutcome::AutoCleared { .. } => table_response(manager, session_id, name_resolver),
    }
}

fn table_response(
    manager: &SessionManager,
    session_id: SessionId,
    name_resolver: &impl PlayerNameResolver,
) -> Result<CommandResponse, ApiError> {
    let session = manager
        .session(session_id)
        .ok_or(ApiError::SessionNotFound(session_id))?;
    // Публичный вид: чужие карты не раскрываем.
    Ok(CommandResponse::TableState(build_table_view(
        session,
        name_resolver,
        |_| false,
    )))
}

fn lobby_response(manager: &SessionManager, session_id: SessionId) -> Result<CommandResponse, ApiError> {
    let lobby = manager
        .lobby(session_id)
        .ok_or(ApiError::SessionNotFound(session_id))?;
    Ok(CommandResponse::Lobby(map_lobby_to_dto(lobby)))
}
