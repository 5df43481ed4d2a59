use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::{PlayerId, SeatIndex, SessionId};
use crate::engine::{GameSession, SessionManager};
use crate::eval::{classify, legal_plays};
use crate::infra::mapping::{map_lobby_to_dto, PlayerNameResolver};

use super::dto::{LobbyViewDto, PlayerAtSeatDto, TableViewDto};
use super::errors::ApiError;

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Состояние стола. `hero` видит свои карты.
    GetTable {
        session_id: SessionId,
        hero: Option<PlayerId>,
    },

    /// Состояние лобби.
    GetLobby { session_id: SessionId },

    /// Допустимые ходы места, чей сейчас ход (подсказка / бот).
    LegalPlays {
        session_id: SessionId,
        seat: SeatIndex,
    },
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Table(TableViewDto),
    Lobby(LobbyViewDto),
    LegalPlays(Vec<Vec<Card>>),
}

/// Выполнить запрос.
pub fn execute_query(
    manager: &SessionManager,
    query: Query,
    name_resolver: &impl PlayerNameResolver,
) -> Result<QueryResponse, ApiError> {
    match query {
        Query::GetTable { session_id, hero } => {
            let session = manager
                .session(session_id)
                .ok_or(ApiError::SessionNotFound(session_id))?;
            Ok(QueryResponse::Table(build_table_view(
                session,
                name_resolver,
                |pid| Some(pid) == hero,
            )))
        }

        Query::GetLobby { session_id } => {
            let lobby = manager
                .lobby(session_id)
                .ok_or(ApiError::SessionNotFound(session_id))?;
            Ok(QueryResponse::Lobby(map_lobby_to_dto(lobby)))
        }

        Query::LegalPlays { session_id, seat } => {
            let session = manager
                .session(session_id)
                .ok_or(ApiError::SessionNotFound(session_id))?;
            let player = session
                .player(seat)
                .ok_or_else(|| ApiError::BadRequest(format!("нет места {seat}")))?;
            if session.table.turn_seat != seat {
                return Ok(QueryResponse::LegalPlays(Vec::new()));
            }
            let must_include = session
                .table
                .is_first_round()
                .then_some(Card::THREE_OF_DIAMONDS);
            Ok(QueryResponse::LegalPlays(legal_plays(
                &player.all_cards(),
                session.table.active.as_ref(),
                must_include,
            )))
        }
    }
}

/// Сформировать DTO стола. Карты на руках раскрываются только для `is_hero`.
pub fn build_table_view(
    session: &GameSession,
    name_resolver: &impl PlayerNameResolver,
    is_hero: impl Fn(PlayerId) -> bool,
) -> TableViewDto {
    let players = session
        .players
        .iter()
        .map(|p| {
            let show = is_hero(p.player_id);
            PlayerAtSeatDto {
                player_id: p.player_id,
                display_name: name_resolver.resolve_name(p.player_id),
                seat_index: p.seat,
                cards_remaining: p.cards_remaining() as u8,
                cards: show.then(|| p.cards.clone()),
                staged: show.then(|| p.staged.clone()),
            }
        })
        .collect();

    let table = &session.table;

    TableViewDto {
        session_id: session.session_id,
        mode: session.settings.mode,
        phase: table.phase,
        round_number: table.round_number,
        turn_seat: table.turn_seat,
        control_seat: table.control_seat,
        active_cards: table
            .active
            .as_ref()
            .map(|h| h.cards().to_vec())
            .unwrap_or_default(),
        active_category: table.active.as_ref().and_then(|h| classify(h.cards())),
        players,
        pass_timer_secs: session.settings.pass_timer_secs,
    }
}
