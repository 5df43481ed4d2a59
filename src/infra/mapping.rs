use std::collections::HashMap;

use crate::api::dto::{GameSummaryDto, LobbyViewDto, SeatResultDto};
use crate::domain::hand::GameSummary;
use crate::domain::PlayerId;
use crate::engine::settlement::max_stake_loss;
use crate::engine::Lobby;

/// Утилита: получить отображаемое имя игрока.
///
/// Имена живут у внешнего слоя (профили мессенджера), движок знает только id.
pub trait PlayerNameResolver {
    fn resolve_name(&self, player_id: PlayerId) -> String;
}

/// Простая реализация: отображаемое имя = "Player {id}".
pub struct DefaultNameResolver;

impl PlayerNameResolver for DefaultNameResolver {
    fn resolve_name(&self, player_id: PlayerId) -> String {
        format!("Player {}", player_id)
    }
}

/// Имена из таблицы, для неизвестных – как у `DefaultNameResolver`.
impl PlayerNameResolver for HashMap<PlayerId, String> {
    fn resolve_name(&self, player_id: PlayerId) -> String {
        self.get(&player_id)
            .cloned()
            .unwrap_or_else(|| DefaultNameResolver.resolve_name(player_id))
    }
}

/// Маппинг итогов партии в DTO.
pub fn map_summary_to_dto(
    summary: &GameSummary,
    name_resolver: &impl PlayerNameResolver,
) -> GameSummaryDto {
    let results = summary
        .results
        .iter()
        .map(|r| SeatResultDto {
            player_id: r.player_id,
            display_name: name_resolver.resolve_name(r.player_id),
            seat_index: r.seat,
            cards_left: r.cards_left.clone(),
            stake_delta: r.stake_delta,
            is_winner: r.is_winner,
        })
        .collect();

    GameSummaryDto {
        session_id: summary.session_id,
        winner_seat: summary.winner_seat,
        winner_name: name_resolver.resolve_name(summary.winner_id),
        final_cards: summary.final_cards.clone(),
        rounds_played: summary.rounds_played,
        results,
    }
}

/// Маппинг лобби в DTO. Имена берём из профилей, с которыми игроки присоединились.
pub fn map_lobby_to_dto(lobby: &Lobby) -> LobbyViewDto {
    LobbyViewDto {
        session_id: lobby.session_id,
        players: lobby.joined.iter().map(|p| p.name.clone()).collect(),
        mode: lobby.settings.mode,
        join_timer_secs: lobby.settings.join_timer_secs,
        max_stake_loss: max_stake_loss(lobby.settings.base_unit),
    }
}
