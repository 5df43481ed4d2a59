use std::collections::HashMap;

use tracing::{info, warn};

use crate::domain::card::Card;
use crate::domain::player::PlayerProfile;
use crate::domain::settings::GameSettings;
use crate::domain::table::NUM_SEATS;
use crate::domain::{PlayerId, SeatIndex, SessionId};
use crate::engine::errors::{EngineError, LobbyError, PassError, PlayError};
use crate::engine::game_loop::{start_game, GameSession, TurnOutcome};
use crate::engine::hand_history::{AbortReason, GameEvent, GameEventKind, GameHistory};
use crate::engine::lobby::{JoinOutcome, Lobby};
use crate::engine::RandomSource;
use crate::infra::ids::IdGenerator;
use crate::state::SessionSnapshot;

/// Менеджер партий:
/// - хранит лобби и идущие партии по SessionId;
/// - следит, чтобы игрок не сидел в двух партиях сразу;
/// - собирает исходящие события всех партий в одну очередь.
///
/// Партии независимы: одна партия = один `GameSession`, общего изменяемого состояния нет.
/// Завершённая или прерванная партия сразу удаляется.
#[derive(Debug)]
pub struct SessionManager {
    ids: IdGenerator,
    lobbies: HashMap<SessionId, Lobby>,
    sessions: HashMap<SessionId, GameSession>,
    /// Игрок → партия (или лобби), где он сейчас сидит.
    seated: HashMap<PlayerId, SessionId>,
    outbox: Vec<GameEvent>,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            ids: IdGenerator::new(),
            lobbies: HashMap::new(),
            sessions: HashMap::new(),
            seated: HashMap::new(),
            outbox: Vec::new(),
        }
    }

    pub fn session(&self, session_id: SessionId) -> Option<&GameSession> {
        self.sessions.get(&session_id)
    }

    pub fn lobby(&self, session_id: SessionId) -> Option<&Lobby> {
        self.lobbies.get(&session_id)
    }

    /// В какой партии (или лобби) сейчас игрок.
    pub fn session_of_player(&self, player_id: PlayerId) -> Option<SessionId> {
        self.seated.get(&player_id).copied()
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Открыть сбор игроков.
    pub fn open_lobby(&mut self, settings: GameSettings) -> Result<SessionId, EngineError> {
        settings.validate()?;
        let session_id = self.ids.next_session_id();
        self.lobbies.insert(session_id, Lobby::new(session_id, settings));
        info!(session_id, "лобби открыто");
        Ok(session_id)
    }

    /// Присоединиться к лобби. Четвёртый игрок запускает раздачу со случайной рассадкой.
    pub fn join<R: RandomSource>(
        &mut self,
        session_id: SessionId,
        profile: PlayerProfile,
        balance: i64,
        rng: &mut R,
    ) -> Result<JoinOutcome, EngineError> {
        if let Some(&other) = self.seated.get(&profile.id) {
            if other != session_id {
                return Err(LobbyError::PlayerInAnotherSession {
                    player_id: profile.id,
                    session_id: other,
                }
                .into());
            }
        }

        let lobby = self
            .lobbies
            .get_mut(&session_id)
            .ok_or(LobbyError::LobbyNotFound(session_id))?;

        let player_id = profile.id;
        let joined = lobby.join(profile, balance)?;
        self.seated.insert(player_id, session_id);

        let Some(seats) = lobby.seating(rng) else {
            return Ok(JoinOutcome::Waiting { joined });
        };

        let settings = lobby.settings.clone();
        self.lobbies.remove(&session_id);

        let session = match start_game(session_id, seats, settings, rng) {
            Ok(session) => session,
            Err(e) => {
                self.release_players(&seats);
                return Err(e);
            }
        };
        self.insert_session(session);

        Ok(JoinOutcome::Dealt)
    }

    /// Таймер сбора истёк. Недобранное лобби закрывается.
    ///
    /// `false`, если лобби уже нет (партия успела начаться или закрыта раньше).
    pub fn expire_lobby(&mut self, session_id: SessionId) -> bool {
        let Some(lobby) = self.lobbies.remove(&session_id) else {
            return false;
        };

        let ids: Vec<PlayerId> = lobby.joined.iter().map(|p| p.id).collect();
        self.release_players(&ids);

        let mut history = GameHistory::new(session_id);
        history.push(GameEventKind::SessionAborted {
            reason: AbortReason::NotEnoughPlayers,
        });
        self.outbox.extend(history.take_unpublished());

        warn!(session_id, joined = ids.len(), "не набралось игроков, лобби закрыто");
        true
    }

    /// Раздать партию сразу на четырёх известных игроков (без лобби).
    pub fn deal<R: RandomSource>(
        &mut self,
        seats: [PlayerId; NUM_SEATS],
        settings: GameSettings,
        rng: &mut R,
    ) -> Result<SessionId, EngineError> {
        for id in &seats {
            if let Some(&other) = self.seated.get(id) {
                return Err(LobbyError::PlayerInAnotherSession {
                    player_id: *id,
                    session_id: other,
                }
                .into());
            }
        }

        let session_id = self.ids.next_session_id();
        let session = start_game(session_id, seats, settings, rng)?;
        for id in &seats {
            self.seated.insert(*id, session_id);
        }
        self.insert_session(session);
        Ok(session_id)
    }

    /// Поменять настройки. Можно только пока партия ещё собирается.
    pub fn update_settings(
        &mut self,
        session_id: SessionId,
        settings: GameSettings,
    ) -> Result<(), EngineError> {
        if self.sessions.contains_key(&session_id) {
            return Err(EngineError::SessionInProgress(session_id));
        }
        let lobby = self
            .lobbies
            .get_mut(&session_id)
            .ok_or(EngineError::SessionNotFound(session_id))?;
        settings.validate()?;
        lobby.settings = settings;
        Ok(())
    }

    pub fn play(
        &mut self,
        session_id: SessionId,
        seat: SeatIndex,
        cards: &[Card],
    ) -> Result<TurnOutcome, PlayError> {
        let session = self
            .sessions
            .get_mut(&session_id)
            .ok_or(PlayError::SessionNotFound(session_id))?;
        let outcome = session.apply_play(seat, cards)?;
        self.after_turn(session_id);
        Ok(outcome)
    }

    pub fn pass(&mut self, session_id: SessionId, seat: SeatIndex) -> Result<TurnOutcome, PassError> {
        let session = self
            .sessions
            .get_mut(&session_id)
            .ok_or(PassError::SessionNotFound(session_id))?;
        let outcome = session.apply_pass(seat)?;
        self.after_turn(session_id);
        Ok(outcome)
    }

    /// Таймер хода истёк.
    pub fn force_pass(
        &mut self,
        session_id: SessionId,
        seat: SeatIndex,
    ) -> Result<TurnOutcome, PassError> {
        let session = self
            .sessions
            .get_mut(&session_id)
            .ok_or(PassError::SessionNotFound(session_id))?;
        let outcome = session.force_pass(seat)?;
        self.after_turn(session_id);
        Ok(outcome)
    }

    /// Прервать партию снаружи (админ остановил игру и т.п.).
    pub fn abandon(
        &mut self,
        session_id: SessionId,
        reason: AbortReason,
    ) -> Result<TurnOutcome, EngineError> {
        let session = self
            .sessions
            .get_mut(&session_id)
            .ok_or(EngineError::SessionNotFound(session_id))?;
        let outcome = session.abandon(reason)?;
        self.after_turn(session_id);
        Ok(outcome)
    }

    pub fn stage_card(
        &mut self,
        session_id: SessionId,
        seat: SeatIndex,
        card: Card,
    ) -> Result<(), PlayError> {
        self.sessions
            .get_mut(&session_id)
            .ok_or(PlayError::SessionNotFound(session_id))?
            .stage_card(seat, card)
    }

    pub fn unstage_all(&mut self, session_id: SessionId, seat: SeatIndex) -> Result<(), PlayError> {
        self.sessions
            .get_mut(&session_id)
            .ok_or(PlayError::SessionNotFound(session_id))?
            .unstage_all(seat)
    }

    pub fn play_staged(
        &mut self,
        session_id: SessionId,
        seat: SeatIndex,
    ) -> Result<TurnOutcome, PlayError> {
        let session = self
            .sessions
            .get_mut(&session_id)
            .ok_or(PlayError::SessionNotFound(session_id))?;
        let outcome = session.play_staged(seat)?;
        self.after_turn(session_id);
        Ok(outcome)
    }

    /// Забрать накопленные исходящие события всех партий.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }

    /// Снимок идущей партии для внешнего хранилища.
    pub fn snapshot(&self, session_id: SessionId) -> Option<SessionSnapshot> {
        self.sessions.get(&session_id).map(SessionSnapshot::from_session)
    }

    /// Поднять партию из снимка (например, после рестарта процесса).
    pub fn restore(&mut self, snapshot: SessionSnapshot) -> Result<SessionId, EngineError> {
        let session = snapshot.into_session()?;
        let session_id = session.session_id;
        if self.sessions.contains_key(&session_id) || self.lobbies.contains_key(&session_id) {
            return Err(EngineError::SessionInProgress(session_id));
        }
        if session.is_terminal() {
            return Err(EngineError::SessionAlreadyTerminal);
        }
        for p in &session.players {
            if let Some(&other) = self.seated.get(&p.player_id) {
                return Err(LobbyError::PlayerInAnotherSession {
                    player_id: p.player_id,
                    session_id: other,
                }
                .into());
            }
        }
        self.ids.observe_session_id(session_id);
        for p in &session.players {
            self.seated.insert(p.player_id, session_id);
        }
        self.sessions.insert(session_id, session);
        Ok(session_id)
    }

    fn insert_session(&mut self, mut session: GameSession) {
        self.outbox.extend(session.history.take_unpublished());
        self.sessions.insert(session.session_id, session);
    }

    /// После любого принятого действия: выгрузить события, убрать завершённую партию.
    fn after_turn(&mut self, session_id: SessionId) {
        let Some(session) = self.sessions.get_mut(&session_id) else {
            return;
        };
        self.outbox.extend(session.history.take_unpublished());

        if session.is_terminal() {
            let ids: Vec<PlayerId> = session.players.iter().map(|p| p.player_id).collect();
            self.sessions.remove(&session_id);
            self.release_players(&ids);
        }
    }

    fn release_players(&mut self, ids: &[PlayerId]) {
        for id in ids {
            self.seated.remove(id);
        }
    }
}
