use tracing::{debug, info, warn};

use crate::domain::card::Card;
use crate::domain::deck::Deck;
use crate::domain::hand::{GameSummary, SeatResult};
use crate::domain::player::PlayerAtSeat;
use crate::domain::settings::GameSettings;
use crate::domain::table::{SeatIndex, TablePhase, TableSnapshot, TableState, HAND_SIZE, NUM_SEATS};
use crate::domain::{PlayerId, SessionId};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::errors::{EngineError, PassError, PlayError};
use crate::engine::hand_history::{AbortReason, GameEventKind, GameHistory};
use crate::engine::positions::{is_valid_seat, next_seat, seat_holding};
use crate::engine::settlement::settle;
use crate::engine::validation::{validate_pass, validate_play};
use crate::engine::RandomSource;
use crate::eval::classify;

/// Результат принятого хода для внешнего кода.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Ход перешёл к `next_seat`, на столе лежит комбинация.
    Advanced { next_seat: SeatIndex },
    /// Все спасовали, стол пуст, `leader` ходит чем угодно.
    TableCleared { leader: SeatIndex },
    /// Сыграна одиночная 2♠: остальные пасуют автоматически, `seat` ходит снова.
    AutoCleared { seat: SeatIndex },
    /// Кто-то сбросил все карты.
    Finished(GameSummary),
    /// Партия прервана.
    Aborted(AbortReason),
}

impl TurnOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TurnOutcome::Finished(_) | TurnOutcome::Aborted(_))
    }
}

/// Одна партия: четыре руки + состояние стола + история.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub session_id: SessionId,
    pub settings: GameSettings,
    /// Индекс в векторе = номер места.
    pub players: Vec<PlayerAtSeat>,
    pub table: TableState,
    /// Сколько карт получило каждое место при раздаче.
    pub dealt: [u8; NUM_SEATS],
    pub history: GameHistory,
}

/// Старт партии: перемешать колоду, раздать по 13 карт, найти владельца 3♦.
///
/// `seats[i]`: игрок на месте `i`. Рассадку (если нужна случайная) делает вызывающий.
pub fn start_game<R: RandomSource>(
    session_id: SessionId,
    seats: [PlayerId; NUM_SEATS],
    settings: GameSettings,
    rng: &mut R,
) -> Result<GameSession, EngineError> {
    let mut deck = Deck::standard_52();
    rng.shuffle(&mut deck.cards);

    let hands = deck
        .deal_hands()
        .ok_or(EngineError::InvalidDeal("колода должна содержать 52 карты"))?;

    GameSession::start_with_hands(session_id, seats, hands, settings)
}

impl GameSession {
    /// Старт партии с заранее известными руками.
    ///
    /// Руки могут быть короче 13 карт (удобно для сценариев), но карты
    /// не должны повторяться, и у кого-то обязана быть 3♦.
    pub fn start_with_hands(
        session_id: SessionId,
        seats: [PlayerId; NUM_SEATS],
        hands: [Vec<Card>; NUM_SEATS],
        settings: GameSettings,
    ) -> Result<Self, EngineError> {
        settings.validate()?;

        for (i, id) in seats.iter().enumerate() {
            if seats[..i].contains(id) {
                return Err(EngineError::DuplicatePlayer(*id));
            }
        }

        let mut all: Vec<Card> = hands.iter().flatten().copied().collect();
        if hands.iter().any(|h| h.is_empty() || h.len() > HAND_SIZE) {
            return Err(EngineError::InvalidDeal("на руке должно быть от 1 до 13 карт"));
        }
        all.sort();
        if all.windows(2).any(|w| w[0] == w[1]) {
            return Err(EngineError::InvalidDeal("карта роздана дважды"));
        }

        let mut history = GameHistory::new(session_id);
        let mut players = Vec::with_capacity(NUM_SEATS);
        let mut dealt = [0u8; NUM_SEATS];

        for (seat, (player_id, cards)) in seats.iter().zip(hands).enumerate() {
            let seat = seat as SeatIndex;
            let mut player = PlayerAtSeat::new(*player_id, seat);
            dealt[seat as usize] = cards.len() as u8;
            player.receive(cards);
            history.push(GameEventKind::CardsDealt {
                seat,
                cards: player.cards.clone(),
            });
            players.push(player);
        }

        let first_seat = seat_holding(&players, Card::THREE_OF_DIAMONDS)
            .ok_or(EngineError::InvalidDeal("ни у кого нет 3♦"))?;

        history.push(GameEventKind::GameStarted { seats, first_seat });

        let table = TableState::opening(first_seat);
        history.push(GameEventKind::TurnAdvanced {
            next_seat: first_seat,
            table_snapshot: table.snapshot(cards_remaining(&players)),
        });

        info!(session_id, first_seat, "партия роздана");

        Ok(Self {
            session_id,
            settings,
            players,
            table,
            dealt,
            history,
        })
    }

    pub fn player(&self, seat: SeatIndex) -> Option<&PlayerAtSeat> {
        self.players.get(seat as usize)
    }

    pub fn seat_of(&self, player_id: PlayerId) -> Option<SeatIndex> {
        self.players
            .iter()
            .find(|p| p.player_id == player_id)
            .map(|p| p.seat)
    }

    pub fn is_terminal(&self) -> bool {
        self.table.is_terminal()
    }

    /// Публичный снимок стола.
    pub fn snapshot(&self) -> TableSnapshot {
        self.table.snapshot(cards_remaining(&self.players))
    }

    /// Сколько карт всего ушло на стол.
    pub fn cards_played_by_table(&self) -> usize {
        let dealt: usize = self.dealt.iter().map(|&d| d as usize).sum();
        let left: usize = self.players.iter().map(|p| p.cards_remaining()).sum();
        dealt - left
    }

    /// Применить действие игрока (ход картами или пас).
    ///
    /// Действовать может только тот, кто сидит на `action.seat`.
    pub fn apply_action(&mut self, action: PlayerAction) -> Result<TurnOutcome, EngineError> {
        if let Some(player) = self.player(action.seat) {
            if player.player_id != action.player_id {
                warn!(
                    session_id = self.session_id,
                    seat = action.seat,
                    player_id = action.player_id,
                    "действие от чужого игрока"
                );
                return Err(EngineError::PlayerNotAtSeat {
                    player_id: action.player_id,
                    seat: action.seat,
                });
            }
        }
        match action.kind {
            PlayerActionKind::Play(cards) => Ok(self.apply_play(action.seat, &cards)?),
            PlayerActionKind::Pass => Ok(self.apply_pass(action.seat)?),
        }
    }

    /// Ход картами.
    pub fn apply_play(&mut self, seat: SeatIndex, cards: &[Card]) -> Result<TurnOutcome, PlayError> {
        if self.is_terminal() {
            return Err(PlayError::SessionAlreadyTerminal);
        }
        if !is_valid_seat(seat) {
            return Err(PlayError::InvalidSeat(seat));
        }

        let hand = match validate_play(&self.table, &self.players[seat as usize], cards) {
            Ok(hand) => hand,
            Err(e) => {
                self.players[seat as usize].unstage_all();
                warn!(session_id = self.session_id, seat, error = %e, "ход отклонён");
                return Err(e);
            }
        };

        // validate_play уже проверил, что комбинация допустима.
        let category = classify(hand.cards()).ok_or(PlayError::InvalidCombination)?;

        let player = &mut self.players[seat as usize];
        player.remove_played(hand.cards());
        let player_id = player.player_id;
        let emptied = player.has_no_cards();

        debug!(session_id = self.session_id, seat, ?category, cards = hand.len(), "ход принят");

        self.history.push(GameEventKind::Played {
            seat,
            player_id,
            cards: hand.cards().to_vec(),
            category,
        });

        let is_lone_top_card = hand.len() == 1 && hand.highest() == Card::TWO_OF_SPADES;

        self.table.round_number += 1;
        self.table.control_seat = seat;
        self.table.consecutive_passes = 0;
        self.table.idle_passes = 0;

        if emptied {
            let final_cards = hand.cards().to_vec();
            self.table.active = Some(hand);
            return Ok(TurnOutcome::Finished(self.finish(seat, final_cards)));
        }

        if is_lone_top_card {
            // 2♠ никто не побьёт: остальные пасуют без событий, стол чистый.
            self.table.active = None;
            self.table.turn_seat = seat;
            self.table.phase = TablePhase::AwaitingOpeningPlay;
            self.history.push(GameEventKind::RoundCleared { leader: seat });
            self.push_turn_advanced();
            debug!(session_id = self.session_id, seat, "2♠ очищает стол");
            return Ok(TurnOutcome::AutoCleared { seat });
        }

        self.table.active = Some(hand);
        self.table.phase = TablePhase::AwaitingResponse;
        self.table.turn_seat = next_seat(seat);
        self.push_turn_advanced();

        Ok(TurnOutcome::Advanced {
            next_seat: self.table.turn_seat,
        })
    }

    /// Добровольный пас.
    pub fn apply_pass(&mut self, seat: SeatIndex) -> Result<TurnOutcome, PassError> {
        self.ensure_can_pass(seat)?;
        if let Err(e) = validate_pass(&self.table, seat) {
            warn!(session_id = self.session_id, seat, error = %e, "пас отклонён");
            return Err(e);
        }
        self.table.idle_passes = 0;
        Ok(self.record_pass(seat, false))
    }

    /// Принудительный пас (таймер хода истёк).
    ///
    /// Разрешён и игроку под контролем: тогда ведение переходит к следующему месту.
    /// Если таких пасов подряд больше `idle_pass_limit`, партия прерывается.
    pub fn force_pass(&mut self, seat: SeatIndex) -> Result<TurnOutcome, PassError> {
        self.ensure_can_pass(seat)?;
        if self.table.turn_seat != seat {
            return Err(PassError::WrongTurn {
                expected: self.table.turn_seat,
                actual: seat,
            });
        }

        if self.table.idle_passes >= self.settings.idle_pass_limit {
            warn!(
                session_id = self.session_id,
                idle_passes = self.table.idle_passes,
                "партия брошена, прерываем"
            );
            return Ok(self.abort(AbortReason::Idle));
        }
        self.table.idle_passes += 1;

        Ok(self.record_pass(seat, true))
    }

    /// Прервать партию снаружи.
    pub fn abandon(&mut self, reason: AbortReason) -> Result<TurnOutcome, EngineError> {
        if self.is_terminal() {
            return Err(EngineError::SessionAlreadyTerminal);
        }
        Ok(self.abort(reason))
    }

    /// Выбрать карту для будущего хода.
    pub fn stage_card(&mut self, seat: SeatIndex, card: Card) -> Result<(), PlayError> {
        if self.is_terminal() {
            return Err(PlayError::SessionAlreadyTerminal);
        }
        if !is_valid_seat(seat) {
            return Err(PlayError::InvalidSeat(seat));
        }
        if self.table.turn_seat != seat {
            return Err(PlayError::WrongTurn {
                expected: self.table.turn_seat,
                actual: seat,
            });
        }
        if !self.players[seat as usize].stage(card) {
            return Err(PlayError::CardNotHeld(card));
        }
        Ok(())
    }

    /// Вернуть все выбранные карты на руку. Состояние стола не меняется.
    pub fn unstage_all(&mut self, seat: SeatIndex) -> Result<(), PlayError> {
        if self.is_terminal() {
            return Err(PlayError::SessionAlreadyTerminal);
        }
        if !is_valid_seat(seat) {
            return Err(PlayError::InvalidSeat(seat));
        }
        self.players[seat as usize].unstage_all();
        Ok(())
    }

    /// Сыграть выбранные карты.
    pub fn play_staged(&mut self, seat: SeatIndex) -> Result<TurnOutcome, PlayError> {
        if !is_valid_seat(seat) {
            return Err(PlayError::InvalidSeat(seat));
        }
        let staged = self.players[seat as usize].staged.clone();
        self.apply_play(seat, &staged)
    }

    fn ensure_can_pass(&self, seat: SeatIndex) -> Result<(), PassError> {
        if self.is_terminal() {
            return Err(PassError::SessionAlreadyTerminal);
        }
        if !is_valid_seat(seat) {
            return Err(PassError::InvalidSeat(seat));
        }
        Ok(())
    }

    /// Общая часть любого паса (проверки уже пройдены).
    fn record_pass(&mut self, seat: SeatIndex, forced: bool) -> TurnOutcome {
        self.players[seat as usize].unstage_all();
        self.table.round_number += 1;
        self.history.push(GameEventKind::Passed { seat, forced });
        debug!(session_id = self.session_id, seat, forced, "пас");

        let next = next_seat(seat);

        if seat == self.table.control_seat {
            // Принудительный пас ведущего: ведение уходит дальше, стол пуст.
            self.table.control_seat = next;
            return self.clear_table(next);
        }

        self.table.consecutive_passes += 1;
        if next == self.table.control_seat {
            return self.clear_table(next);
        }

        self.table.turn_seat = next;
        self.push_turn_advanced();
        TurnOutcome::Advanced { next_seat: next }
    }

    fn clear_table(&mut self, leader: SeatIndex) -> TurnOutcome {
        self.table.active = None;
        self.table.consecutive_passes = 0;
        self.table.turn_seat = leader;
        self.table.phase = TablePhase::AwaitingOpeningPlay;
        self.history.push(GameEventKind::RoundCleared { leader });
        self.push_turn_advanced();
        debug!(session_id = self.session_id, leader, "стол очищен");
        TurnOutcome::TableCleared { leader }
    }

    fn push_turn_advanced(&mut self) {
        let table_snapshot = self.snapshot();
        self.history.push(GameEventKind::TurnAdvanced {
            next_seat: self.table.turn_seat,
            table_snapshot,
        });
    }

    fn abort(&mut self, reason: AbortReason) -> TurnOutcome {
        for p in self.players.iter_mut() {
            p.unstage_all();
        }
        self.table.phase = TablePhase::Aborted;
        self.history.push(GameEventKind::SessionAborted { reason });
        info!(session_id = self.session_id, ?reason, "партия прервана");
        TurnOutcome::Aborted(reason)
    }

    /// Завершение партии: итоги по местам и (в денежном режиме) расчёт.
    fn finish(&mut self, winner: SeatIndex, final_cards: Vec<Card>) -> GameSummary {
        self.table.phase = TablePhase::HandEmptied { winner };

        for p in self.players.iter_mut() {
            p.unstage_all();
        }

        self.history.push(GameEventKind::HandEmptied {
            winner_seat: winner,
            final_cards: final_cards.clone(),
        });

        let held: [Vec<Card>; NUM_SEATS] =
            std::array::from_fn(|i| self.players[i].all_cards());

        let deltas = if self.settings.is_money_mode() {
            let deltas = settle(
                &held,
                winner,
                self.settings.base_unit,
                self.cards_played_by_table(),
            );
            self.history.push(GameEventKind::StakesSettled { deltas });
            deltas
        } else {
            [0; NUM_SEATS]
        };

        let results = self
            .players
            .iter()
            .zip(held)
            .map(|(p, cards_left)| SeatResult {
                seat: p.seat,
                player_id: p.player_id,
                cards_played: self.dealt[p.seat as usize].saturating_sub(cards_left.len() as u8),
                cards_left,
                stake_delta: deltas[p.seat as usize],
                is_winner: p.seat == winner,
            })
            .collect();

        let winner_id = self.players[winner as usize].player_id;

        info!(
            session_id = self.session_id,
            winner_seat = winner,
            winner_id,
            rounds = self.table.round_number,
            "партия окончена"
        );

        GameSummary {
            session_id: self.session_id,
            winner_seat: winner,
            winner_id,
            final_cards,
            rounds_played: self.table.round_number,
            results,
        }
    }
}

fn cards_remaining(players: &[PlayerAtSeat]) -> [u8; NUM_SEATS] {
    std::array::from_fn(|i| players.get(i).map_or(0, |p| p.cards_remaining() as u8))
}

