use crate::domain::card::Card;
use crate::domain::hand::{Hand, HandBuildError};
use crate::domain::player::PlayerAtSeat;
use crate::domain::table::{SeatIndex, TableState};
use crate::engine::errors::{PassError, PlayError};
use crate::eval::{classify, is_greater};

/// Проверка хода картами при текущем состоянии стола.
///
/// Порядок проверок важен: игрок получает самую конкретную причину отказа.
/// При успехе возвращает готовую `Hand`.
pub fn validate_play(
    table: &TableState,
    player: &PlayerAtSeat,
    cards: &[Card],
) -> Result<Hand, PlayError> {
    if table.turn_seat != player.seat {
        return Err(PlayError::WrongTurn {
            expected: table.turn_seat,
            actual: player.seat,
        });
    }

    let hand = Hand::new(cards.to_vec()).map_err(|e| match e {
        HandBuildError::Empty => PlayError::EmptyPlay,
        HandBuildError::Duplicate(card) => PlayError::DuplicateCard(card),
    })?;

    if let Some(card) = hand.cards().iter().find(|c| !player.holds(**c)) {
        return Err(PlayError::CardNotHeld(*card));
    }

    if classify(hand.cards()).is_none() {
        return Err(PlayError::InvalidCombination);
    }

    if table.is_first_round() && !hand.contains(Card::THREE_OF_DIAMONDS) {
        return Err(PlayError::OpeningMustContainLowestCard);
    }

    if let Some(active) = &table.active {
        if active.len() != hand.len() {
            return Err(PlayError::WrongSize {
                expected: active.len(),
                actual: hand.len(),
            });
        }
        if !is_greater(active.cards(), hand.cards()) {
            return Err(PlayError::NotBigEnough);
        }
    }

    Ok(hand)
}

/// Проверка добровольного паса.
///
/// Принудительный пас по таймеру эту проверку не проходит:
/// его принимает только `GameSession::force_pass`.
pub fn validate_pass(table: &TableState, seat: SeatIndex) -> Result<(), PassError> {
    if table.turn_seat != seat {
        return Err(PassError::WrongTurn {
            expected: table.turn_seat,
            actual: seat,
        });
    }
    if table.control_seat == seat || table.active.is_none() {
        return Err(PassError::ControlPlayerCannotPass);
    }
    Ok(())
}
