use crate::domain::{Card, PlayerAtSeat, SeatIndex, NUM_SEATS};

/// Следующее место по кругу.
pub fn next_seat(seat: SeatIndex) -> SeatIndex {
    ((seat as usize + 1) % NUM_SEATS) as SeatIndex
}

/// Место, у которого на руках (или среди выбранных) лежит `card`.
pub fn seat_holding(players: &[PlayerAtSeat], card: Card) -> Option<SeatIndex> {
    players.iter().find(|p| p.holds(card)).map(|p| p.seat)
}

/// Корректный ли индекс места.
pub fn is_valid_seat(seat: SeatIndex) -> bool {
    (seat as usize) < NUM_SEATS
}
