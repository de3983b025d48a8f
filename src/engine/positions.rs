use log::{debug, warn};

use crate::domain::chips::Chips;
use crate::domain::player::{ActionLabel, PlayerStatus, Position};
use crate::domain::{SeatIndex, Table};
use crate::engine::errors::EngineError;

/// Канонический порядок позиций (для столов без своей таблицы).
pub const POSITIONS: [Position; 8] = [
    Position::Utg,
    Position::UtgPlus1,
    Position::Lj,
    Position::Hj,
    Position::Co,
    Position::Bu,
    Position::Sb,
    Position::Bb,
];

/// Таблица позиций по числу видимых игроков, по часовой стрелке от кнопки.
pub fn position_table(count: usize) -> Result<&'static [Position], EngineError> {
    use Position::*;
    match count {
        3 => Ok(&[Bu, Sb, Bb]),
        4 => Ok(&[Bu, Sb, Bb, Co]),
        5 => Ok(&[Bu, Sb, Bb, Utg, Co]),
        6 => Ok(&[Bu, Sb, Bb, Utg, Hj, Co]),
        7 => Ok(&[Bu, Sb, Bb, Utg, Lj, Hj, Co]),
        8 => Ok(&[Bu, Sb, Bb, Utg, UtgPlus1, Lj, Hj, Co]),
        n => Err(EngineError::UnknownPosition(format!("{n} players"))),
    }
}

/// Позиции для `count` игроков; без таблицы – канонический порядок.
pub fn positions_for(count: usize) -> Vec<Position> {
    match position_table(count) {
        Ok(table) => table.to_vec(),
        Err(e) => {
            warn!("{e}, falling back to default order");
            POSITIONS.iter().copied().take(count).collect()
        }
    }
}

/// Найти следующее видимое место по кругу (включая/исключая start).
pub fn next_visible_seat(table: &Table, start: SeatIndex, include_start: bool) -> Option<SeatIndex> {
    let max = table.max_seats();
    if max == 0 {
        return None;
    }

    let first = if include_start { 0 } else { 1 };
    (first..first + max)
        .map(|off| ((start as usize + off) % max) as SeatIndex)
        .find(|&seat| table.seats[seat as usize].visible)
}

/// Видимые места по часовой стрелке начиная с `start` (включительно).
pub fn visible_seats_from(table: &Table, start: SeatIndex) -> Vec<SeatIndex> {
    let max = table.max_seats();
    (0..max)
        .map(|off| ((start as usize + off) % max) as SeatIndex)
        .filter(|&seat| table.seats[seat as usize].visible)
        .collect()
}

/// Кнопка на видимом месте: если место кнопки скрыто, берём
/// ближайшее видимое по часовой стрелке.
pub fn normalize_button(table: &mut Table) {
    if let Some(seat) = next_visible_seat(table, table.dealer_button, true) {
        table.dealer_button = seat;
    }
}

/// Перевести кнопку на следующее видимое место.
pub fn rotate_button(table: &mut Table) {
    if let Some(seat) = next_visible_seat(table, table.dealer_button, false) {
        table.dealer_button = seat;
    }
}

/// Раздать позиции видимым игрокам и поставить блайнды.
///
/// Несобранные ставки улицы сначала возвращаются владельцам,
/// поэтому повторный вызов не списывает блайнды дважды.
pub fn assign_positions(table: &mut Table) {
    for p in table.seats.iter_mut() {
        p.stack += p.current_bet;
        p.current_bet = Chips::ZERO;
        p.forced_blind_bet = Chips::ZERO;
        if p.status == PlayerStatus::AllIn && !p.stack.is_zero() {
            p.status = PlayerStatus::Active;
        }
        if p.status != PlayerStatus::Folded {
            p.action = ActionLabel::None;
        }
        p.position = None;
    }

    normalize_button(table);
    let order = visible_seats_from(table, table.dealer_button);
    let positions = positions_for(order.len());
    let stakes = table.stakes;

    for (&seat, &position) in order.iter().zip(positions.iter()) {
        let p = &mut table.seats[seat as usize];
        p.position = Some(position);

        if p.status == PlayerStatus::Folded || p.stack.is_zero() {
            continue;
        }
        let blind = match position {
            Position::Sb => stakes.small_blind,
            Position::Bb => stakes.big_blind,
            _ => continue,
        };

        let paid = p.commit(blind);
        p.forced_blind_bet = paid;
        p.action = if position == Position::Sb {
            ActionLabel::SmallBlind(paid)
        } else {
            ActionLabel::BigBlind(paid)
        };
        debug!("seat {seat} posts {position} {paid}");
    }
}

/// Первый ходящий на префлопе: третье видимое место после кнопки,
/// дальше по кругу первый, кто может ходить.
pub fn preflop_first_actor(table: &Table) -> Option<SeatIndex> {
    let order = visible_seats_from(table, table.dealer_button);
    if order.is_empty() {
        return None;
    }
    let start = 3 % order.len();
    (0..order.len())
        .map(|off| order[(start + off) % order.len()])
        .find(|&seat| table.seats[seat as usize].can_act())
}

/// Первый ходящий после флопа: первое место после кнопки, кто может ходить.
pub fn postflop_first_actor(table: &Table) -> Option<SeatIndex> {
    next_actor_after(table, table.dealer_button)
}

/// Следующий, кто может ходить, после `seat` (по кругу, сам `seat` – последним).
pub fn next_actor_after(table: &Table, seat: SeatIndex) -> Option<SeatIndex> {
    let max = table.max_seats();
    (1..=max)
        .map(|off| ((seat as usize + off) % max) as SeatIndex)
        .find(|&s| table.seats[s as usize].can_act())
}
