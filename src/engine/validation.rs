use std::collections::HashSet;

use crate::domain::card::Card;
use crate::domain::hand::Street;
use crate::domain::{SeatIndex, Table, MAX_SEATS};
use crate::engine::errors::EngineError;

/// Проверка, что ходящий существует и может действовать.
///
/// Легальность действия против открытых ставок не проверяется:
/// вызывающей стороне доверяем.
pub fn validate_actor(table: &Table, actor: Option<SeatIndex>) -> Result<SeatIndex, EngineError> {
    if table.street == Street::Showdown {
        return Err(EngineError::HandAlreadyAtShowdown);
    }
    let seat = actor.ok_or(EngineError::NoEligibleActor)?;
    let player = table.player(seat).ok_or(EngineError::InvalidSeat(seat))?;
    if !player.can_act() {
        return Err(EngineError::SeatNotInHand(seat));
    }
    Ok(seat)
}

/// Нет ли повторов внутри набора карт.
pub fn ensure_unique(cards: &[Card]) -> Result<(), EngineError> {
    let mut seen = HashSet::with_capacity(cards.len());
    for card in cards {
        if !seen.insert(*card) {
            return Err(EngineError::DuplicateCard(*card));
        }
    }
    Ok(())
}

/// Новые карты не должны совпадать между собой и с уже известными.
pub fn validate_new_cards(known: &[Card], new_cards: &[Card]) -> Result<(), EngineError> {
    ensure_unique(new_cards)?;
    match new_cards.iter().find(|c| known.contains(c)) {
        Some(card) => Err(EngineError::DuplicateCard(*card)),
        None => Ok(()),
    }
}

/// Проверка размера стола.
pub fn validate_player_count(count: usize) -> Result<(), EngineError> {
    if (2..=MAX_SEATS).contains(&count) {
        Ok(())
    } else {
        Err(EngineError::InvalidPlayerCount(count))
    }
}
