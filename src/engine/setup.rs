//! Настройка стола: блайнды, стеки, имена, кнопка, размер стола, карты.

use log::info;

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::{ActionLabel, Equity, Player, PlayerStatus};
use crate::domain::table::{SeatIndex, Table, TableStakes};
use crate::engine::errors::EngineError;
use crate::engine::game_loop::{recompute_equities, HandEngine};
use crate::engine::positions::{
    assign_positions, normalize_button, postflop_first_actor, preflop_first_actor,
};
use crate::engine::validation::{validate_new_cards, validate_player_count};
use crate::engine::RandomSource;

fn first_actor(table: &Table) -> Option<SeatIndex> {
    match table.street {
        Street::Preflop => preflop_first_actor(table),
        Street::Showdown => None,
        _ => postflop_first_actor(table),
    }
}

/// Позиции заново, и ход – первому на текущей улице.
fn reseat(table: &mut Table, engine: &mut HandEngine) {
    assign_positions(table);
    engine.current_actor = first_actor(table);
}

fn seat_mut(table: &mut Table, seat: SeatIndex) -> Result<&mut Player, EngineError> {
    table.player_mut(seat).ok_or(EngineError::InvalidSeat(seat))
}

/// Игрок, пропускавший раздачу без фишек, возвращается в игру,
/// когда ему дают стек. Олл-ин с новым стеком снова активен.
fn reactivate_if_sitting_out(engine: &HandEngine, table: &mut Table, seat: SeatIndex, was_empty: bool) {
    let contributed = engine.pot.contribution(seat);
    let p = &mut table.seats[seat as usize];
    if p.status == PlayerStatus::AllIn && !p.stack.is_zero() {
        p.status = PlayerStatus::Active;
        return;
    }
    if was_empty
        && p.status == PlayerStatus::Folded
        && !p.stack.is_zero()
        && p.current_bet.is_zero()
        && contributed.is_zero()
    {
        p.status = PlayerStatus::Active;
        p.action = ActionLabel::None;
        p.equity = Equity::Pending;
    }
}

pub fn set_blinds(
    table: &mut Table,
    engine: &mut HandEngine,
    small_blind: Chips,
    big_blind: Chips,
) -> Result<(), EngineError> {
    if small_blind > big_blind {
        return Err(EngineError::InvalidBlinds);
    }
    table.stakes = TableStakes::new(small_blind, big_blind);
    reseat(table, engine);
    info!("blinds set to {small_blind}/{big_blind}");
    Ok(())
}

pub fn set_stack(
    table: &mut Table,
    engine: &mut HandEngine,
    seat: SeatIndex,
    amount: Chips,
) -> Result<(), EngineError> {
    let player = seat_mut(table, seat)?;
    let was_empty = player.stack.is_zero();
    player.stack = amount;
    if player.status == PlayerStatus::Active && amount.is_zero() && !player.current_bet.is_zero() {
        player.status = PlayerStatus::AllIn;
    }
    reactivate_if_sitting_out(engine, table, seat, was_empty);
    resume_if_idle(table, engine);
    Ok(())
}

/// Одинаковый стек всем; у поставивших блайнд он уже вычтен.
pub fn set_all_stacks(table: &mut Table, engine: &mut HandEngine, amount: Chips) {
    for seat in 0..table.seats.len() {
        let p = &mut table.seats[seat];
        let was_empty = p.stack.is_zero();
        p.stack = amount - p.forced_blind_bet;
        reactivate_if_sitting_out(engine, table, seat as SeatIndex, was_empty);
    }
    resume_if_idle(table, engine);
    info!("all stacks set to {amount}");
}

/// Если ход никому не назначен, назначить первому на улице.
fn resume_if_idle(table: &Table, engine: &mut HandEngine) {
    if engine.current_actor.is_none() {
        engine.current_actor = first_actor(table);
    }
}

pub fn set_name(table: &mut Table, seat: SeatIndex, name: String) -> Result<(), EngineError> {
    seat_mut(table, seat)?.name = name;
    Ok(())
}

pub fn set_button(table: &mut Table, engine: &mut HandEngine, seat: SeatIndex) -> Result<(), EngineError> {
    let player = table.player(seat).ok_or(EngineError::InvalidSeat(seat))?;
    if !player.visible {
        return Err(EngineError::SeatNotInHand(seat));
    }
    table.dealer_button = seat;
    reseat(table, engine);
    info!("button moved to seat {seat}");
    Ok(())
}

/// Видимы места `0..count`.
pub fn set_player_count(table: &mut Table, engine: &mut HandEngine, count: usize) -> Result<(), EngineError> {
    validate_player_count(count)?;
    for (i, p) in table.seats.iter_mut().enumerate() {
        p.visible = i < count;
    }
    normalize_button(table);
    reseat(table, engine);
    info!("table size set to {count}");
    Ok(())
}

/// Карманные карты: ровно 2 или пусто (сброс).
pub fn set_hole_cards<R: RandomSource>(
    table: &mut Table,
    engine: &mut HandEngine,
    seat: SeatIndex,
    cards: Vec<Card>,
    rng: &mut R,
) -> Result<(), EngineError> {
    if table.player(seat).is_none() {
        return Err(EngineError::InvalidSeat(seat));
    }
    if !cards.is_empty() && cards.len() != 2 {
        return Err(EngineError::InvalidCardCount {
            expected: 2,
            actual: cards.len(),
        });
    }

    let mut known = table.board.clone();
    for (i, p) in table.seats.iter().enumerate() {
        if i != seat as usize && p.visible {
            known.extend_from_slice(&p.hole_cards);
        }
    }
    validate_new_cards(&known, &cards)?;

    table.seats[seat as usize].hole_cards = cards;
    recompute_equities(table, &engine.settings, rng);
    Ok(())
}

/// Борд целиком: 0, 3, 4 или 5 карт. Улица следует за числом карт.
pub fn set_board<R: RandomSource>(
    table: &mut Table,
    engine: &mut HandEngine,
    cards: Vec<Card>,
    rng: &mut R,
) -> Result<(), EngineError> {
    let street = Street::from_board_len(cards.len()).ok_or(EngineError::InvalidCardCount {
        expected: 5,
        actual: cards.len(),
    })?;

    let known: Vec<Card> = table
        .seats
        .iter()
        .filter(|p| p.visible)
        .flat_map(|p| p.hole_cards.iter().copied())
        .collect();
    validate_new_cards(&known, &cards)?;

    table.board = cards;
    if table.street != Street::Showdown || street != Street::River {
        table.street = street;
    }
    recompute_equities(table, &engine.settings, rng);
    Ok(())
}
