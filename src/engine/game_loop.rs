use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::Street;
use crate::domain::player::{ActionLabel, Equity, PlayerStatus};
use crate::domain::table::{SeatIndex, Table};
use crate::engine::actions::PlayerActionKind;
use crate::engine::errors::EngineError;
use crate::engine::positions::{
    assign_positions, next_actor_after, postflop_first_actor, preflop_first_actor, rotate_button,
};
use crate::engine::pot::PotEngine;
use crate::engine::side_pots::PotTier;
use crate::engine::validation::{validate_actor, validate_new_cards};
use crate::engine::RandomSource;
use crate::eval::{estimate_equity, estimate_equity_parallel, evaluate, HandRank};

/// Настройки движка, не входящие в снимок состояния.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineSettings {
    /// Докладывать борд до шоудауна, когда ходить больше некому.
    pub runout_on_no_actor: bool,
    pub equity_trials: usize,
    pub parallel_equity: bool,
    pub equity_workers: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            runout_on_no_actor: true,
            equity_trials: 1000,
            parallel_equity: false,
            equity_workers: 4,
        }
    }
}

/// Состояние раздачи поверх стола: банк и указатель хода.
#[derive(Clone, Debug)]
pub struct HandEngine {
    pub pot: PotEngine,
    /// Чей сейчас ход (seat).
    pub current_actor: Option<SeatIndex>,
    pub settings: EngineSettings,
}

impl HandEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            pot: PotEngine::new(),
            current_actor: None,
            settings,
        }
    }
}

/// Что произошло после действия.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Ход перешёл к игроку.
    NextActor(SeatIndex),
    /// Ходить некому: ставки собраны, нужен переход улицы.
    StreetAdvanceRequired,
    /// Ходить некому: борд доложен, раздача на шоудауне.
    RunOut,
}

/// Выплата одного уровня банка одному игроку.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payout {
    pub tier: usize,
    pub seat: SeatIndex,
    pub amount: Chips,
}

/// Как выбрать победителей уровней банка.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum WinnerSelection {
    /// Один победитель на каждый уровень, по порядку уровней.
    Manual(Vec<SeatIndex>),
    /// Сравнить руки; равные делят уровень.
    Showdown,
}

/// Начать раздачу на текущем столе: позиции, блайнды, первый ходящий.
pub fn start_hand(table: &mut Table, engine: &mut HandEngine) {
    assign_positions(table);
    engine.current_actor = preflop_first_actor(table);
    info!(
        "hand started: button {}, first to act {:?}",
        table.dealer_button, engine.current_actor
    );
}

/// Применить действие текущего ходящего.
pub fn apply_action<R: RandomSource>(
    table: &mut Table,
    engine: &mut HandEngine,
    kind: PlayerActionKind,
    rng: &mut R,
) -> Result<TurnOutcome, EngineError> {
    let seat = validate_actor(table, engine.current_actor)?;
    let highest = table.highest_bet();
    let player = &mut table.seats[seat as usize];

    match kind {
        PlayerActionKind::Fold => {
            player.status = PlayerStatus::Folded;
            player.action = ActionLabel::Fold;
            player.equity = Equity::Folded;
        }
        PlayerActionKind::Check => {
            player.action = ActionLabel::Check;
        }
        PlayerActionKind::Call => {
            let diff = highest - player.current_bet;
            player.commit(diff);
            player.action = ActionLabel::Call(player.current_bet);
        }
        PlayerActionKind::Bet(amount) | PlayerActionKind::Raise(amount) => {
            let diff = amount - player.current_bet;
            player.commit(diff);
            player.action = match kind {
                PlayerActionKind::Bet(_) => ActionLabel::Bet(player.current_bet),
                _ => ActionLabel::Raise(player.current_bet),
            };
        }
        PlayerActionKind::AllIn => {
            let stack = player.stack;
            player.commit(stack);
            player.status = PlayerStatus::AllIn;
            player.action = ActionLabel::AllIn(player.current_bet);
        }
    }

    debug!(
        "seat {seat} {kind}: stack {}, bet {}",
        player.stack, player.current_bet
    );

    match next_actor_after(table, seat) {
        Some(next) => {
            engine.current_actor = Some(next);
            Ok(TurnOutcome::NextActor(next))
        }
        None => handle_no_actor(table, engine, rng),
    }
}

/// Ходить некому: собрать ставки и либо доложить борд, либо
/// сообщить о переходе улицы.
fn handle_no_actor<R: RandomSource>(
    table: &mut Table,
    engine: &mut HandEngine,
    rng: &mut R,
) -> Result<TurnOutcome, EngineError> {
    engine.pot.collect_bets(table);
    engine.current_actor = None;

    if !engine.settings.runout_on_no_actor {
        info!("no eligible actor on {}, street advance required", table.street);
        return Ok(TurnOutcome::StreetAdvanceRequired);
    }

    let need = 5usize.saturating_sub(table.board.len());
    let mut deck = Deck::excluding(&table.known_cards())?;
    let cards = deck.draw_n(need, rng)?;
    table.board.extend(cards);
    table.street = Street::Showdown;
    info!("no eligible actor, board run out to showdown");

    recompute_equities(table, &engine.settings, rng);
    Ok(TurnOutcome::RunOut)
}

/// Перейти на следующую улицу.
///
/// `cards` – карты, открываемые на улице (3/1/1); без них карты
/// сдаются из колоды без известных карт. С ривера – шоудаун.
pub fn next_street<R: RandomSource>(
    table: &mut Table,
    engine: &mut HandEngine,
    cards: Option<Vec<Card>>,
    rng: &mut R,
) -> Result<Street, EngineError> {
    let (street, _) = table.street.next().ok_or(EngineError::HandAlreadyAtShowdown)?;
    let need = street.board_len().saturating_sub(table.board.len());
    let known = table.known_cards();

    let new_cards = match cards {
        Some(cards) => {
            if cards.len() != need {
                return Err(EngineError::InvalidCardCount {
                    expected: need,
                    actual: cards.len(),
                });
            }
            validate_new_cards(&known, &cards)?;
            cards
        }
        None => Deck::excluding(&known)?.draw_n(need, rng)?,
    };

    engine.pot.collect_bets(table);
    table.board.extend(new_cards);
    table.street = street;
    engine.current_actor = match street {
        Street::Showdown => None,
        _ => postflop_first_actor(table),
    };

    info!(
        "street {street}: board {}, pot {}",
        table.board.len(),
        engine.pot.pot
    );
    recompute_equities(table, &engine.settings, rng);
    Ok(street)
}

/// Завершить раздачу и начать следующую.
///
/// Выплаты считаются до любых изменений: при ошибке выбора
/// победителей состояние не меняется.
pub fn next_hand(
    table: &mut Table,
    engine: &mut HandEngine,
    selection: &WinnerSelection,
) -> Result<Vec<Payout>, EngineError> {
    let mut staged_table = table.clone();
    let mut staged_pot = engine.pot.clone();
    staged_pot.collect_bets(&mut staged_table);

    let payouts = if staged_pot.pot.is_zero() {
        Vec::new()
    } else {
        compute_payouts(&staged_table, &staged_pot.tiers, selection)?
    };

    *table = staged_table;
    engine.pot = staged_pot;

    for payout in &payouts {
        table.seats[payout.seat as usize].stack += payout.amount;
        info!(
            "pot #{} awards {} to seat {}",
            payout.tier, payout.amount, payout.seat
        );
    }

    engine.pot.reset_pot();
    table.board.clear();
    table.street = Street::Preflop;
    for p in table.seats.iter_mut() {
        p.reset_for_hand();
        // Без фишек игрок пропускает раздачу.
        if p.visible && p.stack.is_zero() {
            p.status = PlayerStatus::Folded;
            p.action = ActionLabel::Fold;
            p.equity = Equity::Folded;
        }
    }

    rotate_button(table);
    start_hand(table, engine);
    Ok(payouts)
}

/// Посчитать выплаты по уровням банка (без изменения состояния).
pub fn compute_payouts(
    table: &Table,
    tiers: &[PotTier],
    selection: &WinnerSelection,
) -> Result<Vec<Payout>, EngineError> {
    let mut payouts = Vec::new();

    for (tier_idx, tier) in tiers.iter().enumerate() {
        if tier.amount.is_zero() {
            continue;
        }
        let candidates = tier.candidates();

        let winners = match selection {
            WinnerSelection::Manual(chosen) => {
                let seat = *chosen
                    .get(tier_idx)
                    .ok_or(EngineError::MissingWinner(tier_idx))?;
                if !candidates.contains(&seat) {
                    return Err(EngineError::InvalidWinner {
                        tier: tier_idx,
                        seat,
                    });
                }
                vec![seat]
            }
            WinnerSelection::Showdown => showdown_winners(table, candidates)?,
        };

        let ordered = order_from_button(table, winners);
        let (share, remainder) = tier.amount.split(ordered.len());
        for (i, &seat) in ordered.iter().enumerate() {
            let odd_chip = if (i as u64) < remainder.0 { Chips(1) } else { Chips::ZERO };
            payouts.push(Payout {
                tier: tier_idx,
                seat,
                amount: share + odd_chip,
            });
        }
    }

    Ok(payouts)
}

/// Лучшие руки среди кандидатов уровня.
fn showdown_winners(table: &Table, candidates: &[SeatIndex]) -> Result<Vec<SeatIndex>, EngineError> {
    if candidates.len() == 1 {
        return Ok(candidates.to_vec());
    }

    let mut best: Option<HandRank> = None;
    let mut winners: Vec<SeatIndex> = Vec::new();
    let mut last_err = None;

    for &seat in candidates {
        let rank = match evaluate(&table.seats[seat as usize].hole_cards, &table.board) {
            Ok(rank) => rank,
            Err(e) => {
                last_err = Some(e);
                continue;
            }
        };
        match best {
            Some(b) if rank < b => {}
            Some(b) if rank == b => winners.push(seat),
            _ => {
                best = Some(rank);
                winners.clear();
                winners.push(seat);
            }
        }
    }

    match (winners.is_empty(), last_err) {
        (true, Some(e)) => Err(e),
        (true, None) => Err(EngineError::NoEligibleActor),
        (false, _) => Ok(winners),
    }
}

/// Упорядочить места по часовой стрелке, начиная слева от кнопки.
fn order_from_button(table: &Table, mut seats: Vec<SeatIndex>) -> Vec<SeatIndex> {
    let max = table.max_seats().max(1);
    let button = table.dealer_button as usize;
    seats.sort_by_key(|&s| (s as usize + max - button - 1) % max);
    seats
}

/// Пересчитать эквити всех видимых игроков.
///
/// Сфолдившие – отметка Fold; без двух карт или до флопа – ожидание;
/// иначе оценка против остальных несфолдивших видимых игроков.
pub fn recompute_equities<R: RandomSource>(table: &mut Table, settings: &EngineSettings, rng: &mut R) {
    let live = table.live_count();
    let board = table.board.clone();

    for p in table.seats.iter_mut() {
        p.equity = if !p.visible {
            Equity::Pending
        } else if p.status == PlayerStatus::Folded {
            Equity::Folded
        } else if p.hole_cards.len() != 2 || board.len() < 3 {
            Equity::Pending
        } else {
            let opponents = live.saturating_sub(1);
            let value = if settings.parallel_equity {
                estimate_equity_parallel(
                    &p.hole_cards,
                    &board,
                    opponents,
                    settings.equity_trials,
                    settings.equity_workers,
                    rng.next_seed(),
                )
            } else {
                estimate_equity(&p.hole_cards, &board, opponents, settings.equity_trials, rng)
            };
            Equity::Value(value)
        };
    }
}
