//! Маппинг снимка стола <-> документ статуса.

use log::warn;

use crate::api::dto::{BoardDto, EquityDto, PlayerDto, SidePotDto, StatusDocument};
use crate::domain::card::Card;
use crate::domain::card_codec::{parse_cards_lenient, CardParseError};
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::{ActionLabel, Equity, Player, PlayerStatus, Position};
use crate::domain::table::{SeatIndex, Table, TableStakes, MAX_SEATS};
use crate::engine::positions::{next_actor_after, postflop_first_actor, preflop_first_actor};
use crate::engine::pot::PotEngine;
use crate::engine::side_pots::PotTier;
use crate::state::TableSnapshot;

fn cards_to_wire(cards: &[Card]) -> Vec<String> {
    cards.iter().map(Card::to_wire).collect()
}

pub fn equity_to_dto(equity: Equity) -> Option<EquityDto> {
    match equity {
        Equity::Pending => None,
        Equity::Folded => Some(EquityDto::fold()),
        Equity::Value(v) => Some(EquityDto::Percent(v)),
    }
}

pub fn equity_from_dto(dto: Option<&EquityDto>) -> Equity {
    match dto {
        None => Equity::Pending,
        Some(EquityDto::Percent(v)) => Equity::Value(*v),
        Some(EquityDto::Marker(m)) if m == EquityDto::FOLD => Equity::Folded,
        Some(EquityDto::Marker(m)) => {
            warn!("unknown equity marker {m:?}, treated as pending");
            Equity::Pending
        }
    }
}

fn player_to_dto(p: &Player) -> PlayerDto {
    PlayerDto {
        name: p.name.clone(),
        stack: p.stack.0,
        position: p.position.map(|pos| pos.label().to_string()).unwrap_or_default(),
        action: p.action.to_string(),
        cards: cards_to_wire(&p.hole_cards),
        equity: equity_to_dto(p.equity),
    }
}

/// Снимок -> документ статуса. В документ попадают только видимые игроки.
pub fn snapshot_to_document(snapshot: &TableSnapshot) -> StatusDocument {
    let table = &snapshot.table;
    let name_of = |seat: &SeatIndex| table.seats[*seat as usize].name.clone();

    let side_pots = snapshot
        .pot
        .side_pots()
        .iter()
        .map(|tier| SidePotDto {
            amount: tier.amount.0,
            players: tier
                .eligible
                .iter()
                .filter(|&&seat| table.seats[seat as usize].status != PlayerStatus::Folded)
                .map(name_of)
                .collect(),
        })
        .collect();

    StatusDocument {
        players: table
            .seats
            .iter()
            .filter(|p| p.visible)
            .map(player_to_dto)
            .collect(),
        board: BoardDto {
            pot: snapshot.pot.pot.0,
            main_pot: snapshot.pot.main_pot.0,
            blinds: format!("{}/{}", table.stakes.small_blind, table.stakes.big_blind),
            side_pots,
            cards: cards_to_wire(&table.board),
            street: table.street.to_string(),
        },
    }
}

/// Результат разбора документа: снимок и отброшенные карты.
#[derive(Clone, Debug)]
pub struct LoadedDocument {
    pub snapshot: TableSnapshot,
    pub dropped_cards: Vec<CardParseError>,
}

fn parse_blinds(text: &str) -> Option<TableStakes> {
    let (sb, bb) = text.trim().split_once('/')?;
    let sb = sb.trim().parse().ok()?;
    let bb = bb.trim().parse().ok()?;
    Some(TableStakes::new(Chips(sb), Chips(bb)))
}

/// Статус восстанавливается по метке действия и стеку.
fn derive_status(action: &ActionLabel, stack: Chips) -> PlayerStatus {
    match action {
        ActionLabel::Fold => PlayerStatus::Folded,
        ActionLabel::AllIn(_) => PlayerStatus::AllIn,
        ActionLabel::SmallBlind(c)
        | ActionLabel::BigBlind(c)
        | ActionLabel::Call(c)
        | ActionLabel::Bet(c)
        | ActionLabel::Raise(c)
            if stack.is_zero() && !c.is_zero() =>
        {
            PlayerStatus::AllIn
        }
        _ => PlayerStatus::Active,
    }
}

/// Несобранная ставка улицы по метке: (ставка, блайндовая часть).
/// У олл-ина метка переживает сбор ставок, поэтому его сумма
/// считается уже собранной.
fn street_bet(action: &ActionLabel, status: PlayerStatus) -> (Chips, Chips) {
    if status == PlayerStatus::AllIn {
        return (Chips::ZERO, Chips::ZERO);
    }
    match action {
        ActionLabel::SmallBlind(c) | ActionLabel::BigBlind(c) => (*c, *c),
        ActionLabel::Call(c) | ActionLabel::Bet(c) | ActionLabel::Raise(c) => (*c, Chips::ZERO),
        _ => (Chips::ZERO, Chips::ZERO),
    }
}

fn player_from_dto(dto: &PlayerDto, dropped: &mut Vec<CardParseError>) -> Player {
    let mut player = Player::new(dto.name.clone(), Chips(dto.stack));

    player.position = match dto.position.trim() {
        "" => None,
        label => match label.parse::<Position>() {
            Ok(pos) => Some(pos),
            Err(bad) => {
                warn!("unknown position {bad:?} for {}", dto.name);
                None
            }
        },
    };

    player.action = dto.action.parse::<ActionLabel>().unwrap_or_else(|bad: String| {
        warn!("unknown action label {bad:?} for {}", dto.name);
        ActionLabel::None
    });
    player.status = derive_status(&player.action, player.stack);
    (player.current_bet, player.forced_blind_bet) = street_bet(&player.action, player.status);

    let (cards, errors) = parse_cards_lenient(&dto.cards);
    player.hole_cards = cards;
    dropped.extend(errors);

    player.equity = match equity_from_dto(dto.equity.as_ref()) {
        _ if player.status == PlayerStatus::Folded => Equity::Folded,
        equity => equity,
    };
    player
}

/// Первый на улице, кто ещё не ответил на ставку.
fn derive_current_actor(table: &Table) -> Option<SeatIndex> {
    let start = match table.street {
        Street::Showdown => return None,
        Street::Preflop => preflop_first_actor(table)?,
        _ => postflop_first_actor(table)?,
    };
    let highest = table.highest_bet();

    let mut seat = start;
    loop {
        let p = &table.seats[seat as usize];
        let pending = matches!(
            p.action,
            ActionLabel::None | ActionLabel::SmallBlind(_) | ActionLabel::BigBlind(_)
        );
        if pending || p.current_bet < highest {
            return Some(seat);
        }
        seat = next_actor_after(table, seat)?;
        if seat == start {
            return Some(start);
        }
    }
}

/// Документ статуса -> снимок.
///
/// Битые карты выбрасываются и попадают в `dropped_cards`, остальное
/// загружается. Банк из документа переносится уровнями без разбивки
/// по вкладам.
pub fn document_to_snapshot(doc: &StatusDocument) -> LoadedDocument {
    let mut dropped = Vec::new();
    let mut table = Table::new();

    if doc.players.len() > MAX_SEATS {
        warn!(
            "status document lists {} players, only {MAX_SEATS} seats loaded",
            doc.players.len()
        );
    }
    for (i, seat) in table.seats.iter_mut().enumerate() {
        match doc.players.get(i) {
            Some(dto) => *seat = player_from_dto(dto, &mut dropped),
            None => seat.visible = false,
        }
    }

    table.stakes = parse_blinds(&doc.board.blinds).unwrap_or_else(|| {
        warn!("malformed blinds {:?}, using 0/0", doc.board.blinds);
        TableStakes::default()
    });

    let (board, errors) = parse_cards_lenient(&doc.board.cards);
    table.board = board;
    dropped.extend(errors);

    table.street = doc.board.street.parse::<Street>().unwrap_or_else(|bad: String| {
        warn!("unknown street {bad:?}, derived from board");
        Street::from_board_len(table.board.len()).unwrap_or_default()
    });

    table.dealer_button = table
        .seats
        .iter()
        .position(|p| p.visible && p.position == Some(Position::Bu))
        .map_or(0, |i| i as SeatIndex);

    let pot = carried_pot(&table, &doc.board);
    let current_actor = derive_current_actor(&table);

    LoadedDocument {
        snapshot: TableSnapshot {
            table,
            pot,
            current_actor,
        },
        dropped_cards: dropped,
    }
}

/// Основной банк и сайд-поты из документа как перенесённые уровни.
fn carried_pot(table: &Table, board: &BoardDto) -> PotEngine {
    let visible = table.visible_seats();
    let live: Vec<SeatIndex> = visible
        .iter()
        .copied()
        .filter(|&s| table.seats[s as usize].status != PlayerStatus::Folded)
        .collect();

    let mut tiers = vec![PotTier {
        amount: Chips(board.main_pot),
        contributors: visible.clone(),
        eligible: live,
    }];

    for side in &board.side_pots {
        let eligible = side
            .players
            .iter()
            .filter_map(|name| {
                let seat = visible
                    .iter()
                    .copied()
                    .find(|&s| &table.seats[s as usize].name == name);
                if seat.is_none() {
                    warn!("side pot player {name:?} is not at the table");
                }
                seat
            })
            .collect();
        tiers.push(PotTier {
            amount: Chips(side.amount),
            contributors: visible.clone(),
            eligible,
        });
    }

    let listed: Chips = tiers.iter().map(|t| t.amount).sum();
    let total = Chips(board.pot);
    if total > listed {
        warn!("pot {total} exceeds listed tiers {listed}, remainder added to main pot");
        tiers[0].amount += total - listed;
    } else if total < listed {
        warn!("pot {total} is below listed tiers {listed}, tiers kept");
    }

    if tiers.iter().all(|t| t.amount.is_zero()) {
        return PotEngine::new();
    }
    PotEngine::from_carried(tiers)
}
