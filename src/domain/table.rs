use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::{Player, PlayerStatus};

/// Индекс места за столом (0..MAX_SEATS-1).
pub type SeatIndex = u8;

/// Мест за столом всегда восемь; размер стола задаётся видимостью.
pub const MAX_SEATS: usize = 8;

/// Стейки стола (SB/BB).
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableStakes {
    pub small_blind: Chips,
    pub big_blind: Chips,
}

impl TableStakes {
    pub fn new(sb: Chips, bb: Chips) -> Self {
        Self {
            small_blind: sb,
            big_blind: bb,
        }
    }
}

/// Основное состояние стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Table {
    /// Места за столом: индекс вектора = SeatIndex.
    pub seats: Vec<Player>,

    /// Общие карты борда (0, 3, 4 или 5 карт).
    pub board: Vec<Card>,

    /// Индекс дилерской кнопки.
    pub dealer_button: SeatIndex,

    /// Текущая улица раздачи.
    pub street: Street,

    pub stakes: TableStakes,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    /// Стол на 8 мест `P1`..`P8`, все видимы, стеки нулевые.
    pub fn new() -> Self {
        let seats = (1..=MAX_SEATS)
            .map(|i| Player::new(format!("P{i}"), Chips::ZERO))
            .collect();
        Self {
            seats,
            board: Vec::new(),
            dealer_button: 0,
            street: Street::Preflop,
            stakes: TableStakes::default(),
        }
    }

    pub fn max_seats(&self) -> usize {
        self.seats.len()
    }

    pub fn player(&self, seat: SeatIndex) -> Option<&Player> {
        self.seats.get(seat as usize)
    }

    pub fn player_mut(&mut self, seat: SeatIndex) -> Option<&mut Player> {
        self.seats.get_mut(seat as usize)
    }

    /// Видимые места по порядку индексов.
    pub fn visible_seats(&self) -> Vec<SeatIndex> {
        self.seats
            .iter()
            .enumerate()
            .filter(|(_, p)| p.visible)
            .map(|(i, _)| i as SeatIndex)
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.seats.iter().filter(|p| p.visible).count()
    }

    /// Сколько игроков ещё претендует на банк.
    pub fn live_count(&self) -> usize {
        self.seats
            .iter()
            .filter(|p| p.visible && p.status != PlayerStatus::Folded)
            .count()
    }

    /// Максимальная ставка на текущей улице.
    pub fn highest_bet(&self) -> Chips {
        self.seats
            .iter()
            .map(|p| p.current_bet)
            .max()
            .unwrap_or(Chips::ZERO)
    }

    /// Все известные карты: борд + карманные карты видимых игроков.
    pub fn known_cards(&self) -> Vec<Card> {
        let mut cards = self.board.clone();
        for p in self.seats.iter().filter(|p| p.visible) {
            cards.extend_from_slice(&p.hole_cards);
        }
        cards
    }
}
