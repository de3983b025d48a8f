use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;

/// Статус игрока в текущей раздаче. Единственный источник правды
/// для права на банк: банк и очередь хода смотрят только сюда.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Игрок активен в текущей раздаче.
    #[default]
    Active,
    /// Игрок сфолдил и больше не претендует на банк.
    Folded,
    /// Игрок в олл-ине – не может больше делать ставки.
    AllIn,
}

/// Позиция за столом относительно кнопки.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Position {
    Utg,
    UtgPlus1,
    Lj,
    Hj,
    Co,
    Bu,
    Sb,
    Bb,
}

impl Position {
    pub fn label(self) -> &'static str {
        match self {
            Position::Utg => "UTG",
            Position::UtgPlus1 => "+1",
            Position::Lj => "LJ",
            Position::Hj => "HJ",
            Position::Co => "CO",
            Position::Bu => "BU",
            Position::Sb => "SB",
            Position::Bb => "BB",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "UTG" => Ok(Position::Utg),
            "+1" | "UTG+1" => Ok(Position::UtgPlus1),
            "LJ" => Ok(Position::Lj),
            "HJ" => Ok(Position::Hj),
            "CO" => Ok(Position::Co),
            "BU" | "BTN" => Ok(Position::Bu),
            "SB" => Ok(Position::Sb),
            "BB" => Ok(Position::Bb),
            other => Err(other.to_string()),
        }
    }
}

/// Последнее действие игрока (то, что видно в HUD).
/// Сумма в ставочных вариантах – итоговая ставка игрока на улице.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionLabel {
    #[default]
    None,
    SmallBlind(Chips),
    BigBlind(Chips),
    Fold,
    Check,
    Call(Chips),
    Bet(Chips),
    Raise(Chips),
    AllIn(Chips),
}

impl fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionLabel::None => Ok(()),
            ActionLabel::SmallBlind(c) => write!(f, "SB {c}"),
            ActionLabel::BigBlind(c) => write!(f, "BB {c}"),
            ActionLabel::Fold => f.write_str("Fold"),
            ActionLabel::Check => f.write_str("Check"),
            ActionLabel::Call(c) => write!(f, "Call {c}"),
            ActionLabel::Bet(c) => write!(f, "Bet {c}"),
            ActionLabel::Raise(c) => write!(f, "Raise {c}"),
            ActionLabel::AllIn(c) => write!(f, "All-in {c}"),
        }
    }
}

impl FromStr for ActionLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "" => return Ok(ActionLabel::None),
            "Fold" => return Ok(ActionLabel::Fold),
            "Check" => return Ok(ActionLabel::Check),
            _ => {}
        }

        let (word, amount) = s.rsplit_once(' ').ok_or_else(|| s.to_string())?;
        let amount = Chips(amount.parse().map_err(|_| s.to_string())?);
        match word {
            "SB" => Ok(ActionLabel::SmallBlind(amount)),
            "BB" => Ok(ActionLabel::BigBlind(amount)),
            "Call" => Ok(ActionLabel::Call(amount)),
            "Bet" => Ok(ActionLabel::Bet(amount)),
            "Raise" => Ok(ActionLabel::Raise(amount)),
            "All-in" => Ok(ActionLabel::AllIn(amount)),
            _ => Err(s.to_string()),
        }
    }
}

/// Последняя оценка эквити игрока.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub enum Equity {
    /// Оценки нет (нет карт или борд короче флопа).
    #[default]
    Pending,
    /// Игрок сфолдил.
    Folded,
    /// Процент выигрыша 0..=100.
    Value(f64),
}

/// Игрок за столом. Места не удаляются: при смене размера стола
/// меняется только `visible`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub name: String,
    /// Текущий стек за столом.
    pub stack: Chips,
    pub position: Option<Position>,
    /// Ставка на текущей улице (обнуляется при сборе ставок).
    pub current_bet: Chips,
    /// Блайндовая часть `current_bet`.
    pub forced_blind_bet: Chips,
    pub action: ActionLabel,
    /// Карманные карты: 0 или 2.
    pub hole_cards: Vec<Card>,
    pub status: PlayerStatus,
    pub visible: bool,
    pub equity: Equity,
}

impl Player {
    pub fn new(name: impl Into<String>, stack: Chips) -> Self {
        Self {
            name: name.into(),
            stack,
            position: None,
            current_bet: Chips::ZERO,
            forced_blind_bet: Chips::ZERO,
            action: ActionLabel::None,
            hole_cards: Vec::new(),
            status: PlayerStatus::Active,
            visible: true,
            equity: Equity::Pending,
        }
    }

    /// Может ли игрок сейчас ходить.
    pub fn can_act(&self) -> bool {
        self.visible && self.status == PlayerStatus::Active
    }

    /// Претендует ли игрок на банк.
    pub fn is_live(&self) -> bool {
        self.visible && self.status != PlayerStatus::Folded
    }

    /// Перенести `amount` из стека в ставку (не больше стека).
    /// Возвращает фактически поставленную сумму.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.current_bet += paid;
        if self.stack.is_zero() && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        paid
    }

    /// Сбросить всё, что относится к раздаче.
    pub fn reset_for_hand(&mut self) {
        self.current_bet = Chips::ZERO;
        self.forced_blind_bet = Chips::ZERO;
        self.action = ActionLabel::None;
        self.hole_cards.clear();
        self.equity = Equity::Pending;
        self.status = PlayerStatus::Active;
    }
}
