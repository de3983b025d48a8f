use crate::domain::{Card, SeatIndex};

use thiserror::Error;

/// Ошибки движка HUD.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Колода пуста")]
    EmptyDeck,

    #[error("Неверное число карт: ожидалось {expected}, получено {actual}")]
    InvalidCardCount { expected: usize, actual: usize },

    #[error("Карта {0} встречается дважды")]
    DuplicateCard(Card),

    #[error("История пуста – отменять нечего")]
    NoHistory,

    #[error("Нет таблицы позиций для {0}")]
    UnknownPosition(String),

    #[error("Место {0} не существует за столом")]
    InvalidSeat(SeatIndex),

    #[error("Игрок на месте {0} не участвует в раздаче")]
    SeatNotInHand(SeatIndex),

    #[error("Нет игрока, который может ходить")]
    NoEligibleActor,

    #[error("Игрок на месте {seat} не может выиграть банк #{tier}")]
    InvalidWinner { tier: usize, seat: SeatIndex },

    #[error("Не указан победитель банка #{0}")]
    MissingWinner(usize),

    #[error("Недопустимое число игроков: {0} (нужно 2..=8)")]
    InvalidPlayerCount(usize),

    #[error("Раздача уже на шоудауне")]
    HandAlreadyAtShowdown,

    #[error("Блайнды заданы неверно: SB больше BB")]
    InvalidBlinds,
}
