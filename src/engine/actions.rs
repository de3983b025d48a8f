use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Chips;

/// Тип действия игрока. Применяется к текущему ходящему.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    Fold,
    Check,
    Call,
    /// Bet: итоговая ставка игрока на улице.
    Bet(Chips),
    /// Raise: итоговая ставка игрока на улице.
    Raise(Chips),
    /// All-in – поставить весь стек.
    AllIn,
}

impl fmt::Display for PlayerActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerActionKind::Fold => f.write_str("fold"),
            PlayerActionKind::Check => f.write_str("check"),
            PlayerActionKind::Call => f.write_str("call"),
            PlayerActionKind::Bet(c) => write!(f, "bet {c}"),
            PlayerActionKind::Raise(c) => write!(f, "raise {c}"),
            PlayerActionKind::AllIn => f.write_str("all-in"),
        }
    }
}
