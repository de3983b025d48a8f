//! Движок HUD: ставки, банк и сайд-поты, очередь хода, улицы, история.
//!
//! Высокоуровневый объект: `HandEngine`
//! Основные операции:
//!   - `apply_action` – применить действие текущего ходящего
//!   - `next_street` – собрать ставки и открыть следующую улицу
//!   - `next_hand` – раздать банк и начать новую раздачу

pub mod actions;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod positions;
pub mod pot;
pub mod setup;
pub mod side_pots;
pub mod validation;

pub use actions::PlayerActionKind;
pub use errors::EngineError;
pub use game_loop::{
    apply_action, compute_payouts, next_hand, next_street, recompute_equities, start_hand,
    EngineSettings, HandEngine, Payout, TurnOutcome, WinnerSelection,
};
pub use hand_history::UndoHistory;
pub use pot::PotEngine;
pub use side_pots::PotTier;

/// RNG интерфейс для engine. Реализации – в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Равномерный индекс в `0..upper` (`upper > 0`).
    fn index(&mut self, upper: usize) -> usize;

    /// Seed для производного генератора (параллельные прогоны).
    fn next_seed(&mut self) -> u64;
}
