//! Оценка силы рук и эквити (Texas Hold'em).
//!
//! Основные функции:
//!   `evaluate(hole, board) -> HandRank`
//!   `estimate_equity(hole, board, opponents, trials, rng) -> f64`

pub mod equity;
pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use equity::{estimate_equity, estimate_equity_parallel, EquitySimulation};
pub use evaluator::{evaluate, evaluate_best_hand};
pub use hand_rank::{describe_hand, HandCategory, HandRank};
