//! Оценка эквити методом Монте-Карло.
//!
//! Колода строится один раз (полная минус известные карты), на каждом
//! прогоне добор борда и руки оппонентов тянутся без возвращения, а после
//! прогона все вытянутые карты возвращаются обратно. Ничья считается
//! не-победой.

use log::{debug, warn};
use rayon::prelude::*;

use crate::domain::card::Card;
use crate::domain::deck::Deck;
use crate::engine::errors::EngineError;
use crate::engine::RandomSource;
use crate::eval::evaluator::evaluate;
use crate::infra::rng::DeterministicRng;

/// Счётчики прогонов.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EquityCounts {
    pub wins: u64,
    pub ties: u64,
    /// Все начатые прогоны, включая прерванные.
    pub trials: u64,
    /// Прогоны, прерванные из-за пустой колоды.
    pub aborted: u64,
}

impl EquityCounts {
    /// wins / trials × 100.
    pub fn equity(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.wins as f64 / self.trials as f64 * 100.0
    }

    fn merge(self, other: EquityCounts) -> EquityCounts {
        EquityCounts {
            wins: self.wins + other.wins,
            ties: self.ties + other.ties,
            trials: self.trials + other.trials,
            aborted: self.aborted + other.aborted,
        }
    }
}

/// Симуляция, которую можно выполнять порциями: между вызовами
/// [`EquitySimulation::run_trials`] вызывающий волен остановиться.
#[derive(Clone, Debug)]
pub struct EquitySimulation {
    hole: [Card; 2],
    board: Vec<Card>,
    opponents: usize,
    deck: Deck,
    counts: EquityCounts,
}

impl EquitySimulation {
    pub fn new(hole: &[Card], board: &[Card], opponents: usize) -> Result<Self, EngineError> {
        let hole: [Card; 2] = hole.try_into().map_err(|_| EngineError::InvalidCardCount {
            expected: 2,
            actual: hole.len(),
        })?;
        if board.len() > 5 {
            return Err(EngineError::InvalidCardCount {
                expected: 5,
                actual: board.len(),
            });
        }

        let mut known = hole.to_vec();
        known.extend_from_slice(board);
        let deck = Deck::excluding(&known)?;

        Ok(Self {
            hole,
            board: board.to_vec(),
            opponents,
            deck,
            counts: EquityCounts::default(),
        })
    }

    pub fn counts(&self) -> EquityCounts {
        self.counts
    }

    pub fn equity(&self) -> f64 {
        self.counts.equity()
    }

    /// Выполнить ещё `n` прогонов.
    pub fn run_trials<R: RandomSource>(&mut self, n: usize, rng: &mut R) {
        for _ in 0..n {
            self.counts.trials += 1;
            match self.trial(rng) {
                Ok(TrialOutcome::Win) => self.counts.wins += 1,
                Ok(TrialOutcome::Tie) => self.counts.ties += 1,
                Ok(TrialOutcome::Loss) => {}
                Err(e) => {
                    warn!("equity trial aborted: {e}");
                    self.counts.aborted += 1;
                }
            }
        }
    }

    fn trial<R: RandomSource>(&mut self, rng: &mut R) -> Result<TrialOutcome, EngineError> {
        let need = 5 - self.board.len();
        let mut drawn: Vec<Card> = Vec::with_capacity(need + 2 * self.opponents);

        let result = self.sample_and_compare(need, &mut drawn, rng);

        // Колода восстанавливается после каждого прогона, в том числе прерванного.
        self.deck.return_cards(&drawn);
        result
    }

    fn sample_and_compare<R: RandomSource>(
        &mut self,
        need: usize,
        drawn: &mut Vec<Card>,
        rng: &mut R,
    ) -> Result<TrialOutcome, EngineError> {
        let mut full_board = self.board.clone();
        for _ in 0..need {
            let card = self.deck.draw(rng)?;
            drawn.push(card);
            full_board.push(card);
        }

        let own = evaluate(&self.hole, &full_board)?;

        let mut best_opp = None;
        for _ in 0..self.opponents {
            let a = self.deck.draw(rng)?;
            drawn.push(a);
            let b = self.deck.draw(rng)?;
            drawn.push(b);
            let opp = evaluate(&[a, b], &full_board)?;
            best_opp = best_opp.max(Some(opp));
        }

        Ok(match best_opp {
            Some(opp) if own > opp => TrialOutcome::Win,
            Some(opp) if own == opp => TrialOutcome::Tie,
            Some(_) => TrialOutcome::Loss,
            None => TrialOutcome::Win,
        })
    }
}

enum TrialOutcome {
    Win,
    Tie,
    Loss,
}

/// Процент выигрыша руки `hole` против `opponents` случайных рук.
///
/// Неверное число карманных карт или конфликт карт дают 0,
/// отсутствие оппонентов даёт 100.
pub fn estimate_equity<R: RandomSource>(
    hole: &[Card],
    board: &[Card],
    opponents: usize,
    trials: usize,
    rng: &mut R,
) -> f64 {
    if hole.len() != 2 {
        return 0.0;
    }
    if opponents == 0 {
        return 100.0;
    }

    let mut sim = match EquitySimulation::new(hole, board, opponents) {
        Ok(sim) => sim,
        Err(e) => {
            warn!("equity skipped: {e}");
            return 0.0;
        }
    };
    sim.run_trials(trials, rng);

    debug!(
        "equity {}{} vs {opponents}: {:.1}% over {trials} trials",
        hole[0],
        hole[1],
        sim.equity()
    );
    sim.equity()
}

/// То же, что [`estimate_equity`], но прогоны делятся между `workers`
/// потоками rayon. У каждого потока своя колода и свой RNG с seed
/// `seed + номер потока`, поэтому результат воспроизводим.
pub fn estimate_equity_parallel(
    hole: &[Card],
    board: &[Card],
    opponents: usize,
    trials: usize,
    workers: usize,
    seed: u64,
) -> f64 {
    if hole.len() != 2 {
        return 0.0;
    }
    if opponents == 0 {
        return 100.0;
    }

    let base = match EquitySimulation::new(hole, board, opponents) {
        Ok(sim) => sim,
        Err(e) => {
            warn!("equity skipped: {e}");
            return 0.0;
        }
    };

    let workers = workers.max(1);
    let counts = (0..workers)
        .into_par_iter()
        .map(|w| {
            let share = trials / workers + usize::from(w < trials % workers);
            let mut sim = base.clone();
            let mut rng = DeterministicRng::from_seed(seed.wrapping_add(w as u64));
            sim.run_trials(share, &mut rng);
            sim.counts()
        })
        .reduce(EquityCounts::default, EquityCounts::merge);

    debug!(
        "parallel equity vs {opponents}: {:.1}% over {} trials on {workers} workers",
        counts.equity(),
        counts.trials
    );
    counts.equity()
}
