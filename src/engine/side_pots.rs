use serde::{Deserialize, Serialize};

use crate::domain::{chips::Chips, SeatIndex};

/// Уровень банка: основной (первый) или сайд-пот.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotTier {
    pub amount: Chips,
    /// Все, кто внёс не меньше порога уровня.
    pub contributors: Vec<SeatIndex>,
    /// Внёсшие не меньше порога и не сфолдившие.
    pub eligible: Vec<SeatIndex>,
}

impl PotTier {
    /// Кто может забрать этот уровень: претенденты, а если все
    /// сфолдили – внёсшие.
    pub fn candidates(&self) -> &[SeatIndex] {
        if self.eligible.is_empty() {
            &self.contributors
        } else {
            &self.eligible
        }
    }
}

/// Вклад одного места за раздачу.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contribution {
    pub seat: SeatIndex,
    pub amount: Chips,
    pub folded: bool,
}

/// Посчитать уровни банка из сумм, которые внесли игроки.
///
/// Вход: суммарные вклады за раздачу (по всем улицам).
/// Выход: уровни от основного банка к старшим сайд-потам. Соседние
/// уровни с одинаковым набором претендентов склеиваются.
pub fn compute_side_pots(contributions: &[Contribution]) -> Vec<PotTier> {
    let mut levels: Vec<Chips> = contributions
        .iter()
        .map(|c| c.amount)
        .filter(|a| !a.is_zero())
        .collect();
    levels.sort();
    levels.dedup();

    let mut pots: Vec<PotTier> = Vec::new();
    let mut prev_level = Chips::ZERO;

    for level in levels {
        let reached: Vec<&Contribution> =
            contributions.iter().filter(|c| c.amount >= level).collect();

        let amount = (level - prev_level).times(reached.len());
        let contributors: Vec<SeatIndex> = reached.iter().map(|c| c.seat).collect();
        let eligible: Vec<SeatIndex> = reached
            .iter()
            .filter(|c| !c.folded)
            .map(|c| c.seat)
            .collect();

        match pots.last_mut() {
            Some(last) if last.eligible == eligible => last.amount += amount,
            _ => pots.push(PotTier {
                amount,
                contributors,
                eligible,
            }),
        }

        prev_level = level;
    }

    pots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(seat: SeatIndex, amount: u64, folded: bool) -> Contribution {
        Contribution {
            seat,
            amount: Chips(amount),
            folded,
        }
    }

    #[test]
    fn folded_short_contribution_does_not_split_the_pot() {
        let pots = compute_side_pots(&[c(0, 10, true), c(1, 50, false), c(2, 50, false)]);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, Chips(110));
        assert_eq!(pots[0].eligible, vec![1, 2]);
        assert_eq!(pots[0].contributors, vec![0, 1, 2]);
    }

    #[test]
    fn zero_contributions_give_no_tiers() {
        assert!(compute_side_pots(&[c(0, 0, false), c(1, 0, false)]).is_empty());
    }
}
