use log::debug;
use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::player::{ActionLabel, PlayerStatus};
use crate::domain::table::{SeatIndex, Table, MAX_SEATS};
use crate::engine::side_pots::{compute_side_pots, Contribution, PotTier};

/// Банк раздачи: вклады мест и уровни (основной банк + сайд-поты).
///
/// Инвариант: `pot == сумма tiers[i].amount`, `main_pot == tiers[0].amount`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotEngine {
    pub pot: Chips,
    pub main_pot: Chips,
    pub tiers: Vec<PotTier>,
    /// Сколько всего фишек внёс каждый seat за раздачу (собранные ставки).
    pub contributions: Vec<Chips>,
    /// Уровни, загруженные из документа статуса без разбивки по вкладам.
    /// Прибавляются к пересчитанным уровням по индексу.
    pub carried: Vec<PotTier>,
}

impl Default for PotEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PotEngine {
    pub fn new() -> Self {
        Self {
            pot: Chips::ZERO,
            main_pot: Chips::ZERO,
            tiers: Vec::new(),
            contributions: vec![Chips::ZERO; MAX_SEATS],
            carried: Vec::new(),
        }
    }

    /// Банк из загруженных сумм: основной банк + сайд-поты.
    pub fn from_carried(carried: Vec<PotTier>) -> Self {
        let mut engine = Self::new();
        engine.carried = carried;
        engine.tiers = engine.carried.clone();
        engine.refresh_totals();
        engine
    }

    /// Сайд-поты (все уровни, кроме основного).
    pub fn side_pots(&self) -> &[PotTier] {
        self.tiers.get(1..).unwrap_or(&[])
    }

    pub fn contribution(&self, seat: SeatIndex) -> Chips {
        self.contributions
            .get(seat as usize)
            .copied()
            .unwrap_or(Chips::ZERO)
    }

    /// Собрать ставки улицы в банк.
    ///
    /// `current_bet` каждого места уходит во вклад, метки действий
    /// сбрасываются (кроме Fold и All-in), уровни пересчитываются.
    /// Возвращает собранную сумму; без новых ставок банк не меняется.
    pub fn collect_bets(&mut self, table: &mut Table) -> Chips {
        if self.contributions.len() < table.seats.len() {
            self.contributions.resize(table.seats.len(), Chips::ZERO);
        }

        let mut collected = Chips::ZERO;
        for (seat, player) in table.seats.iter_mut().enumerate() {
            let bet = player.current_bet;
            self.contributions[seat] += bet;
            collected += bet;

            player.current_bet = Chips::ZERO;
            player.forced_blind_bet = Chips::ZERO;
            if !matches!(player.status, PlayerStatus::Folded | PlayerStatus::AllIn) {
                player.action = ActionLabel::None;
            }
        }

        self.recompute_tiers(table);
        debug!(
            "collected {collected} into pot, total {} in {} tier(s)",
            self.pot,
            self.tiers.len()
        );
        collected
    }

    /// Пересчитать уровни из вкладов и статусов игроков.
    pub fn recompute_tiers(&mut self, table: &Table) {
        let entries: Vec<Contribution> = table
            .seats
            .iter()
            .enumerate()
            .map(|(seat, p)| Contribution {
                seat: seat as SeatIndex,
                amount: self.contributions.get(seat).copied().unwrap_or(Chips::ZERO),
                folded: p.status == PlayerStatus::Folded,
            })
            .collect();

        let mut tiers = compute_side_pots(&entries);
        for (i, carried) in self.carried.iter().enumerate() {
            // Фолд после загрузки лишает права и на перенесённые фишки.
            let live: Vec<SeatIndex> = carried
                .eligible
                .iter()
                .copied()
                .filter(|&s| {
                    table
                        .seats
                        .get(s as usize)
                        .is_some_and(|p| p.status != PlayerStatus::Folded)
                })
                .collect();

            match tiers.get_mut(i) {
                Some(tier) => {
                    tier.amount += carried.amount;
                    for seat in live {
                        if !tier.eligible.contains(&seat) {
                            tier.eligible.push(seat);
                        }
                    }
                    for &seat in &carried.contributors {
                        if !tier.contributors.contains(&seat) {
                            tier.contributors.push(seat);
                        }
                    }
                    tier.eligible.sort_unstable();
                    tier.contributors.sort_unstable();
                }
                None => tiers.push(PotTier {
                    amount: carried.amount,
                    contributors: carried.contributors.clone(),
                    eligible: live,
                }),
            }
        }

        self.tiers = tiers;
        self.refresh_totals();
    }

    fn refresh_totals(&mut self) {
        self.pot = self.tiers.iter().map(|t| t.amount).sum();
        self.main_pot = self.tiers.first().map_or(Chips::ZERO, |t| t.amount);
    }

    /// Обнулить банк перед новой раздачей.
    pub fn reset_pot(&mut self) {
        self.pot = Chips::ZERO;
        self.main_pot = Chips::ZERO;
        self.tiers.clear();
        self.carried.clear();
        self.contributions.iter_mut().for_each(|c| *c = Chips::ZERO);
    }
}
