use serde::{Deserialize, Serialize};

use crate::domain::table::{SeatIndex, Table};
use crate::engine::game_loop::HandEngine;
use crate::engine::pot::PotEngine;

/// Снэпшот стола и раздачи: всё, что нужно, чтобы восстановить состояние.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TableSnapshot {
    pub table: Table,
    pub pot: PotEngine,
    pub current_actor: Option<SeatIndex>,
}

impl TableSnapshot {
    /// Упаковать живое состояние в снапшот.
    pub fn capture(table: &Table, engine: &HandEngine) -> Self {
        Self {
            table: table.clone(),
            pot: engine.pot.clone(),
            current_actor: engine.current_actor,
        }
    }

    /// Записать снапшот обратно в стол и движок (настройки движка не трогаются).
    pub fn restore(&self, table: &mut Table, engine: &mut HandEngine) {
        *table = self.table.clone();
        engine.pot = self.pot.clone();
        engine.current_actor = self.current_actor;
    }

    /// Сокращённое сравнение: банк, блайнды, длина борда, улица, кнопка
    /// и по каждому игроку имя/стек/позиция/действие/число карт/ставка/эквити.
    pub fn same_state(&self, other: &TableSnapshot) -> bool {
        let (a, b) = (&self.table, &other.table);

        self.pot.pot == other.pot.pot
            && a.stakes == b.stakes
            && a.board.len() == b.board.len()
            && a.street == b.street
            && a.dealer_button == b.dealer_button
            && a.seats.len() == b.seats.len()
            && a.seats.iter().zip(b.seats.iter()).all(|(p, q)| {
                p.name == q.name
                    && p.stack == q.stack
                    && p.position == q.position
                    && p.action == q.action
                    && p.hole_cards.len() == q.hole_cards.len()
                    && p.current_bet == q.current_bet
                    && p.equity == q.equity
            })
    }
}
