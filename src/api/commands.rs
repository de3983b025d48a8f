use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::HudConfig;
use crate::domain::card::Card;
use crate::domain::card_codec::{parse_card, CardParseError};
use crate::domain::chips::Chips;
use crate::domain::table::{SeatIndex, Table};
use crate::engine::actions::PlayerActionKind;
use crate::engine::game_loop::{
    apply_action, next_hand, next_street, recompute_equities, start_hand, HandEngine,
    WinnerSelection,
};
use crate::engine::hand_history::UndoHistory;
use crate::engine::setup;
use crate::infra::mapping::{document_to_snapshot, snapshot_to_document};
use crate::infra::persistence::{FileStatusStorage, StatusStorage};
use crate::infra::rng::SessionRng;
use crate::state::TableSnapshot;

use super::dto::{CommandResponse, StatusDocument};
use super::errors::ApiError;
use super::queries::{run_query, Query, QueryResponse};

/// Команда HUD. Все изменения состояния проходят через `Session::apply`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Действие текущего ходящего.
    Action(PlayerActionKind),

    /// Следующая улица; без карт – сдать из колоды.
    NextStreet { cards: Option<Vec<Card>> },

    /// Раздать банк и начать новую раздачу.
    NextHand(WinnerSelection),

    SetBlinds { small_blind: Chips, big_blind: Chips },
    SetStack { seat: SeatIndex, amount: Chips },
    /// Одинаковый стек всем местам.
    SetAllStacks { amount: Chips },
    SetName { seat: SeatIndex, name: String },
    SetButton { seat: SeatIndex },
    SetPlayerCount { count: usize },
    /// 2 карты или пусто (сброс).
    SetHoleCards { seat: SeatIndex, cards: Vec<Card> },
    /// 0, 3, 4 или 5 карт.
    SetBoard { cards: Vec<Card> },

    /// Пересчитать эквити по текущим картам.
    RecomputeEquity,
}

/// Строгий разбор карт для команд: первая битая карта – ошибка.
pub fn cards_from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Card>, ApiError> {
    tokens
        .iter()
        .map(|t| parse_card(t.as_ref()).map_err(ApiError::from))
        .collect()
}

/// Сессия HUD: стол, раздача, история отмены и RNG.
///
/// После каждой успешной команды в историю пишется снимок. Команда,
/// завершившаяся ошибкой, состояние не меняет.
#[derive(Debug)]
pub struct Session {
    table: Table,
    engine: HandEngine,
    history: UndoHistory,
    rng: SessionRng,
    config: HudConfig,
}

impl Session {
    pub fn new(config: HudConfig) -> Self {
        let mut table = Table::new();
        let mut engine = HandEngine::new(config.engine_settings());
        start_hand(&mut table, &mut engine);

        let mut history = UndoHistory::new(config.history_capacity);
        history.push(TableSnapshot::capture(&table, &engine));

        Self {
            table,
            engine,
            history,
            rng: SessionRng::new(config.rng_seed),
            config,
        }
    }

    pub fn config(&self) -> &HudConfig {
        &self.config
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn engine(&self) -> &HandEngine {
        &self.engine
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    /// Текущее состояние (для опроса хостом).
    pub fn current_state(&self) -> TableSnapshot {
        TableSnapshot::capture(&self.table, &self.engine)
    }

    pub fn query(&self, query: Query) -> QueryResponse {
        run_query(&self.current_state(), query)
    }

    /// Применить команду.
    pub fn apply(&mut self, command: Command) -> Result<CommandResponse, ApiError> {
        let mut table = self.table.clone();
        let mut engine = self.engine.clone();
        let rng = &mut self.rng;

        let response = match command {
            Command::Action(kind) => {
                let outcome = apply_action(&mut table, &mut engine, kind, rng)?;
                CommandResponse::Turn(outcome.into())
            }
            Command::NextStreet { cards } => {
                CommandResponse::Street(next_street(&mut table, &mut engine, cards, rng)?)
            }
            Command::NextHand(selection) => {
                CommandResponse::HandFinished(next_hand(&mut table, &mut engine, &selection)?)
            }
            Command::SetBlinds {
                small_blind,
                big_blind,
            } => {
                setup::set_blinds(&mut table, &mut engine, small_blind, big_blind)?;
                CommandResponse::Ok
            }
            Command::SetStack { seat, amount } => {
                setup::set_stack(&mut table, &mut engine, seat, amount)?;
                CommandResponse::Ok
            }
            Command::SetAllStacks { amount } => {
                setup::set_all_stacks(&mut table, &mut engine, amount);
                CommandResponse::Ok
            }
            Command::SetName { seat, name } => {
                setup::set_name(&mut table, seat, name)?;
                CommandResponse::Ok
            }
            Command::SetButton { seat } => {
                setup::set_button(&mut table, &mut engine, seat)?;
                CommandResponse::Ok
            }
            Command::SetPlayerCount { count } => {
                setup::set_player_count(&mut table, &mut engine, count)?;
                CommandResponse::Ok
            }
            Command::SetHoleCards { seat, cards } => {
                setup::set_hole_cards(&mut table, &mut engine, seat, cards, rng)?;
                CommandResponse::Ok
            }
            Command::SetBoard { cards } => {
                setup::set_board(&mut table, &mut engine, cards, rng)?;
                CommandResponse::Ok
            }
            Command::RecomputeEquity => {
                recompute_equities(&mut table, &engine.settings, rng);
                CommandResponse::Ok
            }
        };

        self.table = table;
        self.engine = engine;
        self.history.push(self.current_state());
        Ok(response)
    }

    /// Откатиться на предыдущий снимок. Без истории состояние не меняется.
    pub fn undo(&mut self) -> Result<(), ApiError> {
        let snapshot = self.history.undo()?;
        snapshot.restore(&mut self.table, &mut self.engine);
        Ok(())
    }

    pub fn export_document(&self) -> StatusDocument {
        snapshot_to_document(&self.current_state())
    }

    /// Записать документ статуса; состояние не меняется.
    pub fn export_to(&self, path: &Path) -> Result<(), ApiError> {
        self.export_into(&mut FileStatusStorage::new(path))
    }

    pub fn export_into<S: StatusStorage>(&self, storage: &mut S) -> Result<(), ApiError> {
        storage.save(&self.export_document())?;
        Ok(())
    }

    /// Записать документ статуса по пути из конфига.
    pub fn autosave(&self) -> Result<(), ApiError> {
        self.export_to(&self.config.autosave_path)
    }

    /// Загрузить документ статуса из файла.
    ///
    /// Ошибка чтения или JSON оставляет состояние как было. Битые карты
    /// выбрасываются и возвращаются вызывающему.
    pub fn load(&mut self, path: &Path) -> Result<Vec<CardParseError>, ApiError> {
        self.load_from(&FileStatusStorage::new(path))
    }

    pub fn load_from<S: StatusStorage>(&mut self, storage: &S) -> Result<Vec<CardParseError>, ApiError> {
        let doc = storage.load()?;
        Ok(self.load_document(&doc))
    }

    /// Заменить состояние документом статуса.
    pub fn load_document(&mut self, doc: &StatusDocument) -> Vec<CardParseError> {
        let loaded = document_to_snapshot(doc);
        for err in &loaded.dropped_cards {
            warn!("status load: {err}");
        }

        loaded.snapshot.restore(&mut self.table, &mut self.engine);
        self.history.push(self.current_state());
        info!(
            "status loaded: {} players, street {}",
            self.table.visible_count(),
            self.table.street
        );
        loaded.dropped_cards
    }
}
