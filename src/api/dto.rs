use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::table::SeatIndex;
use crate::engine::{Payout, TurnOutcome};

/// Документ статуса: то, что HUD пишет на диск и читает обратно.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct StatusDocument {
    /// Только видимые игроки, по порядку мест.
    pub players: Vec<PlayerDto>,
    pub board: BoardDto,
}

/// DTO игрока в документе статуса.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PlayerDto {
    pub name: String,
    pub stack: u64,
    /// Метка позиции ("BU", "SB", ...), пустая строка – без позиции.
    #[serde(default)]
    pub position: String,
    /// Метка последнего действия ("Call 20", "Fold", ...).
    #[serde(default)]
    pub action: String,
    /// Карты в формате "SS,RR": 0 или 2.
    #[serde(default)]
    pub cards: Vec<String>,
    /// Процент, "Fold" или null (оценки нет).
    #[serde(default)]
    pub equity: Option<EquityDto>,
}

/// Эквити на проводе: число или текстовая отметка.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum EquityDto {
    Percent(f64),
    Marker(String),
}

impl EquityDto {
    pub const FOLD: &'static str = "Fold";

    pub fn fold() -> Self {
        EquityDto::Marker(Self::FOLD.to_string())
    }
}

/// DTO борда и банка. Отсутствующие поля берутся из `Default`;
/// без `main_pot` основной банк получает остаток `pot`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoardDto {
    pub pot: u64,
    pub main_pot: u64,
    /// "SB/BB".
    pub blinds: String,
    pub side_pots: Vec<SidePotDto>,
    pub cards: Vec<String>,
    pub street: String,
}

impl Default for BoardDto {
    fn default() -> Self {
        Self {
            pot: 0,
            main_pot: 0,
            blinds: "0/0".to_string(),
            side_pots: Vec::new(),
            cards: Vec::new(),
            street: Street::Preflop.to_string(),
        }
    }
}

/// Сайд-пот: сумма и имена претендентов.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SidePotDto {
    pub amount: u64,
    #[serde(default)]
    pub players: Vec<String>,
}

/// Короткая сводка по месту (для CLI и хоста).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SeatSummaryDto {
    pub seat: SeatIndex,
    pub name: String,
    pub stack: Chips,
    pub current_bet: Chips,
    pub position: String,
    pub action: String,
    pub to_act: bool,
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum CommandResponse {
    /// Успешный результат без доп.данных.
    Ok,

    /// Результат действия игрока.
    Turn(TurnOutcomeDto),

    /// Открыта улица.
    Street(Street),

    /// Раздача закрыта, банк выплачен.
    HandFinished(Vec<Payout>),
}

/// Внешнее представление `TurnOutcome`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnOutcomeDto {
    NextActor(SeatIndex),
    StreetAdvanceRequired,
    RunOut,
}

impl From<TurnOutcome> for TurnOutcomeDto {
    fn from(outcome: TurnOutcome) -> Self {
        match outcome {
            TurnOutcome::NextActor(seat) => TurnOutcomeDto::NextActor(seat),
            TurnOutcome::StreetAdvanceRequired => TurnOutcomeDto::StreetAdvanceRequired,
            TurnOutcome::RunOut => TurnOutcomeDto::RunOut,
        }
    }
}
