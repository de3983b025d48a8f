use serde::{Deserialize, Serialize};

use crate::infra::mapping::snapshot_to_document;
use crate::state::TableSnapshot;

use super::dto::{SeatSummaryDto, StatusDocument};

/// Запросы "только чтение".
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    /// Документ статуса в том виде, в каком он пишется на диск.
    Document,

    /// Сводка по видимым местам.
    Seats,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum QueryResponse {
    Document(StatusDocument),
    Seats(Vec<SeatSummaryDto>),
}

pub fn run_query(snapshot: &TableSnapshot, query: Query) -> QueryResponse {
    match query {
        Query::Document => QueryResponse::Document(snapshot_to_document(snapshot)),
        Query::Seats => QueryResponse::Seats(build_seat_summaries(snapshot)),
    }
}

/// Сводка по видимым местам: ставки улицы и чей ход.
pub fn build_seat_summaries(snapshot: &TableSnapshot) -> Vec<SeatSummaryDto> {
    snapshot
        .table
        .seats
        .iter()
        .enumerate()
        .filter(|(_, p)| p.visible)
        .map(|(idx, p)| {
            let seat = idx as u8;
            SeatSummaryDto {
                seat,
                name: p.name.clone(),
                stack: p.stack,
                current_bet: p.current_bet,
                position: p.position.map(|pos| pos.label().to_string()).unwrap_or_default(),
                action: p.action.to_string(),
                to_act: snapshot.current_actor == Some(seat),
            }
        })
        .collect()
}
