use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::card_codec::CardParseError;
use crate::engine::EngineError;
use crate::infra::persistence::PersistenceError;

/// Ошибки внешнего API (то, что видит хост HUD).
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битая карта в команде).
    #[error("Неверный запрос: {0}")]
    BadRequest(String),

    /// Ошибка движка (ставки, действия, история).
    #[error("Ошибка движка: {0}")]
    EngineError(String),

    /// Ошибка чтения или записи документа статуса.
    #[error("Ошибка хранилища: {0}")]
    Storage(String),

    /// Ошибка конфигурации.
    #[error("Ошибка конфигурации: {0}")]
    Config(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::EngineError(err.to_string())
    }
}

impl From<CardParseError> for ApiError {
    fn from(err: CardParseError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        ApiError::Storage(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::Config(err.to_string())
    }
}
