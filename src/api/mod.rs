//! Внешний API HUD.
//!
//! Здесь описываются:
//! - команды (commands.rs) и сессия, через которую они применяются;
//! - запросы (queries.rs) – только чтение;
//! - DTO (dto.rs) – документ статуса и ответы;
//! - ошибки (errors.rs) – то, что видит хост.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;
