//! Ядро покерного HUD: банк с сайд-потами, очередь хода по улицам,
//! оценка эквити Монте-Карло, история отмены и документ статуса.
//!
//! Хост работает через `api::Session`: применяет команды, опрашивает
//! `current_state()` и сам решает, когда писать документ статуса.

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod state;

pub use api::{Command, Session};
pub use config::HudConfig;
