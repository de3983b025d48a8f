//! Инфраструктурный слой вокруг движка HUD:
//! - RNG-реализации для движка;
//! - хранение документа статуса (файл / память);
//! - маппинги между снимком и документом статуса.

pub mod mapping;
pub mod persistence;
pub mod rng;

pub use mapping::*;
pub use persistence::*;
pub use rng::*;
