//! Доменная модель HUD: карты, колода, игроки, стол.

pub mod card;
pub mod card_codec;
pub mod chips;
pub mod deck;
pub mod hand;
pub mod player;
pub mod table;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use card_codec::{normalize_card_token, parse_card, parse_cards_lenient, CardParseError};
pub use chips::*;
pub use deck::*;
pub use hand::*;
pub use player::*;
pub use table::*;
