//! Строковые форматы карт в документе статуса.
//!
//! Канонический формат: `"SS,RR"` (код масти, код ранга), например `"16,14"`.
//! Дополнительно принимаются устаревшие формы:
//! - буквенная: `"S10"`, `"HT"`, `"H5"`, `"SA"`;
//! - компактная числовая: `"1614"`, `"811"`, `"85"` и т.п.
//!
//! Все формы сначала нормализуются к канонической строке, потом разбираются.

use log::warn;
use thiserror::Error;

use crate::domain::card::{Card, Rank, Suit};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardParseError {
    #[error("Некорректная запись карты: {0:?}")]
    MalformedCardToken(String),
}

/// Фиксированная таблица компактных числовых кодов.
/// Эти значения неоднозначны при общем разборе, поэтому задаются явно.
const COMPACT_TABLE: [(&str, &str); 8] = [
    ("1614", "16,14"),
    ("811", "08,11"),
    ("210", "02,10"),
    ("162", "16,02"),
    ("85", "08,05"),
    ("412", "04,12"),
    ("168", "16,08"),
    ("86", "08,06"),
];

/// Привести любую поддерживаемую запись к канонической `"SS,RR"`.
///
/// Результат не обязательно валиден: проверка кодов делается в [`parse_card`].
pub fn normalize_card_token(token: &str) -> Result<String, CardParseError> {
    let malformed = || CardParseError::MalformedCardToken(token.to_string());
    let t = token.trim();
    if t.is_empty() {
        return Err(malformed());
    }

    if let Some((suit, rank)) = t.split_once(',') {
        let suit: u32 = suit.trim().parse().map_err(|_| malformed())?;
        let rank: u32 = rank.trim().parse().map_err(|_| malformed())?;
        return Ok(format!("{suit:02},{rank:02}"));
    }

    let first = t.chars().next().ok_or_else(malformed)?;
    if first.is_ascii_alphabetic() {
        let suit = Suit::from_letter(first).ok_or_else(malformed)?;
        let rank = letter_rank(&t[first.len_utf8()..]).ok_or_else(malformed)?;
        return Ok(format!("{:02},{:02}", suit.code(), rank));
    }

    if let Some((_, canonical)) = COMPACT_TABLE.iter().find(|(k, _)| *k == t) {
        return Ok((*canonical).to_string());
    }

    let n: u32 = t.parse().map_err(|_| malformed())?;
    let (suit, rank) = if n < 100 { (n / 10, n % 10) } else { (n / 100, n % 100) };
    Ok(format!("{suit:02},{rank:02}"))
}

/// Ранг из буквенной формы: `2`..`10`, `T`, `J`, `Q`, `K`, `A`.
fn letter_rank(s: &str) -> Option<u32> {
    match s.to_ascii_uppercase().as_str() {
        "T" => Some(10),
        "J" => Some(11),
        "Q" => Some(12),
        "K" => Some(13),
        "A" => Some(14),
        digits => digits.parse().ok(),
    }
}

/// Разобрать карту из любой поддерживаемой записи.
pub fn parse_card(token: &str) -> Result<Card, CardParseError> {
    let canonical = normalize_card_token(token)?;
    let malformed = || CardParseError::MalformedCardToken(token.to_string());

    let (suit, rank) = canonical.split_once(',').ok_or_else(malformed)?;
    let suit = suit.parse::<u8>().ok().and_then(Suit::from_code).ok_or_else(malformed)?;
    let rank = rank.parse::<u8>().ok().and_then(Rank::from_value).ok_or_else(malformed)?;

    Ok(Card::new(rank, suit))
}

/// Разобрать список карт, выбрасывая некорректные записи.
///
/// Возвращает разобранные карты и ошибки по отброшенным токенам.
pub fn parse_cards_lenient<S: AsRef<str>>(tokens: &[S]) -> (Vec<Card>, Vec<CardParseError>) {
    let mut cards = Vec::with_capacity(tokens.len());
    let mut dropped = Vec::new();

    for token in tokens {
        match parse_card(token.as_ref()) {
            Ok(card) => cards.push(card),
            Err(e) => {
                warn!("card token dropped: {e}");
                dropped.push(e);
            }
        }
    }

    (cards, dropped)
}
