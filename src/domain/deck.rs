use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};
use crate::engine::errors::EngineError;
use crate::engine::RandomSource;

/// Колода карт. Порядок хранения значения не имеет: вытягивание
/// выбирает случайную карту через RNG (выборка без возвращения).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// Clubs 2..A, Diamonds 2..A, Hearts 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    /// Полная колода минус известные карты (карманные + борд).
    ///
    /// Ошибка, если среди известных карт есть повтор.
    pub fn excluding(known: &[Card]) -> Result<Self, EngineError> {
        let mut seen = HashSet::with_capacity(known.len());
        for card in known {
            if !seen.insert(*card) {
                return Err(EngineError::DuplicateCard(*card));
            }
        }

        let mut deck = Self::standard_52();
        deck.cards.retain(|c| !seen.contains(c));
        Ok(deck)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Убрать случайную карту и вернуть её.
    pub fn draw<R: RandomSource>(&mut self, rng: &mut R) -> Result<Card, EngineError> {
        if self.cards.is_empty() {
            return Err(EngineError::EmptyDeck);
        }
        let idx = rng.index(self.cards.len());
        Ok(self.cards.swap_remove(idx))
    }

    /// Взять n случайных карт. При нехватке уже взятые карты
    /// возвращаются в колоду, и отдаётся `EmptyDeck`.
    pub fn draw_n<R: RandomSource>(
        &mut self,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<Card>, EngineError> {
        let mut taken = Vec::with_capacity(n);
        for _ in 0..n {
            match self.draw(rng) {
                Ok(card) => taken.push(card),
                Err(e) => {
                    self.cards.extend(taken);
                    return Err(e);
                }
            }
        }
        Ok(taken)
    }

    /// Перемешать порядок карт.
    pub fn shuffle<R: RandomSource>(&mut self, rng: &mut R) {
        rng.shuffle(&mut self.cards);
    }

    /// Вернуть ранее вытянутую карту.
    pub fn return_card(&mut self, card: Card) {
        debug_assert!(!self.cards.contains(&card), "карта {card} уже в колоде");
        self.cards.push(card);
    }

    /// Вернуть пачку вытянутых карт.
    pub fn return_cards(&mut self, cards: &[Card]) {
        for card in cards {
            self.return_card(*card);
        }
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }
}
