use crate::domain::card::{Card, Rank};
use crate::engine::errors::EngineError;

use super::hand_rank::{HandCategory, HandRank};
use super::lookup_tables::{detect_straight, rank_to_bit, RankMask};

/// Сила руки: 2 карманные карты + ровно 5 карт борда.
pub fn evaluate(hole: &[Card], board: &[Card]) -> Result<HandRank, EngineError> {
    if hole.len() != 2 {
        return Err(EngineError::InvalidCardCount {
            expected: 2,
            actual: hole.len(),
        });
    }
    if board.len() != 5 {
        return Err(EngineError::InvalidCardCount {
            expected: 5,
            actual: board.len(),
        });
    }

    let mut all = [hole[0]; 7];
    all[1] = hole[1];
    all[2..].copy_from_slice(board);
    Ok(best_of_all_5card_combinations(&all))
}

/// Лучшая 5-карточная рука из произвольных 5–7 карт.
pub fn evaluate_best_hand(cards: &[Card]) -> Result<HandRank, EngineError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(EngineError::InvalidCardCount {
            expected: 7,
            actual: cards.len(),
        });
    }
    Ok(best_of_all_5card_combinations(cards))
}

/// Перебираем все комбинации 5 карт из N (N=5–7) и выбираем лучшую.
fn best_of_all_5card_combinations(cards: &[Card]) -> HandRank {
    let n = cards.len();
    let mut best = HandRank(0);

    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        best = best.max(evaluate_5card_hand(&five));
                    }
                }
            }
        }
    }

    best
}

/// Оценка строго 5-карточной комбинации.
pub fn evaluate_5card_hand(cards: &[Card; 5]) -> HandRank {
    let first_suit = cards[0].suit;
    let is_flush = cards.iter().all(|c| c.suit == first_suit);

    let mut rank_counts = [0u8; 15];
    let mut rank_mask: RankMask = 0;
    for card in cards {
        rank_counts[card.rank.value() as usize] += 1;
        rank_mask |= rank_to_bit(card.rank);
    }

    // (count, rank): сначала по количеству, потом по рангу, по убыванию.
    let mut groups: Vec<(u8, Rank)> = Rank::ALL
        .iter()
        .rev()
        .filter_map(|&r| {
            let c = rank_counts[r.value() as usize];
            (c > 0).then_some((c, r))
        })
        .collect();
    groups.sort_by(|a, b| b.cmp(a));

    let ranks: Vec<Rank> = groups.iter().map(|&(_, r)| r).collect();
    let straight_high = detect_straight(rank_mask);

    let category = match (groups[0].0, groups.get(1).map(|g| g.0)) {
        _ if is_flush && straight_high.is_some() => HandCategory::StraightFlush,
        (4, _) => HandCategory::FourOfAKind,
        (3, Some(2)) => HandCategory::FullHouse,
        _ if is_flush => HandCategory::Flush,
        _ if straight_high.is_some() => HandCategory::Straight,
        (3, _) => HandCategory::ThreeOfAKind,
        (2, Some(2)) => HandCategory::TwoPair,
        (2, _) => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    match (category, straight_high) {
        (HandCategory::StraightFlush | HandCategory::Straight, Some(high)) => {
            HandRank::from_category_and_ranks(category, &[high])
        }
        _ => HandRank::from_category_and_ranks(category, &ranks),
    }
}
