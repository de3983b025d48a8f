use crate::domain::card::Rank;

/// Битовая маска рангов.
///
/// Используем 13 бит (от 2 до A):
/// бит 0 = двойка, бит 12 = туз.
pub type RankMask = u16;

/// Маски всех стритов, от wheel (A2345) до broadway (TJQKA).
/// Индекс `i` соответствует стриту со старшей картой `i + 5`.
pub const STRAIGHT_MASKS: [RankMask; 10] = [
    mask_from_values(&[14, 2, 3, 4, 5]),
    mask_from_values(&[2, 3, 4, 5, 6]),
    mask_from_values(&[3, 4, 5, 6, 7]),
    mask_from_values(&[4, 5, 6, 7, 8]),
    mask_from_values(&[5, 6, 7, 8, 9]),
    mask_from_values(&[6, 7, 8, 9, 10]),
    mask_from_values(&[7, 8, 9, 10, 11]),
    mask_from_values(&[8, 9, 10, 11, 12]),
    mask_from_values(&[9, 10, 11, 12, 13]),
    mask_from_values(&[10, 11, 12, 13, 14]),
];

pub fn rank_to_bit(rank: Rank) -> RankMask {
    1u16 << (rank.value() - 2)
}

const fn mask_from_values(values: &[u8]) -> RankMask {
    let mut mask: RankMask = 0;
    let mut i = 0;
    while i < values.len() {
        mask |= 1 << (values[i] - 2);
        i += 1;
    }
    mask
}

/// Найти стрит в битовой маске рангов.
/// Возвращает старшую карту стрита; для wheel (A2345) это пятёрка.
pub fn detect_straight(rank_mask: RankMask) -> Option<Rank> {
    STRAIGHT_MASKS
        .iter()
        .enumerate()
        .rev()
        .find(|(_, sm)| rank_mask & **sm == **sm)
        .and_then(|(i, _)| Rank::from_value(i as u8 + 5))
}
