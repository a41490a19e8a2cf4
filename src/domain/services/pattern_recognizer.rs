//! Pattern recognition - classify a set of cards into a hand shape
//!
//! Pure function over the multiset of rank group sizes and rank adjacency.
//! Checks run in a fixed precedence; the first match wins.

use smallvec::SmallVec;

use crate::domain::value_objects::{Card, CardPattern, PatternType, Rank};

/// Highest value allowed inside a chain (straights, pairs, airplanes);
/// 2s and jokers are excluded.
const CHAIN_LIMIT: u8 = Rank::Two.value();

const MIN_STRAIGHT: usize = 5;
const MIN_PAIR_CHAIN: usize = 3;
const MIN_AIRPLANE: usize = 2;

/// Cards of one rank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankGroup {
    pub value: u8,
    pub count: u8,
}

/// Group cards by rank value, ascending
pub fn group_by_rank(cards: &[Card]) -> SmallVec<[RankGroup; 16]> {
    let mut counts = [0u8; 18];
    for card in cards {
        counts[card.value() as usize] += 1;
    }
    counts
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .map(|(value, &count)| RankGroup {
            value: value as u8,
            count,
        })
        .collect()
}

/// Values strictly consecutive and below the chain limit
fn is_chain(values: &[u8]) -> bool {
    values.windows(2).all(|w| w[1] == w[0] + 1)
        && values.last().map_or(false, |&v| v < CHAIN_LIMIT)
}

/// Classify `cards`. `None` means the set is not a legal shape.
pub fn recognize_pattern(cards: &[Card]) -> Option<CardPattern> {
    let n = cards.len();
    if n == 0 {
        return None;
    }

    let groups = group_by_rank(cards);
    let make = |pattern_type, value, length: usize| {
        Some(CardPattern::new(pattern_type, value, length as u8, cards))
    };

    // Rocket
    if n == 2 && cards.contains(&Card::SMALL_JOKER) && cards.contains(&Card::BIG_JOKER) {
        return make(PatternType::Rocket, Rank::BigJoker.value(), 2);
    }

    // Bomb
    if n == 4 && groups.len() == 1 {
        return make(PatternType::Bomb, groups[0].value, 4);
    }

    match (n, groups.len()) {
        (1, 1) => return make(PatternType::Single, groups[0].value, 1),
        (2, 1) => return make(PatternType::Pair, groups[0].value, 2),
        (3, 1) => return make(PatternType::Trio, groups[0].value, 3),
        _ => {}
    }

    // Trio with a kicker
    if groups.len() == 2 {
        let trio = groups.iter().find(|g| g.count == 3);
        let other = groups.iter().find(|g| g.count != 3);
        if let (Some(trio), Some(other)) = (trio, other) {
            match other.count {
                1 => return make(PatternType::TrioSingle, trio.value, 4),
                2 => return make(PatternType::TrioPair, trio.value, 5),
                _ => {}
            }
        }
    }

    let values: SmallVec<[u8; 16]> = groups.iter().map(|g| g.value).collect();

    // Straight
    if n >= MIN_STRAIGHT && groups.iter().all(|g| g.count == 1) && is_chain(&values) {
        return make(PatternType::Straight, values[0], n);
    }

    // Consecutive pairs
    if n >= MIN_PAIR_CHAIN * 2
        && n % 2 == 0
        && groups.iter().all(|g| g.count == 2)
        && is_chain(&values)
    {
        return make(PatternType::ConsecutivePairs, values[0], groups.len());
    }

    // Airplane family
    let trios: SmallVec<[u8; 8]> = groups
        .iter()
        .filter(|g| g.count == 3)
        .map(|g| g.value)
        .collect();
    if trios.len() >= MIN_AIRPLANE && is_chain(&trios) {
        let trio_count = trios.len();
        let wings: SmallVec<[RankGroup; 16]> =
            groups.iter().filter(|g| g.count != 3).copied().collect();
        let wing_cards = n - trio_count * 3;

        if wing_cards == 0 {
            return make(PatternType::Airplane, trios[0], trio_count);
        }
        if wing_cards == trio_count && wings.iter().all(|g| g.count == 1) {
            return make(PatternType::AirplaneSingles, trios[0], trio_count);
        }
        if wing_cards == trio_count * 2 && wings.iter().all(|g| g.count == 2) {
            return make(PatternType::AirplanePairs, trios[0], trio_count);
        }
        return None;
    }

    // Four with two
    if groups.len() == 3 {
        if let Some(quad) = groups.iter().find(|g| g.count == 4) {
            let kickers = groups.iter().filter(|g| g.count != 4);
            if n == 6 && kickers.clone().all(|g| g.count == 1) {
                return make(PatternType::QuadDual, quad.value, 6);
            }
            if n == 8 && kickers.clone().all(|g| g.count == 2) {
                return make(PatternType::QuadDualPair, quad.value, 8);
            }
        }
    }

    None
}
