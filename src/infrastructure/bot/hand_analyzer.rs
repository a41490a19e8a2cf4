//! HandAnalyzer - candidate plays and hand evaluation for bots and hints
//!
//! Works on sorted hands. Candidates are built per rank bucket and then
//! filtered through the recognizer, so every result is a legal shape.

use std::collections::HashSet;

use smallvec::SmallVec;

use crate::domain::services::{can_beat, recognize_pattern};
use crate::domain::value_objects::{Card, CardPattern, PatternType, Rank};

/// Highest rank value allowed in chains
const CHAIN_LIMIT: u8 = Rank::Two.value();

type Bucket = SmallVec<[Card; 4]>;

/// Cards of the hand bucketed by rank value (index = value)
fn buckets(hand: &[Card]) -> [Bucket; 18] {
    let mut buckets: [Bucket; 18] = Default::default();
    for &card in hand {
        buckets[card.value() as usize].push(card);
    }
    for bucket in &mut buckets {
        bucket.sort();
    }
    buckets
}

/// Lowest `per_rank` cards from each of the `count` cheapest ranks holding at
/// least `per_rank` cards, skipping excluded ranks
fn cheapest_kickers(
    buckets: &[Bucket; 18],
    per_rank: usize,
    count: usize,
    excluded: &[u8],
) -> Option<Vec<Card>> {
    let mut kickers = Vec::with_capacity(per_rank * count);
    let mut ranks = 0;
    for (value, bucket) in buckets.iter().enumerate() {
        if ranks == count {
            break;
        }
        if excluded.contains(&(value as u8)) || bucket.len() < per_rank {
            continue;
        }
        kickers.extend_from_slice(&bucket[..per_rank]);
        ranks += 1;
    }
    (ranks == count).then_some(kickers)
}

/// Runs of consecutive chainable values where each bucket holds `width` cards,
/// as (start, length) for every length in `min_len..=max_len`
fn chains(buckets: &[Bucket; 18], width: usize, min_len: usize, max_len: usize) -> Vec<(u8, usize)> {
    let mut out = Vec::new();
    for start in Rank::Three.value()..CHAIN_LIMIT {
        let mut len = 0;
        while (start as usize + len) < CHAIN_LIMIT as usize
            && buckets[start as usize + len].len() >= width
            && len < max_len
        {
            len += 1;
            if len >= min_len {
                out.push((start, len));
            }
        }
    }
    out
}

fn chain_cards(buckets: &[Bucket; 18], start: u8, len: usize, width: usize) -> Vec<Card> {
    (start as usize..start as usize + len)
        .flat_map(|v| buckets[v][..width].iter().copied())
        .collect()
}

/// Every candidate card set, cheapest first within each shape family
fn candidates(hand: &[Card]) -> Vec<Vec<Card>> {
    let b = buckets(hand);
    let mut out: Vec<Vec<Card>> = Vec::new();

    for (value, bucket) in b.iter().enumerate() {
        let value = value as u8;
        if bucket.is_empty() {
            continue;
        }
        out.push(bucket[..1].to_vec());
        if bucket.len() >= 2 {
            out.push(bucket[..2].to_vec());
        }
        if bucket.len() >= 3 {
            let trio = &bucket[..3];
            out.push(trio.to_vec());
            if let Some(kicker) = cheapest_kickers(&b, 1, 1, &[value]) {
                out.push([trio, &kicker[..]].concat());
            }
            if let Some(kicker) = cheapest_kickers(&b, 2, 1, &[value]) {
                out.push([trio, &kicker[..]].concat());
            }
        }
        if bucket.len() == 4 {
            if let Some(kickers) = cheapest_kickers(&b, 1, 2, &[value]) {
                out.push([&bucket[..], &kickers[..]].concat());
            }
            if let Some(kickers) = cheapest_kickers(&b, 2, 2, &[value]) {
                out.push([&bucket[..], &kickers[..]].concat());
            }
            out.push(bucket.to_vec());
        }
    }

    for (start, len) in chains(&b, 1, 5, 12) {
        out.push(chain_cards(&b, start, len, 1));
    }
    for (start, len) in chains(&b, 2, 3, 10) {
        out.push(chain_cards(&b, start, len, 2));
    }
    for (start, len) in chains(&b, 3, 2, 6) {
        let body = chain_cards(&b, start, len, 3);
        let in_chain: SmallVec<[u8; 8]> = (start..start + len as u8).collect();
        out.push(body.clone());
        if let Some(wings) = cheapest_kickers(&b, 1, len, &in_chain) {
            out.push([&body[..], &wings[..]].concat());
        }
        if let Some(wings) = cheapest_kickers(&b, 2, len, &in_chain) {
            out.push([&body[..], &wings[..]].concat());
        }
    }

    if hand.contains(&Card::SMALL_JOKER) && hand.contains(&Card::BIG_JOKER) {
        out.push(vec![Card::SMALL_JOKER, Card::BIG_JOKER]);
    }

    out
}

/// Legal plays from `hand`, restricted to those beating `incumbent` when
/// one is given. One entry per shape signature; non-bombs first by value,
/// then bombs, then the rocket.
pub fn find_playable_patterns(hand: &[Card], incumbent: Option<&CardPattern>) -> Vec<CardPattern> {
    let mut seen = HashSet::new();
    let mut patterns: Vec<CardPattern> = candidates(hand)
        .into_iter()
        .filter_map(|cards| recognize_pattern(&cards))
        .filter(|pattern| incumbent.map_or(true, |last| can_beat(pattern, last)))
        .filter(|pattern| seen.insert(pattern.signature()))
        .collect();

    patterns.sort_by_key(|p| {
        (
            p.pattern_type.is_bomb_like(),
            p.pattern_type == PatternType::Rocket,
            p.value,
            p.cards.len(),
        )
    });
    patterns
}

/// Lowest card of the hand
#[inline]
pub fn lowest_single(hand: &[Card]) -> Option<Card> {
    hand.iter().min().copied()
}

#[inline]
pub fn has_rocket(hand: &[Card]) -> bool {
    hand.contains(&Card::SMALL_JOKER) && hand.contains(&Card::BIG_JOKER)
}

/// Number of four-of-a-kind ranks held
pub fn count_bombs(hand: &[Card]) -> usize {
    buckets(hand)
        .iter()
        .filter(|bucket| bucket.len() == 4)
        .count()
}

/// Rough control score used for bidding: jokers, twos and bombs
pub fn hand_strength(hand: &[Card]) -> u32 {
    let mut score = 0;
    for card in hand {
        score += match card.rank {
            Rank::BigJoker => 4,
            Rank::SmallJoker => 3,
            Rank::Two => 2,
            Rank::Ace => 1,
            _ => 0,
        };
    }
    score + count_bombs(hand) as u32 * 4
}

/// The whole hand as a single legal play, if it is one
pub fn finishing_play(hand: &[Card]) -> Option<CardPattern> {
    recognize_pattern(hand)
}
