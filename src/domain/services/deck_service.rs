//! Deck construction, shuffling, dealing and hand set operations

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::value_objects::{Card, Rank, Suit, DECK_SIZE, HAND_SIZE, LANDLORD_CARD_COUNT};

/// Result of a deal: three hands and the hidden landlord pile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub hands: [Vec<Card>; 3],
    pub landlord_cards: Vec<Card>,
}

/// Build the 54-card deck in a fixed order
pub fn create_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::STANDARD {
        for rank in Rank::STANDARD {
            deck.push(Card::new(suit, rank));
        }
    }
    deck.push(Card::SMALL_JOKER);
    deck.push(Card::BIG_JOKER);
    deck
}

/// Uniformly random permutation of `deck`; the input is left untouched
pub fn shuffle<R: Rng + ?Sized>(deck: &[Card], rng: &mut R) -> Vec<Card> {
    let mut shuffled = deck.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

/// Sort cards ascending by value, suit as tie-break
#[inline]
pub fn sort_cards(cards: &mut [Card]) {
    cards.sort();
}

/// Deal a freshly shuffled deck
pub fn deal<R: Rng + ?Sized>(rng: &mut R) -> Deal {
    let deck = shuffle(&create_deck(), rng);

    let mut hands: [Vec<Card>; 3] = [
        deck[0..HAND_SIZE].to_vec(),
        deck[HAND_SIZE..2 * HAND_SIZE].to_vec(),
        deck[2 * HAND_SIZE..3 * HAND_SIZE].to_vec(),
    ];
    for hand in &mut hands {
        sort_cards(hand);
    }

    Deal {
        hands,
        landlord_cards: deck[DECK_SIZE - LANDLORD_CARD_COUNT..].to_vec(),
    }
}

/// Deal with a reproducible seed, or from entropy when `None`
pub fn deal_with_seed(seed: Option<u64>) -> Deal {
    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };
    deal(&mut rng)
}

/// Multiset containment by card identity
pub fn has_cards(hand: &[Card], subset: &[Card]) -> bool {
    let mut remaining = hand.to_vec();
    for card in subset {
        match remaining.iter().position(|c| c == card) {
            Some(pos) => {
                remaining.swap_remove(pos);
            }
            None => return false,
        }
    }
    true
}

/// Remove one matching card per requested card.
/// Returns `None` when `hand` does not contain `subset`.
pub fn remove_cards(hand: &[Card], subset: &[Card]) -> Option<Vec<Card>> {
    let mut remaining = hand.to_vec();
    for card in subset {
        let pos = remaining.iter().position(|c| c == card)?;
        remaining.remove(pos);
    }
    Some(remaining)
}
