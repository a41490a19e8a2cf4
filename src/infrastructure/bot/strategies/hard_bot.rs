//! Hard bot strategy
//!
//! Rule-based bot: bids on control cards, sheds long cheap shapes, leaves
//! its partner's tricks alone and keeps bombs for when an opponent is about
//! to go out.

use super::{next_bid, BotStrategy};
use crate::domain::value_objects::{
    BidAction, CardPattern, PatternType, PlayAction, PublicGameState, Rank, SEAT_COUNT,
};
use crate::infrastructure::bot::hand_analyzer::{find_playable_patterns, finishing_play, hand_strength};

/// Opponent hand size at which bombs come out
const DANGER_HAND_SIZE: usize = 4;

/// Hard difficulty bot strategy
pub struct HardBotStrategy;

impl HardBotStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Bid level the hand justifies, 0 for pass
    fn target_bid(&self, view: &PublicGameState) -> u8 {
        match hand_strength(&view.my_hand) {
            s if s >= 10 => 3,
            s if s >= 7 => 2,
            s if s >= 5 => 1,
            _ => 0,
        }
    }

    /// Smallest hand held by an opponent
    fn min_opponent_cards(&self, view: &PublicGameState) -> usize {
        (0..SEAT_COUNT)
            .filter(|&seat| seat != view.seat && !view.is_partner(seat))
            .map(|seat| view.hand_counts[seat as usize])
            .min()
            .unwrap_or(usize::MAX)
    }

    fn lead(&self, view: &PublicGameState) -> PlayAction {
        if let Some(all) = finishing_play(&view.my_hand) {
            return PlayAction::Play { cards: all.cards };
        }

        let hints = find_playable_patterns(&view.my_hand, None);
        let sheddable = |p: &&CardPattern| {
            !p.pattern_type.is_bomb_like()
                && !matches!(p.pattern_type, PatternType::QuadDual | PatternType::QuadDualPair)
                && p.value < Rank::Two.value()
        };

        // Longest cheap shape, lowest value on ties
        let choice = hints
            .iter()
            .filter(sheddable)
            .max_by(|a, b| a.cards.len().cmp(&b.cards.len()).then(b.value.cmp(&a.value)))
            .or_else(|| hints.first());

        match choice {
            Some(pattern) => PlayAction::Play {
                cards: pattern.cards.clone(),
            },
            None => PlayAction::Pass,
        }
    }

    fn follow(&self, view: &PublicGameState, last: &CardPattern) -> PlayAction {
        let hints = find_playable_patterns(&view.my_hand, Some(last));

        if let Some(finisher) = hints.iter().find(|p| p.cards.len() == view.my_hand.len()) {
            return PlayAction::Play {
                cards: finisher.cards.clone(),
            };
        }

        if view.last_player.map_or(false, |seat| view.is_partner(seat)) {
            return PlayAction::Pass;
        }

        if let Some(cheapest) = hints.iter().find(|p| !p.pattern_type.is_bomb_like()) {
            return PlayAction::Play {
                cards: cheapest.cards.clone(),
            };
        }

        if self.min_opponent_cards(view) <= DANGER_HAND_SIZE {
            if let Some(bomb) = hints.first() {
                return PlayAction::Play {
                    cards: bomb.cards.clone(),
                };
            }
        }

        PlayAction::Pass
    }
}

impl Default for HardBotStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl BotStrategy for HardBotStrategy {
    fn decide_bid(&self, view: &PublicGameState) -> BidAction {
        let target = self.target_bid(view);
        match next_bid(view) {
            Some(amount) if amount <= target => BidAction::Bid { amount: target },
            _ => BidAction::Pass,
        }
    }

    fn select_play(&self, view: &PublicGameState) -> PlayAction {
        match view.pattern_to_beat() {
            None => self.lead(view),
            Some(last) => self.follow(view, last),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::{create_game, get_public_game_state, process_bid_action, process_play_action};
    use crate::domain::value_objects::{parse_cards, GameState};

    fn with_hands(mut state: GameState, hands: [&str; 3]) -> GameState {
        state.hands = hands.map(|h| {
            let mut cards = parse_cards(h).unwrap();
            cards.sort();
            cards
        });
        state
    }

    /// Seat 0 is landlord and leads
    fn playing(hands: [&str; 3]) -> GameState {
        let state = create_game(["a".into(), "b".into(), "c".into()], Some(5));
        let state = process_bid_action(&state, 0, BidAction::Bid { amount: 3 }).unwrap();
        with_hands(state, hands)
    }

    #[test]
    fn test_bids_on_strength() {
        let bot = HardBotStrategy::new();
        let state = create_game(["a".into(), "b".into(), "c".into()], Some(5));

        let strong = with_hands(state.clone(), ["♠3 ♠2 ♥2 SJ BJ", "♠4", "♠5"]);
        let view = get_public_game_state(&strong, 0).unwrap();
        assert_eq!(bot.decide_bid(&view), BidAction::Bid { amount: 3 });

        let weak = with_hands(state, ["♠3 ♥4 ♦5", "♠4", "♠5"]);
        let view = get_public_game_state(&weak, 0).unwrap();
        assert_eq!(bot.decide_bid(&view), BidAction::Pass);
    }

    #[test]
    fn test_leads_whole_hand_when_legal() {
        let bot = HardBotStrategy::new();
        let state = playing(["♠3 ♥4 ♦5 ♣6 ♠7", "♠9", "♠10"]);
        let view = get_public_game_state(&state, 0).unwrap();
        assert_eq!(
            bot.select_play(&view),
            PlayAction::play(&parse_cards("♠3 ♥4 ♦5 ♣6 ♠7").unwrap())
        );
    }

    #[test]
    fn test_leads_longest_cheap_shape() {
        let bot = HardBotStrategy::new();
        let state = playing(["♠3 ♥4 ♦5 ♣6 ♠7 ♠K ♠2", "♠9", "♠10"]);
        let view = get_public_game_state(&state, 0).unwrap();
        assert_eq!(
            bot.select_play(&view),
            PlayAction::play(&parse_cards("♠3 ♥4 ♦5 ♣6 ♠7").unwrap())
        );
    }

    #[test]
    fn test_does_not_overtake_partner() {
        let bot = HardBotStrategy::new();
        let state = playing(["♠3 ♠4 ♠5", "♠6 ♠9", "♠8 ♠K ♠A"]);
        let state = process_play_action(&state, 0, PlayAction::play(&parse_cards("♠3").unwrap())).unwrap();
        let state = process_play_action(&state, 1, PlayAction::play(&parse_cards("♠6").unwrap())).unwrap();

        // Seat 2 could beat its partner's 6 but holds back
        let view = get_public_game_state(&state, 2).unwrap();
        assert_eq!(bot.select_play(&view), PlayAction::Pass);
    }

    #[test]
    fn test_beats_landlord_cheaply() {
        let bot = HardBotStrategy::new();
        let state = playing(["♠3 ♠4 ♠5", "♠6 ♠9 ♠K", "♠8"]);
        let state = process_play_action(&state, 0, PlayAction::play(&parse_cards("♠5").unwrap())).unwrap();

        let view = get_public_game_state(&state, 1).unwrap();
        assert_eq!(bot.select_play(&view), PlayAction::play(&parse_cards("♠6").unwrap()));
    }

    #[test]
    fn test_bombs_only_under_pressure() {
        let bot = HardBotStrategy::new();
        let bomb = "♠7 ♥7 ♣7 ♦7";

        // Landlord far from going out: keep the bomb
        let state = playing(["♠3 ♠4 ♠5 ♠6 ♠8 ♠9 ♠10 ♠J ♠Q ♠K ♠2", &format!("{bomb} ♠A"), "♥3"]);
        let state = process_play_action(&state, 0, PlayAction::play(&parse_cards("♠2").unwrap())).unwrap();
        let view = get_public_game_state(&state, 1).unwrap();
        assert_eq!(bot.select_play(&view), PlayAction::Pass);

        // Landlord down to a few cards: bomb
        let state = playing(["♠3 ♠4 ♠2", &format!("{bomb} ♠A"), "♥3"]);
        let state = process_play_action(&state, 0, PlayAction::play(&parse_cards("♠2").unwrap())).unwrap();
        let view = get_public_game_state(&state, 1).unwrap();
        assert_eq!(bot.select_play(&view), PlayAction::play(&parse_cards(bomb).unwrap()));
    }
}
