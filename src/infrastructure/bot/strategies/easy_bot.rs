//! Easy bot strategy
//!
//! Plays the cheapest thing that works and never spends a bomb.

use super::{next_bid, BotStrategy};
use crate::domain::value_objects::{BidAction, PlayAction, PublicGameState};
use crate::infrastructure::bot::hand_analyzer::{
    count_bombs, find_playable_patterns, has_rocket, lowest_single,
};

/// Easy difficulty bot strategy
pub struct EasyBotStrategy;

impl EasyBotStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EasyBotStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl BotStrategy for EasyBotStrategy {
    fn decide_bid(&self, view: &PublicGameState) -> BidAction {
        // Only bids holding a bomb or the rocket
        if has_rocket(&view.my_hand) || count_bombs(&view.my_hand) > 0 {
            if let Some(amount) = next_bid(view) {
                return BidAction::Bid { amount };
            }
        }
        BidAction::Pass
    }

    fn select_play(&self, view: &PublicGameState) -> PlayAction {
        match view.pattern_to_beat() {
            None => match lowest_single(&view.my_hand) {
                Some(card) => PlayAction::play(&[card]),
                None => PlayAction::Pass,
            },
            Some(last) => find_playable_patterns(&view.my_hand, Some(last))
                .into_iter()
                .find(|p| !p.pattern_type.is_bomb_like())
                .map(|p| PlayAction::Play { cards: p.cards })
                .unwrap_or(PlayAction::Pass),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::{create_game, get_public_game_state, process_bid_action, process_play_action};
    use crate::domain::value_objects::parse_cards;

    #[test]
    fn test_easy_bot_passes_weak_bid() {
        let bot = EasyBotStrategy::new();
        let mut state = create_game(["a".into(), "b".into(), "c".into()], Some(8));
        state.hands[0] = parse_cards("♠3 ♥5 ♦9 ♠K").unwrap();
        let view = get_public_game_state(&state, 0).unwrap();
        assert_eq!(bot.decide_bid(&view), BidAction::Pass);

        state.hands[0] = parse_cards("♠3 SJ BJ").unwrap();
        let view = get_public_game_state(&state, 0).unwrap();
        assert_eq!(bot.decide_bid(&view), BidAction::Bid { amount: 1 });
    }

    #[test]
    fn test_easy_bot_plays_cheapest() {
        let bot = EasyBotStrategy::new();
        let state = create_game(["a".into(), "b".into(), "c".into()], Some(8));
        let mut state = process_bid_action(&state, 0, BidAction::Bid { amount: 3 }).unwrap();
        state.hands = [
            parse_cards("♠4 ♠9").unwrap(),
            parse_cards("♠3 ♠8 ♠Q ♠5 ♥5 ♣5 ♦5").unwrap(),
            parse_cards("♥3").unwrap(),
        ];
        for hand in &mut state.hands {
            hand.sort();
        }

        let view = get_public_game_state(&state, 0).unwrap();
        assert_eq!(bot.select_play(&view), PlayAction::play(&parse_cards("♠4").unwrap()));

        let state = process_play_action(&state, 0, PlayAction::play(&parse_cards("♠9").unwrap())).unwrap();
        let view = get_public_game_state(&state, 1).unwrap();
        assert_eq!(bot.select_play(&view), PlayAction::play(&parse_cards("♠Q").unwrap()));

        let state = process_play_action(&state, 1, PlayAction::play(&parse_cards("♠Q").unwrap())).unwrap();
        let view = get_public_game_state(&state, 2).unwrap();
        assert_eq!(bot.select_play(&view), PlayAction::Pass);
    }
}
