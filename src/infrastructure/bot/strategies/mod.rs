//! Bot strategies module
//!
//! Contains the bot difficulty strategies for the game.

mod easy_bot;
mod hard_bot;

pub use easy_bot::*;
pub use hard_bot::*;

use crate::domain::value_objects::{BidAction, PlayAction, PublicGameState, MAX_BID};

/// Bot strategy trait. Strategies only ever see the seat's public view.
pub trait BotStrategy: Send + Sync {
    /// Decide a bid or pass during the auction
    fn decide_bid(&self, view: &PublicGameState) -> BidAction;

    /// Select cards to play, or pass
    fn select_play(&self, view: &PublicGameState) -> PlayAction;
}

/// Lowest bid above the current one, `None` when the auction is maxed
pub(crate) fn next_bid(view: &PublicGameState) -> Option<u8> {
    let amount = view.highest_bid + 1;
    (amount <= MAX_BID).then_some(amount)
}
