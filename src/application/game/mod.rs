mod create_game;
mod get_game_state;
mod get_hint;
mod place_bid;
mod play_cards;

pub use create_game::*;
pub use get_game_state::*;
pub use get_hint::*;
pub use place_bid::*;
pub use play_cards::*;
