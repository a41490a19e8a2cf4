mod card;
mod card_pattern;
mod game_action;
mod game_state;
mod public_game_state;

pub use card::*;
pub use card_pattern::*;
pub use game_action::*;
pub use game_state::*;
pub use public_game_state::*;
