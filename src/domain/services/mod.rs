mod deck_service;
mod game_service;
mod pattern_comparator;
mod pattern_recognizer;

pub use deck_service::*;
pub use game_service::*;
pub use pattern_comparator::*;
pub use pattern_recognizer::*;
