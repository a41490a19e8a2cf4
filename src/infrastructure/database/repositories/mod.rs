mod memory_game_repo;
mod snapshot_game_repo;

pub use memory_game_repo::*;
pub use snapshot_game_repo::*;
