use std::sync::Arc;

use crate::domain::repositories::{GameRepository, RepositoryError};
use crate::domain::services::{get_public_game_state, GameError};
use crate::domain::value_objects::PublicGameState;

/// Get game state input
pub struct GetGameStateInput {
    pub game_id: String,
    /// Viewer's seat
    pub seat: u8,
}

/// Get game state output
#[derive(Debug)]
pub struct GetGameStateOutput {
    pub view: PublicGameState,
}

/// Get game state use case
pub struct GetGameState<R: GameRepository + ?Sized> {
    game_repo: Arc<R>,
}

impl<R: GameRepository + ?Sized> GetGameState<R> {
    pub fn new(game_repo: Arc<R>) -> Self {
        Self { game_repo }
    }

    pub async fn execute(
        &self,
        input: GetGameStateInput,
    ) -> Result<GetGameStateOutput, GetGameStateError> {
        let state = self
            .game_repo
            .get(&input.game_id)
            .await?
            .ok_or(GetGameStateError::GameNotFound)?;

        let view = get_public_game_state(&state, input.seat)?;

        Ok(GetGameStateOutput { view })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GetGameStateError {
    #[error("Game not found")]
    GameNotFound,
    #[error("Game error: {0}")]
    Game(#[from] GameError),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
