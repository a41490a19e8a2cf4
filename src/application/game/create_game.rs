use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::repositories::{GameRepository, RepositoryError};
use crate::domain::services::create_game;
use crate::domain::value_objects::GameState;

/// Create game input
pub struct CreateGameInput {
    /// Player identifier per seat
    pub players: [String; 3],
    /// Reproducible deal when set
    pub seed: Option<u64>,
}

/// Create game output
#[derive(Debug)]
pub struct CreateGameOutput {
    pub game_id: String,
    pub state: GameState,
}

/// Create game use case
pub struct CreateGame<R: GameRepository + ?Sized> {
    game_repo: Arc<R>,
}

impl<R: GameRepository + ?Sized> CreateGame<R> {
    pub fn new(game_repo: Arc<R>) -> Self {
        Self { game_repo }
    }

    pub async fn execute(&self, input: CreateGameInput) -> Result<CreateGameOutput, CreateGameError> {
        if input.players.iter().any(|p| p.trim().is_empty()) {
            return Err(CreateGameError::EmptyPlayerId);
        }
        let unique: HashSet<&str> = input.players.iter().map(String::as_str).collect();
        if unique.len() != input.players.len() {
            return Err(CreateGameError::DuplicatePlayer);
        }

        let state = create_game(input.players, input.seed);
        self.game_repo.put(&state).await?;

        tracing::info!(game_id = %state.id, players = ?state.players, "Game created");

        Ok(CreateGameOutput {
            game_id: state.id.clone(),
            state,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CreateGameError {
    #[error("Player id cannot be empty")]
    EmptyPlayerId,
    #[error("A player cannot take two seats")]
    DuplicatePlayer,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
