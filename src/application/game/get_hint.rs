use std::sync::Arc;

use crate::domain::repositories::{GameRepository, RepositoryError};
use crate::domain::services::{get_public_game_state, GameError};
use crate::domain::value_objects::{CardPattern, GamePhase};
use crate::infrastructure::bot::hand_analyzer;

/// Get hint input
pub struct GetHintInput {
    pub game_id: String,
    pub seat: u8,
}

/// Get hint output
#[derive(Debug)]
pub struct GetHintOutput {
    /// Legal plays, cheapest first
    pub hints: Vec<CardPattern>,
    /// Passing is legal for this seat right now
    pub can_pass: bool,
}

/// Get hint use case
pub struct GetHint<R: GameRepository + ?Sized> {
    game_repo: Arc<R>,
}

impl<R: GameRepository + ?Sized> GetHint<R> {
    pub fn new(game_repo: Arc<R>) -> Self {
        Self { game_repo }
    }

    pub async fn execute(&self, input: GetHintInput) -> Result<GetHintOutput, GetHintError> {
        let state = self
            .game_repo
            .get(&input.game_id)
            .await?
            .ok_or(GetHintError::GameNotFound)?;

        if state.phase != GamePhase::Playing {
            return Err(GameError::WrongPhase {
                expected: GamePhase::Playing,
                actual: state.phase,
            }
            .into());
        }

        let view = get_public_game_state(&state, input.seat)?;
        let incumbent = view.pattern_to_beat();
        let hints = hand_analyzer::find_playable_patterns(&view.my_hand, incumbent);

        Ok(GetHintOutput {
            can_pass: incumbent.is_some(),
            hints,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GetHintError {
    #[error("Game not found")]
    GameNotFound,
    #[error("Game error: {0}")]
    Game(#[from] GameError),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
