use std::sync::Arc;

use crate::domain::repositories::{GameRepository, RepositoryError};
use crate::domain::services::{process_play_action, settle_game, GameError};
use crate::domain::value_objects::{CardPattern, GameState, PlayAction, Settlement};

/// Play cards input
pub struct PlayCardsInput {
    pub game_id: String,
    pub seat: u8,
    pub action: PlayAction,
}

/// Play cards output
#[derive(Debug)]
pub struct PlayCardsOutput {
    pub state: GameState,
    /// Recognized pattern, `None` for a pass
    pub pattern: Option<CardPattern>,
    pub remaining_cards: usize,
    pub game_finished: bool,
    pub settlement: Option<Settlement>,
}

/// Play cards use case
pub struct PlayCards<R: GameRepository + ?Sized> {
    game_repo: Arc<R>,
}

impl<R: GameRepository + ?Sized> PlayCards<R> {
    pub fn new(game_repo: Arc<R>) -> Self {
        Self { game_repo }
    }

    pub async fn execute(&self, input: PlayCardsInput) -> Result<PlayCardsOutput, PlayCardsError> {
        let state = self
            .game_repo
            .get(&input.game_id)
            .await?
            .ok_or(PlayCardsError::GameNotFound)?;

        let is_pass = matches!(input.action, PlayAction::Pass);
        let next = process_play_action(&state, input.seat, input.action)?;
        self.game_repo.put(&next).await?;

        let pattern = if is_pass {
            None
        } else {
            next.last_played_pattern.clone()
        };
        let remaining_cards = next.get_hand(input.seat).len();
        let settlement = settle_game(&next);

        tracing::debug!(
            game_id = %input.game_id,
            seat = input.seat,
            pattern = pattern.as_ref().map(|p| p.pattern_type.as_str()).unwrap_or("pass"),
            remaining_cards,
            "Play accepted"
        );

        Ok(PlayCardsOutput {
            game_finished: next.is_finished(),
            state: next,
            pattern,
            remaining_cards,
            settlement,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PlayCardsError {
    #[error("Game not found")]
    GameNotFound,
    #[error("Game error: {0}")]
    Game(#[from] GameError),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
