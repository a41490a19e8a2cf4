use std::sync::Arc;

use crate::domain::repositories::{GameRepository, RepositoryError};
use crate::domain::services::{process_bid_action, GameError};
use crate::domain::value_objects::{BidAction, GamePhase, GameState};

/// Place bid input
pub struct PlaceBidInput {
    pub game_id: String,
    pub seat: u8,
    pub action: BidAction,
}

/// Place bid output
#[derive(Debug)]
pub struct PlaceBidOutput {
    pub state: GameState,
    /// Bidding closed with this action
    pub landlord_decided: bool,
}

/// Place bid use case
pub struct PlaceBid<R: GameRepository + ?Sized> {
    game_repo: Arc<R>,
}

impl<R: GameRepository + ?Sized> PlaceBid<R> {
    pub fn new(game_repo: Arc<R>) -> Self {
        Self { game_repo }
    }

    pub async fn execute(&self, input: PlaceBidInput) -> Result<PlaceBidOutput, PlaceBidError> {
        let state = self
            .game_repo
            .get(&input.game_id)
            .await?
            .ok_or(PlaceBidError::GameNotFound)?;

        let next = process_bid_action(&state, input.seat, input.action)?;
        self.game_repo.put(&next).await?;

        tracing::debug!(
            game_id = %input.game_id,
            seat = input.seat,
            action = ?input.action,
            "Bid accepted"
        );

        Ok(PlaceBidOutput {
            landlord_decided: next.phase == GamePhase::Playing,
            state: next,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PlaceBidError {
    #[error("Game not found")]
    GameNotFound,
    #[error("Game error: {0}")]
    Game(#[from] GameError),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
