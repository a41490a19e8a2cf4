use async_trait::async_trait;

use crate::domain::value_objects::GameState;

/// Store error
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Active games keyed by game id
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Find game by ID
    async fn get(&self, game_id: &str) -> Result<Option<GameState>, RepositoryError>;

    /// Save game (create or replace)
    async fn put(&self, state: &GameState) -> Result<(), RepositoryError>;

    /// Remove a game, returning it when present
    async fn remove(&self, game_id: &str) -> Result<Option<GameState>, RepositoryError>;

    /// IDs of all stored games
    async fn list_ids(&self) -> Result<Vec<String>, RepositoryError>;
}
