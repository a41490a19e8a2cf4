use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::repositories::{GameRepository, RepositoryError};
use crate::domain::value_objects::GameState;

/// GameRepository over serialized JSON snapshots.
///
/// Stores each game as an opaque blob, the way an external key/value cache
/// would; every read deserializes a fresh copy.
#[derive(Default)]
pub struct SnapshotGameRepository {
    blobs: RwLock<HashMap<String, String>>,
}

impl SnapshotGameRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw snapshot for a game
    pub async fn snapshot(&self, game_id: &str) -> Option<String> {
        self.blobs.read().await.get(game_id).cloned()
    }

    /// Store a raw snapshot as-is
    pub async fn restore(&self, game_id: &str, blob: String) {
        self.blobs.write().await.insert(game_id.to_string(), blob);
    }
}

#[async_trait]
impl GameRepository for SnapshotGameRepository {
    async fn get(&self, game_id: &str) -> Result<Option<GameState>, RepositoryError> {
        let blobs = self.blobs.read().await;
        match blobs.get(game_id) {
            Some(blob) => Ok(Some(GameState::from_json(blob)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, state: &GameState) -> Result<(), RepositoryError> {
        let blob = state.to_json()?;
        self.blobs.write().await.insert(state.id.clone(), blob);
        Ok(())
    }

    async fn remove(&self, game_id: &str) -> Result<Option<GameState>, RepositoryError> {
        let blob = self.blobs.write().await.remove(game_id);
        match blob {
            Some(blob) => Ok(Some(GameState::from_json(&blob)?)),
            None => Ok(None),
        }
    }

    async fn list_ids(&self) -> Result<Vec<String>, RepositoryError> {
        let mut ids: Vec<String> = self.blobs.read().await.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::{create_game, process_bid_action};
    use crate::domain::value_objects::BidAction;

    #[tokio::test]
    async fn test_snapshot_round_trip() {
        let repo = SnapshotGameRepository::new();
        let state = create_game(["a".into(), "b".into(), "c".into()], Some(11));
        let state = process_bid_action(&state, 0, BidAction::Bid { amount: 2 }).unwrap();

        repo.put(&state).await.unwrap();
        let blob = repo.snapshot(&state.id).await.unwrap();
        assert!(blob.contains("\"phase\":\"bidding\""));
        assert_eq!(repo.get(&state.id).await.unwrap(), Some(state));
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_serialization_error() {
        let repo = SnapshotGameRepository::new();
        repo.restore("broken", "{not json".to_string()).await;

        let err = repo.get("broken").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Serialization(_)));
    }
}
