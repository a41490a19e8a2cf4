use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::repositories::{GameRepository, RepositoryError};
use crate::domain::value_objects::GameState;

/// In-process implementation of GameRepository
#[derive(Default)]
pub struct InMemoryGameRepository {
    games: RwLock<HashMap<String, GameState>>,
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn get(&self, game_id: &str) -> Result<Option<GameState>, RepositoryError> {
        Ok(self.games.read().await.get(game_id).cloned())
    }

    async fn put(&self, state: &GameState) -> Result<(), RepositoryError> {
        self.games
            .write()
            .await
            .insert(state.id.clone(), state.clone());
        Ok(())
    }

    async fn remove(&self, game_id: &str) -> Result<Option<GameState>, RepositoryError> {
        Ok(self.games.write().await.remove(game_id))
    }

    async fn list_ids(&self) -> Result<Vec<String>, RepositoryError> {
        let mut ids: Vec<String> = self.games.read().await.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::create_game;

    fn players() -> [String; 3] {
        ["a".into(), "b".into(), "c".into()]
    }

    #[tokio::test]
    async fn test_put_get_remove() {
        let repo = InMemoryGameRepository::new();
        let state = create_game(players(), Some(3));

        assert!(repo.get(&state.id).await.unwrap().is_none());
        repo.put(&state).await.unwrap();
        assert_eq!(repo.get(&state.id).await.unwrap(), Some(state.clone()));
        assert_eq!(repo.len().await, 1);

        assert_eq!(repo.remove(&state.id).await.unwrap(), Some(state.clone()));
        assert!(repo.get(&state.id).await.unwrap().is_none());
        assert_eq!(repo.remove(&state.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_replaces() {
        let repo = InMemoryGameRepository::new();
        let mut state = create_game(players(), Some(3));
        repo.put(&state).await.unwrap();
        state.round_number = 9;
        repo.put(&state).await.unwrap();

        let stored = repo.get(&state.id).await.unwrap().unwrap();
        assert_eq!(stored.round_number, 9);
        assert_eq!(repo.list_ids().await.unwrap(), vec![state.id.clone()]);
    }
}
