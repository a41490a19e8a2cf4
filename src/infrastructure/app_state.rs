use std::sync::Arc;

use async_broadcast::{broadcast, InactiveReceiver, Receiver, Sender};

use crate::domain::repositories::GameRepository;
use crate::infrastructure::config::{AppConfig, StoreKind};
use crate::infrastructure::database::repositories::{InMemoryGameRepository, SnapshotGameRepository};

/// Application state shared by every table
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,

    /// Active games
    pub game_repo: Arc<dyn GameRepository>,

    /// Event broadcaster for table listeners
    pub event_sender: Sender<GameEvent>,
    event_receiver: InactiveReceiver<GameEvent>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let game_repo: Arc<dyn GameRepository> = match config.store {
            StoreKind::Memory => Arc::new(InMemoryGameRepository::new()),
            StoreKind::Snapshot => Arc::new(SnapshotGameRepository::new()),
        };
        Self::with_repository(config, game_repo)
    }

    pub fn with_repository(config: AppConfig, game_repo: Arc<dyn GameRepository>) -> Self {
        tracing::info!("Using {} game store", config.store.as_str());

        let (mut event_sender, event_receiver) = broadcast(config.event_capacity);
        // Slow listeners lose the oldest events instead of stalling tables
        event_sender.set_overflow(true);

        Self {
            config: Arc::new(config),
            game_repo,
            event_sender,
            event_receiver: event_receiver.deactivate(),
        }
    }

    /// New listener receiving events broadcast from now on
    pub fn subscribe(&self) -> Receiver<GameEvent> {
        self.event_receiver.activate_cloned()
    }

    /// Broadcast an event to all listeners
    pub fn broadcast_event(&self, event: GameEvent) {
        let receiver_count = self.event_sender.receiver_count();
        tracing::debug!(
            "Broadcasting event '{}' to {} receivers",
            event.event_type,
            receiver_count
        );
        match self.event_sender.try_broadcast(event) {
            Ok(None) => {}
            Ok(Some(_)) => {
                tracing::debug!("Event broadcast with overflow");
            }
            Err(async_broadcast::TrySendError::Inactive(_)) => {
                tracing::trace!("Event dropped, no active receivers");
            }
            Err(e) => {
                tracing::warn!("Failed to broadcast event: {:?}", e);
            }
        }
    }
}

/// Table event for listeners
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub game_id: String,
    pub seat: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Additional data fields (flattened into root)
    #[serde(flatten)]
    pub data: serde_json::Value,
    pub timestamp: i64,
}

impl GameEvent {
    pub fn new(event_type: &str, game_id: &str, seat: Option<u8>) -> Self {
        Self {
            event_type: event_type.to_string(),
            game_id: game_id.to_string(),
            seat,
            action: None,
            data: serde_json::Value::Object(serde_json::Map::new()),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn with_action(mut self, action: &str) -> Self {
        self.action = Some(action.to_string());
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}
