//! Decision providers - whoever occupies a seat
//!
//! The table runner only talks to seats through `DecisionProvider`. Bots
//! answer from a strategy; humans answer through a channel fed by whatever
//! transport sits in front of the table.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

use crate::domain::entities::{BotDifficulty, SeatAssignment};
use crate::domain::value_objects::{BidAction, PlayAction, PublicGameState};
use crate::infrastructure::bot::strategies::{BotStrategy, EasyBotStrategy, HardBotStrategy};

/// Failure to obtain a decision
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecisionError {
    #[error("Decision timed out after {0:?}")]
    Timeout(Duration),
    #[error("Decision provider unavailable: {0}")]
    Unavailable(String),
    #[error("Invalid decision: {0}")]
    InvalidDecision(String),
}

/// Contract every seat occupant satisfies
#[async_trait]
pub trait DecisionProvider: Send + Sync {
    /// Label used in logs and events
    fn name(&self) -> &str;

    fn is_bot(&self) -> bool;

    async fn decide_bid(&self, view: &PublicGameState) -> Result<BidAction, DecisionError>;

    async fn decide_play(&self, view: &PublicGameState) -> Result<PlayAction, DecisionError>;
}

/// Provider backed by a bot strategy
pub struct BotDecisionProvider<S: BotStrategy> {
    name: String,
    strategy: S,
    think_time: Option<Duration>,
}

impl<S: BotStrategy> BotDecisionProvider<S> {
    pub fn new(name: impl Into<String>, strategy: S) -> Self {
        Self {
            name: name.into(),
            strategy,
            think_time: None,
        }
    }

    /// Pause before answering
    pub fn with_think_time(mut self, think_time: Duration) -> Self {
        self.think_time = Some(think_time);
        self
    }

    async fn think(&self) {
        if let Some(delay) = self.think_time {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl<S: BotStrategy> DecisionProvider for BotDecisionProvider<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_bot(&self) -> bool {
        true
    }

    async fn decide_bid(&self, view: &PublicGameState) -> Result<BidAction, DecisionError> {
        self.think().await;
        Ok(self.strategy.decide_bid(view))
    }

    async fn decide_play(&self, view: &PublicGameState) -> Result<PlayAction, DecisionError> {
        self.think().await;
        Ok(self.strategy.select_play(view))
    }
}

/// Bot provider for a seat at the given difficulty
pub fn bot_provider(seat: u8, difficulty: BotDifficulty) -> Arc<dyn DecisionProvider> {
    let name = SeatAssignment::bot(seat, difficulty).player_id;
    match difficulty {
        BotDifficulty::Easy => Arc::new(BotDecisionProvider::new(name, EasyBotStrategy::new())),
        BotDifficulty::Hard => Arc::new(BotDecisionProvider::new(name, HardBotStrategy::new())),
    }
}

/// Action submitted for a human seat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HumanAction {
    Bid(BidAction),
    Play(PlayAction),
}

/// Sending half handed to the transport layer
pub type HumanActionSender = mpsc::Sender<HumanAction>;

/// Provider that waits for a human's action on a channel.
///
/// A wait dropped by the caller's deadline marks the channel stale; anything
/// queued by then answered a turn that is gone and is discarded on the next
/// wait.
pub struct HumanDecisionProvider {
    name: String,
    actions: Mutex<mpsc::Receiver<HumanAction>>,
    waiting: AtomicBool,
}

impl HumanDecisionProvider {
    /// Create a provider and the sender that feeds it
    pub fn channel(name: impl Into<String>, buffer: usize) -> (HumanActionSender, Self) {
        let (tx, rx) = mpsc::channel(buffer);
        let provider = Self {
            name: name.into(),
            actions: Mutex::new(rx),
            waiting: AtomicBool::new(false),
        };
        (tx, provider)
    }

    async fn next_action(&self) -> Result<HumanAction, DecisionError> {
        let mut actions = self.actions.lock().await;

        if self.waiting.swap(true, Ordering::AcqRel) {
            let mut stale = 0;
            while actions.try_recv().is_ok() {
                stale += 1;
            }
            if stale > 0 {
                tracing::debug!("Discarded {} late action(s) from {}", stale, self.name);
            }
        }

        let action = actions.recv().await;
        self.waiting.store(false, Ordering::Release);
        action.ok_or_else(|| DecisionError::Unavailable(format!("{} disconnected", self.name)))
    }
}

#[async_trait]
impl DecisionProvider for HumanDecisionProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_bot(&self) -> bool {
        false
    }

    async fn decide_bid(&self, _view: &PublicGameState) -> Result<BidAction, DecisionError> {
        match self.next_action().await? {
            HumanAction::Bid(action) => Ok(action),
            HumanAction::Play(_) => Err(DecisionError::InvalidDecision(
                "play submitted during bidding".to_string(),
            )),
        }
    }

    async fn decide_play(&self, _view: &PublicGameState) -> Result<PlayAction, DecisionError> {
        match self.next_action().await? {
            HumanAction::Play(action) => Ok(action),
            HumanAction::Bid(_) => Err(DecisionError::InvalidDecision(
                "bid submitted during play".to_string(),
            )),
        }
    }
}
