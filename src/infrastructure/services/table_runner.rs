//! Table runner - drives one game from deal to settlement
//!
//! Asks only the seat the engine names, under a deadline. Rejected or late
//! decisions fall back to a conservative legal action so a table never
//! stalls on one seat.

use std::sync::Arc;

use crate::application::game::{
    CreateGame, CreateGameError, CreateGameInput, GetGameState, GetGameStateError,
    GetGameStateInput, PlaceBid, PlaceBidError, PlaceBidInput, PlayCards, PlayCardsError,
    PlayCardsInput,
};
use crate::domain::repositories::{GameRepository, RepositoryError};
use crate::domain::services::settle_game;
use crate::domain::value_objects::{
    BidAction, GamePhase, GameState, PlayAction, PublicGameState, Settlement,
};
use crate::infrastructure::app_state::{AppState, GameEvent};
use crate::infrastructure::bot::hand_analyzer::lowest_single;
use crate::infrastructure::bot::provider::{DecisionError, DecisionProvider};

/// Providers by seat
pub type SeatProviders = [Arc<dyn DecisionProvider>; 3];

/// Result of a completed game
#[derive(Debug, Clone)]
pub struct GameOutcome {
    pub game_id: String,
    pub state: GameState,
    pub settlement: Option<Settlement>,
    /// Accepted actions, fallbacks included
    pub actions: u32,
    pub fallbacks: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Game not found: {0}")]
    GameNotFound(String),
    #[error("Create failed: {0}")]
    Create(#[from] CreateGameError),
    #[error("Bid failed: {0}")]
    Bid(#[from] PlaceBidError),
    #[error("Play failed: {0}")]
    Play(#[from] PlayCardsError),
    #[error("State read failed: {0}")]
    View(#[from] GetGameStateError),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Game {game_id} did not finish within {limit} iterations")]
    IterationLimit { game_id: String, limit: u32 },
}

/// Outcome of one turn
struct TurnResult {
    fallback: bool,
    finished: bool,
}

pub struct TableRunner {
    state: AppState,
}

impl TableRunner {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    fn repo(&self) -> Arc<dyn GameRepository> {
        self.state.game_repo.clone()
    }

    /// Deal a game for the given players and play it out
    pub async fn run_new_game(
        &self,
        players: [String; 3],
        seed: Option<u64>,
        providers: SeatProviders,
    ) -> Result<GameOutcome, TableError> {
        let created = CreateGame::new(self.repo())
            .execute(CreateGameInput { players, seed })
            .await?;

        self.state.broadcast_event(
            GameEvent::new("gameStarted", &created.game_id, None).with_data(serde_json::json!({
                "players": created.state.players,
            })),
        );

        self.run_game(&created.game_id, providers).await
    }

    /// Play a stored game until it finishes, then evict it from the store
    pub async fn run_game(
        &self,
        game_id: &str,
        providers: SeatProviders,
    ) -> Result<GameOutcome, TableError> {
        let max_iterations = self.state.config.max_table_iterations;
        let mut actions = 0;
        let mut fallbacks = 0;

        for _ in 0..max_iterations {
            let game = self
                .state
                .game_repo
                .get(game_id)
                .await?
                .ok_or_else(|| TableError::GameNotFound(game_id.to_string()))?;

            let seat = match game.seat_to_act() {
                Some(seat) => seat,
                None => return self.finish(game, actions, fallbacks).await,
            };
            let provider = providers[seat as usize].as_ref();

            let turn = match game.phase {
                GamePhase::Bidding => self.bid_turn(game_id, seat, provider).await?,
                GamePhase::Playing => self.play_turn(game_id, seat, provider).await?,
                GamePhase::Finished => return self.finish(game, actions, fallbacks).await,
            };

            actions += 1;
            if turn.fallback {
                fallbacks += 1;
            }

            if turn.finished {
                let game = self
                    .state
                    .game_repo
                    .get(game_id)
                    .await?
                    .ok_or_else(|| TableError::GameNotFound(game_id.to_string()))?;
                return self.finish(game, actions, fallbacks).await;
            }
        }

        tracing::warn!("Table hit max iterations for game {}", game_id);
        Err(TableError::IterationLimit {
            game_id: game_id.to_string(),
            limit: max_iterations,
        })
    }

    async fn view(&self, game_id: &str, seat: u8) -> Result<PublicGameState, TableError> {
        let output = GetGameState::new(self.repo())
            .execute(GetGameStateInput {
                game_id: game_id.to_string(),
                seat,
            })
            .await?;
        Ok(output.view)
    }

    /// Await a decision under the configured deadline
    async fn ask<T, F>(&self, decision: F) -> Result<T, DecisionError>
    where
        F: std::future::Future<Output = Result<T, DecisionError>>,
    {
        let deadline = self.state.config.decision_timeout;
        tokio::time::timeout(deadline, decision)
            .await
            .unwrap_or(Err(DecisionError::Timeout(deadline)))
    }

    async fn bid_turn(
        &self,
        game_id: &str,
        seat: u8,
        provider: &dyn DecisionProvider,
    ) -> Result<TurnResult, TableError> {
        let attempts = self.state.config.max_decision_retries + 1;

        for attempt in 1..=attempts {
            let view = self.view(game_id, seat).await?;
            let action = match self.ask(provider.decide_bid(&view)).await {
                Ok(action) => action,
                Err(DecisionError::InvalidDecision(reason)) => {
                    tracing::warn!("{} sent an invalid bid (attempt {}): {}", provider.name(), attempt, reason);
                    continue;
                }
                Err(e) => {
                    tracing::warn!("No bid from {}: {}", provider.name(), e);
                    break;
                }
            };

            match self.submit_bid(game_id, seat, action, provider, false).await {
                Ok(()) => {
                    return Ok(TurnResult {
                        fallback: false,
                        finished: false,
                    })
                }
                Err(PlaceBidError::Game(e)) => {
                    tracing::warn!("Bid from {} rejected (attempt {}): {}", provider.name(), attempt, e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::warn!("Falling back to pass for {} in game {}", provider.name(), game_id);
        self.submit_bid(game_id, seat, BidAction::Pass, provider, true)
            .await?;
        Ok(TurnResult {
            fallback: true,
            finished: false,
        })
    }

    async fn submit_bid(
        &self,
        game_id: &str,
        seat: u8,
        action: BidAction,
        provider: &dyn DecisionProvider,
        fallback: bool,
    ) -> Result<(), PlaceBidError> {
        let output = PlaceBid::new(self.repo())
            .execute(PlaceBidInput {
                game_id: game_id.to_string(),
                seat,
                action,
            })
            .await?;

        let event = match action {
            BidAction::Bid { amount } => GameEvent::new("gameUpdate", game_id, Some(seat))
                .with_action("bid")
                .with_data(serde_json::json!({
                    "amount": amount,
                    "isBot": provider.is_bot(),
                    "fallback": fallback,
                })),
            BidAction::Pass => GameEvent::new("gameUpdate", game_id, Some(seat))
                .with_action("pass")
                .with_data(serde_json::json!({
                    "isBot": provider.is_bot(),
                    "fallback": fallback,
                })),
        };
        self.state.broadcast_event(event);

        if output.landlord_decided {
            let state = &output.state;
            tracing::info!(
                "Game {}: seat {:?} is landlord at bid {}",
                game_id,
                state.landlord_position,
                state.highest_bid
            );
            self.state.broadcast_event(
                GameEvent::new("landlordDecided", game_id, state.landlord_position).with_data(
                    serde_json::json!({
                        "highestBid": state.highest_bid,
                        "landlordCards": state.landlord_cards,
                    }),
                ),
            );
        }
        Ok(())
    }

    async fn play_turn(
        &self,
        game_id: &str,
        seat: u8,
        provider: &dyn DecisionProvider,
    ) -> Result<TurnResult, TableError> {
        let attempts = self.state.config.max_decision_retries + 1;
        let mut view = self.view(game_id, seat).await?;

        for attempt in 1..=attempts {
            let action = match self.ask(provider.decide_play(&view)).await {
                Ok(action) => action,
                Err(DecisionError::InvalidDecision(reason)) => {
                    tracing::warn!("{} sent an invalid play (attempt {}): {}", provider.name(), attempt, reason);
                    continue;
                }
                Err(e) => {
                    tracing::warn!("No play from {}: {}", provider.name(), e);
                    break;
                }
            };

            match self.submit_play(game_id, seat, action, provider, false).await {
                Ok(finished) => {
                    return Ok(TurnResult {
                        fallback: false,
                        finished,
                    })
                }
                Err(PlayCardsError::Game(e)) => {
                    tracing::warn!("Play from {} rejected (attempt {}): {}", provider.name(), attempt, e);
                    view = self.view(game_id, seat).await?;
                }
                Err(e) => return Err(e.into()),
            }
        }

        let action = fallback_play(&view);
        tracing::warn!(
            "Falling back to {:?} for {} in game {}",
            action,
            provider.name(),
            game_id
        );
        let finished = self.submit_play(game_id, seat, action, provider, true).await?;
        Ok(TurnResult {
            fallback: true,
            finished,
        })
    }

    /// Returns whether the play ended the game
    async fn submit_play(
        &self,
        game_id: &str,
        seat: u8,
        action: PlayAction,
        provider: &dyn DecisionProvider,
        fallback: bool,
    ) -> Result<bool, PlayCardsError> {
        let output = PlayCards::new(self.repo())
            .execute(PlayCardsInput {
                game_id: game_id.to_string(),
                seat,
                action,
            })
            .await?;

        let event = match &output.pattern {
            Some(pattern) => GameEvent::new("gameUpdate", game_id, Some(seat))
                .with_action("play")
                .with_data(serde_json::json!({
                    "cards": pattern.cards,
                    "pattern": pattern.pattern_type,
                    "remainingCards": output.remaining_cards,
                    "isBot": provider.is_bot(),
                    "fallback": fallback,
                })),
            None => GameEvent::new("gameUpdate", game_id, Some(seat))
                .with_action("pass")
                .with_data(serde_json::json!({
                    "isBot": provider.is_bot(),
                    "fallback": fallback,
                })),
        };
        self.state.broadcast_event(event);
        Ok(output.game_finished)
    }

    /// Settle, announce and evict a finished game
    async fn finish(
        &self,
        state: GameState,
        actions: u32,
        fallbacks: u32,
    ) -> Result<GameOutcome, TableError> {
        let settlement = settle_game(&state);

        tracing::info!(
            "Game {} finished: seat {:?} wins for the {} after {} actions",
            state.id,
            state.winner,
            state.winner_type.map(|w| w.as_str()).unwrap_or("unknown"),
            actions
        );
        self.state.broadcast_event(
            GameEvent::new("gameFinished", &state.id, state.winner).with_data(serde_json::json!({
                "winnerType": state.winner_type,
                "settlement": settlement,
            })),
        );

        self.state.game_repo.remove(&state.id).await?;

        Ok(GameOutcome {
            game_id: state.id.clone(),
            settlement,
            state,
            actions,
            fallbacks,
        })
    }
}

/// Conservative legal action: the lowest single when leading, else pass
pub fn fallback_play(view: &PublicGameState) -> PlayAction {
    if view.pattern_to_beat().is_none() {
        if let Some(card) = lowest_single(&view.my_hand) {
            return PlayAction::play(&[card]);
        }
    }
    PlayAction::Pass
}
