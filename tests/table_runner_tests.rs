//! Table runner integration tests
//!
//! Whole games played by bots, slow seats, misbehaving seats and humans.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use landlord_backend::domain::entities::BotDifficulty;
use landlord_backend::domain::value_objects::{
    BidAction, GamePhase, PlayAction, PublicGameState, DECK_SIZE,
};
use landlord_backend::infrastructure::app_state::AppState;
use landlord_backend::infrastructure::bot::provider::{
    bot_provider, BotDecisionProvider, DecisionError, DecisionProvider, HumanAction,
    HumanDecisionProvider,
};
use landlord_backend::infrastructure::bot::strategies::HardBotStrategy;
use landlord_backend::infrastructure::config::{AppConfig, StoreKind};
use landlord_backend::infrastructure::services::{SeatProviders, TableError, TableRunner};

fn players() -> [String; 3] {
    ["p0".to_string(), "p1".to_string(), "p2".to_string()]
}

fn bots(difficulties: [BotDifficulty; 3]) -> SeatProviders {
    [
        bot_provider(0, difficulties[0]),
        bot_provider(1, difficulties[1]),
        bot_provider(2, difficulties[2]),
    ]
}

fn fast_config() -> AppConfig {
    AppConfig {
        decision_timeout: Duration::from_millis(20),
        max_decision_retries: 1,
        ..AppConfig::default()
    }
}

/// Always answers with something the engine rejects
struct IllegalProvider;

#[async_trait]
impl DecisionProvider for IllegalProvider {
    fn name(&self) -> &str {
        "illegal"
    }

    fn is_bot(&self) -> bool {
        true
    }

    async fn decide_bid(&self, _view: &PublicGameState) -> Result<BidAction, DecisionError> {
        Ok(BidAction::Bid { amount: 9 })
    }

    async fn decide_play(&self, _view: &PublicGameState) -> Result<PlayAction, DecisionError> {
        Ok(PlayAction::Play { cards: Vec::new() })
    }
}

#[tokio::test]
async fn test_bot_games_finish_and_conserve_cards() {
    let combos = [
        [BotDifficulty::Hard, BotDifficulty::Easy, BotDifficulty::Hard],
        [BotDifficulty::Easy, BotDifficulty::Easy, BotDifficulty::Easy],
        [BotDifficulty::Hard, BotDifficulty::Hard, BotDifficulty::Hard],
    ];

    for store in [StoreKind::Memory, StoreKind::Snapshot] {
        for (i, difficulties) in combos.iter().enumerate() {
            for seed in 0..4u64 {
                let config = AppConfig {
                    store,
                    ..AppConfig::default()
                };
                let runner = TableRunner::new(AppState::new(config));
                let outcome = runner
                    .run_new_game(players(), Some(seed * 10 + i as u64), bots(*difficulties))
                    .await
                    .unwrap();

                let state = &outcome.state;
                assert_eq!(state.phase, GamePhase::Finished);
                assert_eq!(outcome.fallbacks, 0);

                let winner = state.winner.unwrap();
                assert!(state.get_hand(winner).is_empty());

                let cards = state.accounted_cards();
                assert_eq!(cards.len(), DECK_SIZE);
                assert_eq!(cards.iter().collect::<HashSet<_>>().len(), DECK_SIZE);

                let settlement = outcome.settlement.unwrap();
                assert_eq!(settlement.scores.iter().sum::<i32>(), 0);
                assert!(settlement.multiplier >= 1);
            }
        }
    }
}

#[tokio::test]
async fn test_events_are_broadcast() {
    let state = AppState::new(AppConfig::default());
    let mut events = state.subscribe();
    let runner = TableRunner::new(state);

    let outcome = runner
        .run_new_game(players(), Some(77), bots([BotDifficulty::Hard; 3]))
        .await
        .unwrap();

    let mut types = Vec::new();
    while let Ok(event) = events.try_recv() {
        assert_eq!(event.game_id, outcome.game_id);
        types.push(event.event_type);
    }

    assert_eq!(types.first().map(String::as_str), Some("gameStarted"));
    assert_eq!(types.last().map(String::as_str), Some("gameFinished"));
    assert_eq!(types.iter().filter(|t| *t == "landlordDecided").count(), 1);
    assert_eq!(
        types.iter().filter(|t| *t == "gameUpdate").count() as u32,
        outcome.actions
    );
}

#[tokio::test]
async fn test_timeouts_fall_back() {
    let runner = TableRunner::new(AppState::new(fast_config()));
    // Thinks far longer than the deadline
    let slow = BotDecisionProvider::new("slow", HardBotStrategy::new())
        .with_think_time(Duration::from_millis(500));
    let providers: SeatProviders = [
        Arc::new(slow),
        bot_provider(1, BotDifficulty::Hard),
        bot_provider(2, BotDifficulty::Hard),
    ];

    let outcome = runner.run_new_game(players(), Some(3), providers).await.unwrap();

    assert_eq!(outcome.state.phase, GamePhase::Finished);
    assert!(outcome.fallbacks > 0);
    // The slow seat's bid never arrived
    let first = &outcome.state.history[0];
    assert_eq!(first.player_position, 0);
    assert_eq!(first.bid_amount, None);
}

#[tokio::test]
async fn test_rejected_decisions_fall_back() {
    let runner = TableRunner::new(AppState::new(fast_config()));
    let providers: SeatProviders = [
        Arc::new(IllegalProvider),
        Arc::new(IllegalProvider),
        Arc::new(IllegalProvider),
    ];

    let outcome = runner.run_new_game(players(), Some(4), providers).await.unwrap();

    // Everyone passes the auction; seat 0 takes it at 1
    assert_eq!(outcome.state.landlord_position, Some(0));
    assert_eq!(outcome.state.highest_bid, 1);
    assert_eq!(outcome.state.phase, GamePhase::Finished);
    assert_eq!(outcome.fallbacks, outcome.actions);
}

#[tokio::test]
async fn test_human_seat_through_channel() {
    let runner = TableRunner::new(AppState::new(fast_config()));
    let (tx, human) = HumanDecisionProvider::channel("alice", 8);
    tx.send(HumanAction::Bid(BidAction::Bid { amount: 3 }))
        .await
        .unwrap();
    // Disconnects after bidding; later turns fall back
    drop(tx);

    let providers: SeatProviders = [
        Arc::new(human),
        bot_provider(1, BotDifficulty::Easy),
        bot_provider(2, BotDifficulty::Easy),
    ];
    let outcome = runner.run_new_game(players(), Some(5), providers).await.unwrap();

    assert_eq!(outcome.state.landlord_position, Some(0));
    assert_eq!(outcome.state.highest_bid, 3);
    assert_eq!(outcome.state.phase, GamePhase::Finished);
}

#[tokio::test]
async fn test_finishing_on_the_last_allowed_iteration() {
    let difficulties = [BotDifficulty::Hard, BotDifficulty::Easy, BotDifficulty::Hard];
    let runner = TableRunner::new(AppState::new(AppConfig::default()));
    let full = runner
        .run_new_game(players(), Some(7), bots(difficulties))
        .await
        .unwrap();

    let config = AppConfig {
        max_table_iterations: full.actions,
        ..AppConfig::default()
    };
    let state = AppState::new(config);
    let mut events = state.subscribe();
    let runner = TableRunner::new(state);

    let outcome = runner
        .run_new_game(players(), Some(7), bots(difficulties))
        .await
        .unwrap();
    assert_eq!(outcome.actions, full.actions);
    assert_eq!(outcome.state.phase, GamePhase::Finished);
    assert_eq!(outcome.settlement, full.settlement);

    let mut last = None;
    while let Ok(event) = events.try_recv() {
        last = Some(event.event_type);
    }
    assert_eq!(last.as_deref(), Some("gameFinished"));
}

#[tokio::test]
async fn test_finished_games_are_evicted() {
    for store in [StoreKind::Memory, StoreKind::Snapshot] {
        let config = AppConfig {
            store,
            ..AppConfig::default()
        };
        let state = AppState::new(config);
        let repo = state.game_repo.clone();
        let runner = TableRunner::new(state);

        let outcome = runner
            .run_new_game(players(), Some(8), bots([BotDifficulty::Easy; 3]))
            .await
            .unwrap();

        assert!(repo.get(&outcome.game_id).await.unwrap().is_none());
        assert!(repo.list_ids().await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_iteration_limit() {
    let config = AppConfig {
        max_table_iterations: 2,
        ..AppConfig::default()
    };
    let runner = TableRunner::new(AppState::new(config));

    let result = runner
        .run_new_game(players(), Some(6), bots([BotDifficulty::Easy; 3]))
        .await;
    assert!(matches!(
        result,
        Err(TableError::IterationLimit { limit: 2, .. })
    ));
}

#[tokio::test]
async fn test_missing_game() {
    let runner = TableRunner::new(AppState::new(AppConfig::default()));
    let result = runner
        .run_game("nope", bots([BotDifficulty::Easy; 3]))
        .await;
    assert!(matches!(result, Err(TableError::GameNotFound(_))));
}
