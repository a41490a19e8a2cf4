use futures::future::join_all;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use landlord_backend::infrastructure::app_state::AppState;
use landlord_backend::infrastructure::bot::provider::bot_provider;
use landlord_backend::infrastructure::config::AppConfig;
use landlord_backend::infrastructure::services::{SeatProviders, TableRunner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "landlord_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    tracing::info!(?config, "Starting Landlord tables");

    let state = AppState::new(config.clone());

    // Log table events as they happen
    let mut events = state.subscribe();
    let listener = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => tracing::debug!(target: "landlord_backend::events", "{}", json),
                Err(e) => tracing::warn!("Failed to serialize event: {}", e),
            }
        }
    });

    let tables = (0..config.table_count).map(|table| {
        let runner = TableRunner::new(state.clone());
        let difficulties = config.bot_difficulties;
        let seed = config.deal_seed.map(|s| s.wrapping_add(table as u64));

        async move {
            let providers: SeatProviders = [
                bot_provider(0, difficulties[0]),
                bot_provider(1, difficulties[1]),
                bot_provider(2, difficulties[2]),
            ];
            let players = [0u8, 1, 2].map(|seat| providers[seat as usize].name().to_string());
            let result = runner.run_new_game(players, seed, providers).await;
            (table, result)
        }
    });

    let mut failures = 0;
    for (table, result) in join_all(tables).await {
        match result {
            Ok(outcome) => {
                let scores = outcome.settlement.as_ref().map(|s| s.scores);
                tracing::info!(
                    "Table {} finished game {} in {} actions ({} fallbacks), scores {:?}",
                    table,
                    outcome.game_id,
                    outcome.actions,
                    outcome.fallbacks,
                    scores
                );
            }
            Err(e) => {
                failures += 1;
                tracing::error!("Table {} failed: {}", table, e);
            }
        }
    }

    drop(state);
    listener.abort();

    if failures > 0 {
        anyhow::bail!("{} of {} tables failed", failures, config.table_count);
    }
    Ok(())
}
