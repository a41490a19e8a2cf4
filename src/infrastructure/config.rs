use std::time::Duration;

use crate::domain::entities::BotDifficulty;

/// Which GameRepository backs the tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    Snapshot,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Memory => "memory",
            StoreKind::Snapshot => "snapshot",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Some(StoreKind::Memory),
            "snapshot" => Some(StoreKind::Snapshot),
            _ => None,
        }
    }
}

/// Runtime configuration, read from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub table_count: usize,
    pub decision_timeout: Duration,
    pub max_decision_retries: u32,
    pub max_table_iterations: u32,
    pub event_capacity: usize,
    pub store: StoreKind,
    pub bot_difficulties: [BotDifficulty; 3],
    pub deal_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            table_count: 4,
            decision_timeout: Duration::from_millis(2000),
            max_decision_retries: 2,
            max_table_iterations: 500,
            event_capacity: 1000,
            store: StoreKind::Memory,
            bot_difficulties: [BotDifficulty::Hard, BotDifficulty::Easy, BotDifficulty::Hard],
            deal_seed: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; missing or unparsable values keep defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parse = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        Self {
            table_count: parse("TABLE_COUNT")
                .map(|v| v as usize)
                .unwrap_or(defaults.table_count),
            decision_timeout: parse("DECISION_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.decision_timeout),
            max_decision_retries: parse("MAX_DECISION_RETRIES")
                .map(|v| v as u32)
                .unwrap_or(defaults.max_decision_retries),
            max_table_iterations: parse("MAX_TABLE_ITERATIONS")
                .map(|v| v as u32)
                .unwrap_or(defaults.max_table_iterations),
            event_capacity: parse("EVENT_CAPACITY")
                .filter(|&v| v > 0)
                .map(|v| v as usize)
                .unwrap_or(defaults.event_capacity),
            store: lookup("GAME_STORE")
                .and_then(|v| StoreKind::from_str(&v))
                .unwrap_or(defaults.store),
            bot_difficulties: lookup("BOT_DIFFICULTIES")
                .and_then(|v| parse_difficulties(&v))
                .unwrap_or(defaults.bot_difficulties),
            deal_seed: parse("DEAL_SEED"),
        }
    }
}

/// Three comma-separated difficulties, one per seat
fn parse_difficulties(raw: &str) -> Option<[BotDifficulty; 3]> {
    let parsed: Vec<BotDifficulty> = raw
        .split(',')
        .map(BotDifficulty::from_str)
        .collect::<Option<_>>()?;
    parsed.try_into().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.table_count, 4);
        assert_eq!(config.decision_timeout, Duration::from_secs(2));
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.deal_seed, None);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("TABLE_COUNT", "2"),
            ("DECISION_TIMEOUT_MS", "50"),
            ("GAME_STORE", "snapshot"),
            ("BOT_DIFFICULTIES", "easy, easy ,hard"),
            ("DEAL_SEED", "99"),
        ]);
        assert_eq!(config.table_count, 2);
        assert_eq!(config.decision_timeout, Duration::from_millis(50));
        assert_eq!(config.store, StoreKind::Snapshot);
        assert_eq!(
            config.bot_difficulties,
            [BotDifficulty::Easy, BotDifficulty::Easy, BotDifficulty::Hard]
        );
        assert_eq!(config.deal_seed, Some(99));
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = config(&[
            ("TABLE_COUNT", "many"),
            ("EVENT_CAPACITY", "0"),
            ("GAME_STORE", "redis"),
            ("BOT_DIFFICULTIES", "easy,hard"),
        ]);
        assert_eq!(config.table_count, 4);
        assert_eq!(config.event_capacity, 1000);
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.bot_difficulties, AppConfig::default().bot_difficulties);
    }
}
