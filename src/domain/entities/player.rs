use serde::{Deserialize, Serialize};

/// Who occupies a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Human,
    Bot,
}

impl PlayerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerKind::Human => "human",
            PlayerKind::Bot => "bot",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "human" => Some(PlayerKind::Human),
            "bot" => Some(PlayerKind::Bot),
            _ => None,
        }
    }
}

/// Bot strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotDifficulty {
    Easy,
    Hard,
}

impl Default for BotDifficulty {
    fn default() -> Self {
        BotDifficulty::Hard
    }
}

impl BotDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            BotDifficulty::Easy => "easy",
            BotDifficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(BotDifficulty::Easy),
            "hard" => Some(BotDifficulty::Hard),
            _ => None,
        }
    }
}

/// SeatAssignment entity - a participant bound to a seat at a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatAssignment {
    pub player_id: String,
    pub seat: u8,
    pub kind: PlayerKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<BotDifficulty>,
}

impl SeatAssignment {
    pub fn human(player_id: impl Into<String>, seat: u8) -> Self {
        Self {
            player_id: player_id.into(),
            seat,
            kind: PlayerKind::Human,
            difficulty: None,
        }
    }

    pub fn bot(seat: u8, difficulty: BotDifficulty) -> Self {
        Self {
            player_id: format!("bot-{}-{}", difficulty.as_str(), seat),
            seat,
            kind: PlayerKind::Bot,
            difficulty: Some(difficulty),
        }
    }

    #[inline]
    pub fn is_bot(&self) -> bool {
        self.kind == PlayerKind::Bot
    }
}
