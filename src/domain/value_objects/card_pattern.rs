use serde::{Deserialize, Serialize};

use super::Card;

/// Hand shape of a legal play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    Single,
    Pair,
    Trio,
    TrioSingle,
    TrioPair,
    Straight,
    ConsecutivePairs,
    Airplane,
    AirplaneSingles,
    AirplanePairs,
    QuadDual,
    QuadDualPair,
    Bomb,
    Rocket,
}

impl PatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::Single => "single",
            PatternType::Pair => "pair",
            PatternType::Trio => "trio",
            PatternType::TrioSingle => "trio_single",
            PatternType::TrioPair => "trio_pair",
            PatternType::Straight => "straight",
            PatternType::ConsecutivePairs => "consecutive_pairs",
            PatternType::Airplane => "airplane",
            PatternType::AirplaneSingles => "airplane_singles",
            PatternType::AirplanePairs => "airplane_pairs",
            PatternType::QuadDual => "quad_dual",
            PatternType::QuadDualPair => "quad_dual_pair",
            PatternType::Bomb => "bomb",
            PatternType::Rocket => "rocket",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "single" => Some(PatternType::Single),
            "pair" => Some(PatternType::Pair),
            "trio" => Some(PatternType::Trio),
            "trio_single" => Some(PatternType::TrioSingle),
            "trio_pair" => Some(PatternType::TrioPair),
            "straight" => Some(PatternType::Straight),
            "consecutive_pairs" => Some(PatternType::ConsecutivePairs),
            "airplane" => Some(PatternType::Airplane),
            "airplane_singles" => Some(PatternType::AirplaneSingles),
            "airplane_pairs" => Some(PatternType::AirplanePairs),
            "quad_dual" => Some(PatternType::QuadDual),
            "quad_dual_pair" => Some(PatternType::QuadDualPair),
            "bomb" => Some(PatternType::Bomb),
            "rocket" => Some(PatternType::Rocket),
            _ => None,
        }
    }

    /// Bomb or rocket: may beat any other shape
    #[inline]
    pub fn is_bomb_like(&self) -> bool {
        matches!(self, PatternType::Bomb | PatternType::Rocket)
    }
}

/// A recognized play: shape, comparable strength and shape size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPattern {
    #[serde(rename = "type")]
    pub pattern_type: PatternType,
    /// Rank value of the primary component, 17 for a rocket
    pub value: u8,
    /// Card count for fixed shapes, pair count for consecutive pairs,
    /// trio count for the airplane family
    pub length: u8,
    pub cards: Vec<Card>,
}

impl CardPattern {
    pub fn new(pattern_type: PatternType, value: u8, length: u8, cards: &[Card]) -> Self {
        let mut cards = cards.to_vec();
        cards.sort();
        Self {
            pattern_type,
            value,
            length,
            cards,
        }
    }

    /// Shape identity, ignoring which suits were used
    pub fn signature(&self) -> (PatternType, u8, u8) {
        (self.pattern_type, self.value, self.length)
    }
}
