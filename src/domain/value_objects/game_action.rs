use serde::{Deserialize, Serialize};

use super::{Card, PatternType};

/// Bidding-phase action submitted by the current bidder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BidAction {
    Bid { amount: u8 },
    Pass,
}

/// Playing-phase action submitted by the current player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlayAction {
    Play { cards: Vec<Card> },
    Pass,
}

impl PlayAction {
    pub fn play(cards: &[Card]) -> Self {
        PlayAction::Play {
            cards: cards.to_vec(),
        }
    }
}

/// Kind of an applied action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Bid,
    Pass,
    Play,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Bid => "bid",
            ActionType::Pass => "pass",
            ActionType::Play => "play",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "bid" => Some(ActionType::Bid),
            "pass" => Some(ActionType::Pass),
            "play" => Some(ActionType::Play),
            _ => None,
        }
    }
}

/// Audit record of an accepted action. History is append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameActionRecord {
    pub round_number: u32,
    pub player_position: u8,
    pub action_type: ActionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<Card>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<PatternType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid_amount: Option<u8>,
    pub timestamp: i64,
}

impl GameActionRecord {
    pub fn bid(round_number: u32, seat: u8, amount: u8) -> Self {
        Self {
            round_number,
            player_position: seat,
            action_type: ActionType::Bid,
            cards: None,
            card_type: None,
            bid_amount: Some(amount),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn pass(round_number: u32, seat: u8) -> Self {
        Self {
            round_number,
            player_position: seat,
            action_type: ActionType::Pass,
            cards: None,
            card_type: None,
            bid_amount: None,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn play(round_number: u32, seat: u8, cards: &[Card], card_type: PatternType) -> Self {
        Self {
            round_number,
            player_position: seat,
            action_type: ActionType::Play,
            cards: Some(cards.to_vec()),
            card_type: Some(card_type),
            bid_amount: None,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Rank, Suit};

    #[test]
    fn test_action_wire_format() {
        let bid: BidAction = serde_json::from_str(r#"{"type":"bid","amount":2}"#).unwrap();
        assert_eq!(bid, BidAction::Bid { amount: 2 });
        let pass: BidAction = serde_json::from_str(r#"{"type":"pass"}"#).unwrap();
        assert_eq!(pass, BidAction::Pass);

        let play: PlayAction = serde_json::from_str(r#"{"type":"play","cards":["♠3","BJ"]}"#).unwrap();
        assert_eq!(
            play,
            PlayAction::Play {
                cards: vec![Card::new(Suit::Spades, Rank::Three), Card::BIG_JOKER]
            }
        );
    }

    #[test]
    fn test_record_omits_empty_fields() {
        let record = GameActionRecord::pass(4, 1);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["actionType"], "pass");
        assert_eq!(json["playerPosition"], 1);
        assert!(json.get("cards").is_none());
        assert!(json.get("bidAmount").is_none());
    }
}
