//! GameState - authoritative state of one Landlord game
//!
//! Owned by the engine. Every accepted action yields a new value; callers
//! never mutate hands directly.

use serde::{Deserialize, Serialize};

use super::{Card, CardPattern, GameActionRecord};

/// Seats at a table
pub const SEAT_COUNT: u8 = 3;
/// Cards dealt to each seat
pub const HAND_SIZE: usize = 17;
/// Hidden cards handed to the landlord
pub const LANDLORD_CARD_COUNT: usize = 3;
/// Cards in a full deck
pub const DECK_SIZE: usize = 54;
/// Highest legal bid; bidding it ends the auction
pub const MAX_BID: u8 = 3;

/// Game phase. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    Bidding,
    Playing,
    Finished,
}

impl Default for GamePhase {
    fn default() -> Self {
        GamePhase::Bidding
    }
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Bidding => "bidding",
            GamePhase::Playing => "playing",
            GamePhase::Finished => "finished",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "bidding" => Some(GamePhase::Bidding),
            "playing" => Some(GamePhase::Playing),
            "finished" => Some(GamePhase::Finished),
            _ => None,
        }
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side that won the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WinnerType {
    Landlord,
    Farmer,
}

impl WinnerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WinnerType::Landlord => "landlord",
            WinnerType::Farmer => "farmer",
        }
    }
}

/// Next seat in turn order
#[inline]
pub fn next_seat(seat: u8) -> u8 {
    (seat + 1) % SEAT_COUNT
}

/// Full game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub id: String,
    pub phase: GamePhase,

    // Player identifiers per seat
    pub players: [String; 3],

    // Hands, each sorted ascending
    pub hands: [Vec<Card>; 3],

    // Hidden pile; kept after the landlord takes it as the revealed record
    pub landlord_cards: Vec<Card>,

    // Bidding cursors
    pub current_bidder: u8,
    pub highest_bid: u8,
    pub highest_bidder: Option<u8>,
    pub pass_count: u8,

    // Play cursors
    pub landlord_position: Option<u8>,
    pub current_player: u8,
    pub last_played_cards: Option<Vec<Card>>,
    pub last_played_pattern: Option<CardPattern>,
    pub last_player: Option<u8>,
    pub consecutive_passes: u8,

    pub round_number: u32,
    pub history: Vec<GameActionRecord>,

    // Bombs and rockets played, doubles the stake each
    pub bomb_count: u8,

    // Terminal data
    pub winner: Option<u8>,
    pub winner_type: Option<WinnerType>,

    pub created_at: i64,
    pub updated_at: i64,
    pub finished_at: Option<i64>,
}

impl GameState {
    /// Create a state in the bidding phase from dealt cards
    pub fn new(players: [String; 3], hands: [Vec<Card>; 3], landlord_cards: Vec<Card>) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        GameState {
            id: uuid::Uuid::new_v4().to_string(),
            phase: GamePhase::Bidding,
            players,
            hands,
            landlord_cards,
            current_bidder: 0,
            highest_bid: 0,
            highest_bidder: None,
            pass_count: 0,
            landlord_position: None,
            current_player: 0,
            last_played_cards: None,
            last_played_pattern: None,
            last_player: None,
            consecutive_passes: 0,
            round_number: 0,
            history: Vec::new(),
            bomb_count: 0,
            winner: None,
            winner_type: None,
            created_at: now,
            updated_at: now,
            finished_at: None,
        }
    }

    /// Get a seat's hand
    #[inline]
    pub fn get_hand(&self, seat: u8) -> &[Card] {
        &self.hands[seat as usize]
    }

    #[inline]
    pub fn hand_counts(&self) -> [usize; 3] {
        [self.hands[0].len(), self.hands[1].len(), self.hands[2].len()]
    }

    #[inline]
    pub fn is_landlord(&self, seat: u8) -> bool {
        self.landlord_position == Some(seat)
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::Finished
    }

    /// Seat whose turn it is in the current phase, `None` once finished
    pub fn seat_to_act(&self) -> Option<u8> {
        match self.phase {
            GamePhase::Bidding => Some(self.current_bidder),
            GamePhase::Playing => Some(self.current_player),
            GamePhase::Finished => None,
        }
    }

    /// True when `seat` would lead a fresh trick if it acted now
    pub fn is_leading(&self, seat: u8) -> bool {
        self.last_played_pattern.is_none() || self.last_player == Some(seat)
    }

    /// Close the current trick
    pub fn clear_trick(&mut self) {
        self.last_played_cards = None;
        self.last_played_pattern = None;
        self.consecutive_passes = 0;
    }

    /// Advance the turn cursor of the current phase
    pub fn advance_turn(&mut self) {
        match self.phase {
            GamePhase::Bidding => self.current_bidder = next_seat(self.current_bidder),
            GamePhase::Playing => self.current_player = next_seat(self.current_player),
            GamePhase::Finished => return,
        }
        self.round_number += 1;
    }

    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().timestamp_millis();
    }

    /// Plays recorded in history, in order
    pub fn played_cards(&self) -> impl Iterator<Item = &Card> {
        self.history
            .iter()
            .filter_map(|record| record.cards.as_deref())
            .flatten()
    }

    /// Every card the state accounts for: hands, the pile while it is still
    /// hidden, and cards already played. Always the full deck.
    pub fn accounted_cards(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.hands.iter().flatten().copied().collect();
        if self.landlord_position.is_none() {
            cards.extend(self.landlord_cards.iter().copied());
        }
        cards.extend(self.played_cards().copied());
        cards
    }

    /// Number of plays (not passes) a seat has made
    pub fn plays_by(&self, seat: u8) -> usize {
        self.history
            .iter()
            .filter(|r| r.player_position == seat && r.cards.is_some())
            .count()
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }
}

/// End-of-game points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub base_bid: u8,
    pub bomb_count: u8,
    pub spring: bool,
    pub multiplier: u32,
    /// Points per seat, summing to zero
    pub scores: [i32; 3],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::deal_with_seed;

    fn sample_state() -> GameState {
        let deal = deal_with_seed(Some(7));
        GameState::new(
            ["a".to_string(), "b".to_string(), "c".to_string()],
            deal.hands,
            deal.landlord_cards,
        )
    }

    #[test]
    fn test_new_game_state() {
        let state = sample_state();
        assert_eq!(state.phase, GamePhase::Bidding);
        assert_eq!(state.current_bidder, 0);
        assert_eq!(state.round_number, 0);
        assert_eq!(state.hand_counts(), [17, 17, 17]);
        assert_eq!(state.seat_to_act(), Some(0));
        assert_eq!(state.accounted_cards().len(), DECK_SIZE);
    }

    #[test]
    fn test_advance_turn_wraps() {
        let mut state = sample_state();
        state.current_bidder = 2;
        state.advance_turn();
        assert_eq!(state.current_bidder, 0);
        assert_eq!(state.round_number, 1);

        state.phase = GamePhase::Finished;
        state.advance_turn();
        assert_eq!(state.round_number, 1);
    }

    #[test]
    fn test_phase_strings() {
        for phase in [GamePhase::Bidding, GamePhase::Playing, GamePhase::Finished] {
            assert_eq!(GamePhase::from_str(phase.as_str()), Some(phase));
        }
        assert_eq!(GamePhase::from_str("lobby"), None);
    }

    #[test]
    fn test_json_round_trip() {
        let state = sample_state();
        let json = state.to_json().unwrap();
        let back = GameState::from_json(&json).unwrap();
        assert_eq!(back, state);
    }
}
