use serde::{Deserialize, Serialize};

use super::{Card, CardPattern, GamePhase, Settlement, WinnerType};

/// Game state as one seat may see it: its own hand in full, other seats as
/// card counts only. This is the only shape sent to a seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicGameState {
    pub game_id: String,
    pub phase: GamePhase,
    /// Viewer's seat
    pub seat: u8,
    pub players: [String; 3],
    pub my_hand: Vec<Card>,
    pub hand_counts: [usize; 3],
    /// Only present once the landlord has taken the pile
    pub landlord_cards: Option<Vec<Card>>,
    pub landlord_position: Option<u8>,

    pub current_bidder: u8,
    pub highest_bid: u8,
    pub highest_bidder: Option<u8>,

    pub current_player: u8,
    pub last_played_cards: Option<Vec<Card>>,
    pub last_played_pattern: Option<CardPattern>,
    pub last_player: Option<u8>,
    pub consecutive_passes: u8,
    pub round_number: u32,
    pub bomb_count: u8,

    /// Viewer is to act and may lead freely
    pub is_leading: bool,

    pub winner: Option<u8>,
    pub winner_type: Option<WinnerType>,
    pub settlement: Option<Settlement>,
}

impl PublicGameState {
    /// Whether the viewer is the seat expected to act
    pub fn is_my_turn(&self) -> bool {
        match self.phase {
            GamePhase::Bidding => self.current_bidder == self.seat,
            GamePhase::Playing => self.current_player == self.seat,
            GamePhase::Finished => false,
        }
    }

    /// Pattern the viewer has to beat, `None` when leading
    pub fn pattern_to_beat(&self) -> Option<&CardPattern> {
        if self.is_leading {
            None
        } else {
            self.last_played_pattern.as_ref()
        }
    }

    #[inline]
    pub fn is_landlord(&self) -> bool {
        self.landlord_position == Some(self.seat)
    }

    /// Whether `seat` plays on the viewer's side
    pub fn is_partner(&self, seat: u8) -> bool {
        match self.landlord_position {
            Some(landlord) => seat != self.seat && seat != landlord && self.seat != landlord,
            None => false,
        }
    }
}
