//! Game service - the Landlord turn state machine
//!
//! Every entry point takes the current state by reference and returns a new
//! state. Validation runs before any mutation of the copy, so a failed call
//! leaves nothing behind.

use crate::domain::services::{
    can_beat, deal_with_seed, has_cards, recognize_pattern, remove_cards, sort_cards,
};
use crate::domain::value_objects::{
    BidAction, Card, GameActionRecord, GamePhase, GameState, PatternType, PlayAction,
    PublicGameState, Settlement, WinnerType, MAX_BID, SEAT_COUNT,
};

/// Rule violation raised by the engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Action not allowed in {actual} phase (expected {expected})")]
    WrongPhase {
        expected: GamePhase,
        actual: GamePhase,
    },
    #[error("Seat {seat} acted out of turn (seat {expected} is to act)")]
    NotYourTurn { seat: u8, expected: u8 },
    #[error("Invalid seat {0}")]
    InvalidSeat(u8),
    #[error("Bid amount must be between 1 and 3, got {0}")]
    InvalidBidAmount(u8),
    #[error("Bid {amount} does not exceed current bid {highest}")]
    BidTooLow { amount: u8, highest: u8 },
    #[error("No cards played")]
    EmptyPlay,
    #[error("Cards not in hand")]
    CardsNotInHand,
    #[error("Invalid card combination")]
    InvalidShape,
    #[error("Cards do not beat the last play")]
    CannotBeat,
    #[error("Trick leader cannot pass")]
    CannotPassAsLeader,
    #[error("No bidder recorded")]
    NoBidderFound,
}

fn check_seat(seat: u8) -> Result<(), GameError> {
    if seat < SEAT_COUNT {
        Ok(())
    } else {
        Err(GameError::InvalidSeat(seat))
    }
}

fn expect_phase(state: &GameState, expected: GamePhase) -> Result<(), GameError> {
    if state.phase == expected {
        Ok(())
    } else {
        Err(GameError::WrongPhase {
            expected,
            actual: state.phase,
        })
    }
}

/// Deal a new game in the bidding phase
pub fn create_game(players: [String; 3], seed: Option<u64>) -> GameState {
    let deal = deal_with_seed(seed);
    GameState::new(players, deal.hands, deal.landlord_cards)
}

/// Apply a bidding action from `seat`
pub fn process_bid_action(
    state: &GameState,
    seat: u8,
    action: BidAction,
) -> Result<GameState, GameError> {
    expect_phase(state, GamePhase::Bidding)?;
    check_seat(seat)?;
    if seat != state.current_bidder {
        return Err(GameError::NotYourTurn {
            seat,
            expected: state.current_bidder,
        });
    }

    let mut next = state.clone();

    match action {
        BidAction::Bid { amount } => {
            if !(1..=MAX_BID).contains(&amount) {
                return Err(GameError::InvalidBidAmount(amount));
            }
            if amount <= state.highest_bid {
                return Err(GameError::BidTooLow {
                    amount,
                    highest: state.highest_bid,
                });
            }

            next.highest_bid = amount;
            next.highest_bidder = Some(seat);
            next.pass_count = 0;
            next.history
                .push(GameActionRecord::bid(next.round_number, seat, amount));

            if amount == MAX_BID {
                finalize_landlord(&mut next)?;
                return Ok(next);
            }
        }
        BidAction::Pass => {
            next.pass_count += 1;
            next.history
                .push(GameActionRecord::pass(next.round_number, seat));

            match next.highest_bidder {
                // Nobody bid: seat 0 takes the landlord role at the nominal bid
                None if next.pass_count >= SEAT_COUNT => {
                    next.highest_bidder = Some(0);
                    next.highest_bid = 1;
                    finalize_landlord(&mut next)?;
                    return Ok(next);
                }
                Some(_) if next.pass_count >= SEAT_COUNT - 1 => {
                    finalize_landlord(&mut next)?;
                    return Ok(next);
                }
                _ => {}
            }
        }
    }

    next.advance_turn();
    next.touch();
    Ok(next)
}

/// Hand the pile to the highest bidder and open play
fn finalize_landlord(state: &mut GameState) -> Result<(), GameError> {
    let landlord = state.highest_bidder.ok_or(GameError::NoBidderFound)?;

    state.phase = GamePhase::Playing;
    state.landlord_position = Some(landlord);
    state.current_player = landlord;
    state.clear_trick();
    state.last_player = None;

    let pile = state.landlord_cards.clone();
    let hand = &mut state.hands[landlord as usize];
    hand.extend(pile);
    sort_cards(hand);

    state.touch();
    Ok(())
}

/// Apply a playing action from `seat`
pub fn process_play_action(
    state: &GameState,
    seat: u8,
    action: PlayAction,
) -> Result<GameState, GameError> {
    expect_phase(state, GamePhase::Playing)?;
    check_seat(seat)?;
    if seat != state.current_player {
        return Err(GameError::NotYourTurn {
            seat,
            expected: state.current_player,
        });
    }

    let mut next = state.clone();

    // Both other seats passed since this seat's last play: it leads again.
    // Relies on trick close rewinding current_player to last_player.
    if next.last_player == Some(seat) {
        next.clear_trick();
    }

    match action {
        PlayAction::Play { cards } => {
            if cards.is_empty() {
                return Err(GameError::EmptyPlay);
            }
            let hand = next.get_hand(seat);
            if !has_cards(hand, &cards) {
                return Err(GameError::CardsNotInHand);
            }
            let pattern = recognize_pattern(&cards).ok_or(GameError::InvalidShape)?;
            if let Some(last) = &next.last_played_pattern {
                if !can_beat(&pattern, last) {
                    return Err(GameError::CannotBeat);
                }
            }

            let remaining = remove_cards(hand, &cards).ok_or(GameError::CardsNotInHand)?;
            next.hands[seat as usize] = remaining;

            if pattern.pattern_type.is_bomb_like() {
                next.bomb_count += 1;
            }
            next.history.push(GameActionRecord::play(
                next.round_number,
                seat,
                &cards,
                pattern.pattern_type,
            ));
            next.last_played_cards = Some(cards);
            next.last_played_pattern = Some(pattern);
            next.last_player = Some(seat);
            next.consecutive_passes = 0;

            if next.hands[seat as usize].is_empty() {
                let now = chrono::Utc::now().timestamp_millis();
                next.phase = GamePhase::Finished;
                next.winner = Some(seat);
                next.winner_type = Some(if next.is_landlord(seat) {
                    WinnerType::Landlord
                } else {
                    WinnerType::Farmer
                });
                next.finished_at = Some(now);
                next.updated_at = now;
                return Ok(next);
            }
        }
        PlayAction::Pass => {
            if next.last_played_pattern.is_none() {
                return Err(GameError::CannotPassAsLeader);
            }

            next.consecutive_passes += 1;
            next.history
                .push(GameActionRecord::pass(next.round_number, seat));

            if next.consecutive_passes >= SEAT_COUNT - 1 {
                // Trick closes; the lead returns to the last player
                next.clear_trick();
                if let Some(leader) = next.last_player {
                    next.current_player = leader;
                }
                next.touch();
                return Ok(next);
            }
        }
    }

    next.advance_turn();
    next.touch();
    Ok(next)
}

/// Read a seat's hand
pub fn get_player_hand(state: &GameState, seat: u8) -> Result<&[Card], GameError> {
    check_seat(seat)?;
    Ok(state.get_hand(seat))
}

/// Project the state for one seat, hiding other hands
pub fn get_public_game_state(state: &GameState, for_seat: u8) -> Result<PublicGameState, GameError> {
    check_seat(for_seat)?;

    let to_act = state.seat_to_act() == Some(for_seat);

    Ok(PublicGameState {
        game_id: state.id.clone(),
        phase: state.phase,
        seat: for_seat,
        players: state.players.clone(),
        my_hand: state.get_hand(for_seat).to_vec(),
        hand_counts: state.hand_counts(),
        landlord_cards: state
            .landlord_position
            .map(|_| state.landlord_cards.clone()),
        landlord_position: state.landlord_position,
        current_bidder: state.current_bidder,
        highest_bid: state.highest_bid,
        highest_bidder: state.highest_bidder,
        current_player: state.current_player,
        last_played_cards: state.last_played_cards.clone(),
        last_played_pattern: state.last_played_pattern.clone(),
        last_player: state.last_player,
        consecutive_passes: state.consecutive_passes,
        round_number: state.round_number,
        bomb_count: state.bomb_count,
        is_leading: state.phase == GamePhase::Playing && to_act && state.is_leading(for_seat),
        winner: state.winner,
        winner_type: state.winner_type,
        settlement: settle_game(state),
    })
}

/// Compute end-of-game points, `None` until the game is finished.
///
/// The stake doubles per bomb or rocket and once more on a spring: the
/// landlord wins before either farmer plays, or the farmers win while the
/// landlord has played only once.
pub fn settle_game(state: &GameState) -> Option<Settlement> {
    if state.phase != GamePhase::Finished {
        return None;
    }
    let landlord = state.landlord_position?;
    let winner_type = state.winner_type?;

    let spring = match winner_type {
        WinnerType::Landlord => (0..SEAT_COUNT)
            .filter(|&s| s != landlord)
            .all(|s| state.plays_by(s) == 0),
        WinnerType::Farmer => state.plays_by(landlord) == 1,
    };

    let doublings = state.bomb_count as u32 + spring as u32;
    let multiplier = 1u32 << doublings.min(16);
    let unit = state.highest_bid.max(1) as i32 * multiplier as i32;
    let landlord_sign = match winner_type {
        WinnerType::Landlord => 1,
        WinnerType::Farmer => -1,
    };

    let mut scores = [0i32; 3];
    for seat in 0..SEAT_COUNT {
        scores[seat as usize] = if seat == landlord {
            2 * unit * landlord_sign
        } else {
            -unit * landlord_sign
        };
    }

    Some(Settlement {
        base_bid: state.highest_bid,
        bomb_count: state.bomb_count,
        spring,
        multiplier,
        scores,
    })
}

/// Pattern type recorded for the last play, if any
pub fn last_pattern_type(state: &GameState) -> Option<PatternType> {
    state
        .last_played_pattern
        .as_ref()
        .map(|pattern| pattern.pattern_type)
}
