//! Deal & hand tracking.
//!
//! The append-only play log is authoritative: a seat's remaining cards are
//! always re-derived as dealt-hand minus logged plays, never kept as a
//! separately mutated cache that could desync.

use super::cards_types::Card;
use super::seats::Seat;
use crate::errors::domain::DomainError;

/// Whether the current, still-open trick's plays count as gone from the
/// hand. The double-dummy oracle needs them still in the air as trick
/// context; legality checks need them excluded.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TrickScope {
    /// Exclude every logged play, including the open trick's.
    Legal,
    /// Treat the open trick's plays as not yet removed.
    InTheAir,
}

#[derive(Debug, Clone)]
pub struct DealHands {
    dealt: [Vec<Card>; 4],
    play_log: Vec<(Seat, Card)>,
    /// How many entries at the tail of the log belong to the open trick.
    open_plays: usize,
}

impl DealHands {
    pub fn new(dealt: [Vec<Card>; 4]) -> Self {
        Self {
            dealt,
            play_log: Vec::new(),
            open_plays: 0,
        }
    }

    pub fn dealt(&self, seat: Seat) -> &[Card] {
        &self.dealt[seat.index()]
    }

    pub fn dealt_hands(&self) -> &[Vec<Card>; 4] {
        &self.dealt
    }

    pub fn play_log(&self) -> &[(Seat, Card)] {
        &self.play_log
    }

    pub fn plays_logged(&self) -> usize {
        self.play_log.len()
    }

    /// Re-derive the seat's current hand from the dealt cards and the play
    /// log. Idempotent; callable at any point. A seat the feed never dealt
    /// to yields an empty set rather than an error.
    pub fn remaining_cards(&self, seat: Seat, scope: TrickScope) -> Vec<Card> {
        let settled = match scope {
            TrickScope::Legal => self.play_log.len(),
            TrickScope::InTheAir => self.play_log.len() - self.open_plays,
        };
        let mut remaining = self.dealt[seat.index()].clone();
        for &(s, card) in &self.play_log[..settled] {
            if s == seat {
                if let Some(pos) = remaining.iter().position(|&c| c == card) {
                    remaining.remove(pos);
                }
            }
        }
        remaining
    }

    pub fn holds(&self, seat: Seat, card: Card, scope: TrickScope) -> bool {
        self.remaining_cards(seat, scope).contains(&card)
    }

    /// Log a play. A card can be removed at most once; removing an absent
    /// card or playing from an exhausted hand rejects the event without
    /// mutating anything.
    pub fn record_play(&mut self, seat: Seat, card: Card) -> Result<(), DomainError> {
        let remaining = self.remaining_cards(seat, TrickScope::Legal);
        if remaining.is_empty() && !self.dealt[seat.index()].is_empty() {
            return Err(DomainError::HandExhausted(seat));
        }
        if !remaining.contains(&card) {
            return Err(DomainError::CardNotInHand { seat, card });
        }
        self.play_log.push((seat, card));
        self.open_plays += 1;
        Ok(())
    }

    /// Mark the open trick complete: its plays become settled history.
    pub fn close_trick(&mut self) {
        self.open_plays = 0;
    }
}
