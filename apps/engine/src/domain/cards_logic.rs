//! Card comparison under trump and lead-suit rules, plus small hand helpers.

use super::cards_types::{Card, Strain, Suit};
use super::seats::Seat;

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

/// Does `a` beat `b` in a trick where `lead` was led and `trump` is the
/// contract strain? A trump beats any non-trump; within equal trump status
/// only the relevant suit (trump if trump, else lead) competes on rank; a
/// card in neither suit cannot win regardless of rank.
pub fn card_beats(a: Card, b: Card, lead: Suit, trump: Strain) -> bool {
    if let Some(trump_suit) = trump.trump_suit() {
        let a_trump = a.suit == trump_suit;
        let b_trump = b.suit == trump_suit;
        if a_trump && !b_trump {
            return true;
        }
        if b_trump && !a_trump {
            return false;
        }
        if a_trump && b_trump {
            return a.rank > b.rank;
        }
    }
    // No trump involved: only lead-suit cards compete.
    let a_follows = a.suit == lead;
    let b_follows = b.suit == lead;
    if a_follows && !b_follows {
        return true;
    }
    if b_follows && !a_follows {
        return false;
    }
    if a_follows && b_follows {
        return a.rank > b.rank;
    }
    false
}

/// The play currently winning a (possibly partial) trick.
pub fn current_winning_play(plays: &[(Seat, Card)], trump: Strain) -> Option<(Seat, Card)> {
    let (_, lead_card) = *plays.first()?;
    let mut best = plays[0];
    for &(seat, card) in &plays[1..] {
        if card_beats(card, best.1, lead_card.suit, trump) {
            best = (seat, card);
        }
    }
    Some(best)
}

pub fn lowest_in_suit(cards: &[Card], suit: Suit) -> Option<Card> {
    cards
        .iter()
        .copied()
        .filter(|c| c.suit == suit)
        .min_by_key(|c| c.rank)
}

pub fn highest_in_suit(cards: &[Card], suit: Suit) -> Option<Card> {
    cards
        .iter()
        .copied()
        .filter(|c| c.suit == suit)
        .max_by_key(|c| c.rank)
}

/// The suit with the most cards held; rank of the best card breaks ties so
/// the choice stays deterministic.
pub fn longest_suit(cards: &[Card]) -> Option<Suit> {
    Suit::ALL
        .into_iter()
        .filter(|&s| hand_has_suit(cards, s))
        .max_by_key(|&s| {
            let count = cards.iter().filter(|c| c.suit == s).count();
            let top = highest_in_suit(cards, s).map(|c| c.rank as usize).unwrap_or(0);
            (count, top)
        })
}
