//! The per-deal aggregate owned by the table session.

use serde::{Deserialize, Serialize};

use super::auction::{Auction, Contract};
use super::cards_types::{Card, Strain};
use super::hands::DealHands;
use super::seats::{Partnership, Seat};
use crate::errors::domain::DomainError;

/// Board vulnerability as announced by the feed. Display information only:
/// rubber scoring derives its own vulnerability from games won.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum Vulnerability {
    None,
    NS,
    EW,
    Both,
}

impl<'de> Deserialize<'de> for Vulnerability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Vulnerability>()
            .map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

impl std::str::FromStr for Vulnerability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            // Long forms plus the feed's one-letter LIN codes.
            "NONE" | "O" | "-" => Ok(Vulnerability::None),
            "NS" | "N" => Ok(Vulnerability::NS),
            "EW" | "E" => Ok(Vulnerability::EW),
            "BOTH" | "ALL" | "B" => Ok(Vulnerability::Both),
            _ => Err(DomainError::ParseVulnerability(s.to_string())),
        }
    }
}

/// A completed trick, archived with its winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrickRecord {
    pub plays: Vec<(Seat, Card)>,
    pub winner: Seat,
}

/// Tricks won per partnership this deal.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrickTally {
    pub ns: u8,
    pub ew: u8,
}

impl TrickTally {
    pub fn get(&self, p: Partnership) -> u8 {
        match p {
            Partnership::NorthSouth => self.ns,
            Partnership::EastWest => self.ew,
        }
    }

    pub fn add(&mut self, p: Partnership, tricks: u8) {
        match p {
            Partnership::NorthSouth => self.ns += tricks,
            Partnership::EastWest => self.ew += tricks,
        }
    }

    pub fn total(&self) -> u8 {
        self.ns + self.ew
    }
}

/// Everything the tracker knows about the deal in progress.
#[derive(Debug, Clone)]
pub struct DealState {
    pub board: u32,
    pub dealer: Seat,
    pub vulnerability: Vulnerability,
    pub hands: DealHands,
    pub auction: Auction,
    pub current_trick: Vec<(Seat, Card)>,
    pub completed_tricks: Vec<TrickRecord>,
    pub tricks_won: TrickTally,
    /// Seat expected to play the next card; None until the auction closes
    /// with a contract, and None again once the deal is over.
    pub next_to_play: Option<Seat>,
    /// Set once the deal's tricks have been fully resolved by play or by
    /// an accepted claim.
    pub play_finished: bool,
}

impl DealState {
    pub fn new(board: u32, dealer: Seat, vulnerability: Vulnerability, dealt: [Vec<Card>; 4]) -> Self {
        Self {
            board,
            dealer,
            vulnerability,
            hands: DealHands::new(dealt),
            auction: Auction::new(),
            current_trick: Vec::with_capacity(4),
            completed_tricks: Vec::new(),
            tricks_won: TrickTally::default(),
            next_to_play: None,
            play_finished: false,
        }
    }

    pub fn contract(&self) -> Option<&Contract> {
        self.auction.contract()
    }

    /// The strain governing trick resolution. Until a contract exists the
    /// engine must not crash, so an open auction resolves tricks notrump-
    /// style as a best effort.
    pub fn trump(&self) -> Strain {
        self.contract().map(|c| c.strain).unwrap_or(Strain::NoTrump)
    }

    /// Append a call; on closure, hands the opening lead to the declarer's
    /// LHO. A passed-out auction finishes the deal with no contract.
    pub fn record_call(&mut self, seat: Seat, call: super::auction::Call) {
        if self.auction.record_call(seat, call) {
            match self.auction.contract() {
                Some(contract) => {
                    self.next_to_play = Some(contract.opening_leader());
                    tracing::info!(contract = %contract, declarer = %contract.declarer, "auction closed");
                }
                None => {
                    self.play_finished = true;
                    tracing::info!("auction closed with no contract; deal passed out");
                }
            }
        }
    }

    /// Seat that led the open trick, or will lead the next one.
    pub fn trick_leader(&self) -> Option<Seat> {
        self.current_trick.first().map(|&(s, _)| s).or(self.next_to_play)
    }

    pub fn tricks_played(&self) -> u8 {
        self.completed_tricks.len() as u8
    }

    pub fn tricks_remaining(&self) -> u8 {
        13 - self.tricks_played()
    }

    pub fn is_complete(&self) -> bool {
        self.play_finished
    }

    /// Stable identifier for the exact position: advances with every call
    /// and every card, so an oracle result computed for an earlier position
    /// can be recognized as stale and discarded.
    pub fn position_fingerprint(&self) -> u64 {
        ((self.board as u64) << 32)
            | ((self.auction.calls().len() as u64) << 16)
            | self.hands.plays_logged() as u64
    }
}
