//! Auction state machine: calls in, contract out.
//!
//! The engine does not re-validate bidding legality (the feed supplies
//! seat-correct, turn-ordered calls); it only watches for closure and then
//! derives the contract, declarer, dummy, and opening leader.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_types::Strain;
use super::seats::Seat;
use crate::errors::domain::DomainError;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Call {
    Pass,
    Double,
    Redouble,
    Bid { level: u8, strain: Strain },
}

impl Call {
    pub fn is_pass(self) -> bool {
        matches!(self, Call::Pass)
    }

    pub fn bid(self) -> Option<(u8, Strain)> {
        match self {
            Call::Bid { level, strain } => Some((level, strain)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Call {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Call::Pass => f.write_str("P"),
            Call::Double => f.write_str("X"),
            Call::Redouble => f.write_str("XX"),
            Call::Bid { level, strain } => write!(f, "{level}{strain}"),
        }
    }
}

impl FromStr for Call {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        match upper.as_str() {
            "P" | "PASS" => return Ok(Call::Pass),
            "X" | "DBL" | "D" => return Ok(Call::Double),
            "XX" | "RDBL" | "R" => return Ok(Call::Redouble),
            _ => {}
        }
        let mut chars = upper.chars();
        let level = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .ok_or_else(|| DomainError::ParseCall(s.to_string()))? as u8;
        if !(1..=7).contains(&level) {
            return Err(DomainError::ParseCall(s.to_string()));
        }
        let strain = chars
            .as_str()
            .parse::<Strain>()
            .map_err(|_| DomainError::ParseCall(s.to_string()))?;
        Ok(Call::Bid { level, strain })
    }
}

impl Serialize for Call {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Call {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Call>()
            .map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Doubling {
    Undoubled,
    Doubled,
    Redoubled,
}

/// The finalized contract. Derived at auction close, immutable for the
/// rest of the deal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct Contract {
    pub level: u8,
    pub strain: Strain,
    pub doubling: Doubling,
    pub declarer: Seat,
}

impl Contract {
    pub fn dummy(&self) -> Seat {
        self.declarer.partner()
    }

    /// Opening leader: the declarer's left-hand opponent.
    pub fn opening_leader(&self) -> Seat {
        self.declarer.next()
    }
}

impl std::fmt::Display for Contract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.level, self.strain)?;
        match self.doubling {
            Doubling::Undoubled => Ok(()),
            Doubling::Doubled => f.write_str("X"),
            Doubling::Redoubled => f.write_str("XX"),
        }
    }
}

/// The auction: an ordered call log plus the derived contract once three
/// consecutive passes close it.
#[derive(Debug, Clone)]
pub struct Auction {
    calls: Vec<(Seat, Call)>,
    closed: bool,
    contract: Option<Contract>,
}

impl Auction {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            closed: false,
            contract: None,
        }
    }

    pub fn calls(&self) -> &[(Seat, Call)] {
        &self.calls
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn contract(&self) -> Option<&Contract> {
        self.contract.as_ref()
    }

    /// Append a call; closes the auction when this pass is the third in a
    /// row with at least four calls on the table. A closed all-pass
    /// auction yields no contract.
    pub fn record_call(&mut self, seat: Seat, call: Call) -> bool {
        if self.closed {
            tracing::warn!(%seat, %call, "call received after auction closed; ignored");
            return false;
        }
        self.calls.push((seat, call));

        let n = self.calls.len();
        let trailing_passes = n >= 4
            && call.is_pass()
            && self.calls[n - 3..].iter().all(|(_, c)| c.is_pass());
        if trailing_passes {
            self.closed = true;
            self.contract = self.derive_contract();
        }
        self.closed
    }

    /// Scan backward for the final genuine bid, collect the doubling state
    /// from any intervening X/XX, then scan forward for the first member of
    /// the winning partnership to have named that strain: that seat
    /// declares, not necessarily the final bidder.
    fn derive_contract(&self) -> Option<Contract> {
        let (final_idx, level, strain) = self
            .calls
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, (_, c))| c.bid().map(|(l, s)| (i, l, s)))?;
        let final_bidder = self.calls[final_idx].0;

        let mut doubling = Doubling::Undoubled;
        for (_, call) in &self.calls[final_idx + 1..] {
            match call {
                Call::Double => doubling = Doubling::Doubled,
                Call::Redouble => doubling = Doubling::Redoubled,
                _ => {}
            }
        }

        let partnership = final_bidder.partnership();
        let declarer = self
            .calls
            .iter()
            .find_map(|&(seat, call)| match call.bid() {
                Some((_, s)) if s == strain && seat.partnership() == partnership => Some(seat),
                _ => None,
            })
            .unwrap_or(final_bidder);

        Some(Contract {
            level,
            strain,
            doubling,
            declarer,
        })
    }
}

impl Default for Auction {
    fn default() -> Self {
        Self::new()
    }
}
