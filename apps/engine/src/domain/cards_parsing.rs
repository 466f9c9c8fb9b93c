//! Interchange-token parsing and formatting.
//!
//! The boundary format is fixed by the collaborating systems: a card is two
//! characters, suit letter first then rank ("SA", "H7", "DT"); a strain is
//! "C"/"D"/"H"/"S"/"NT"; a contract string is level + strain with an
//! optional doubling suffix ("4H", "3NT", "5Cx", "2SXX").

use std::str::FromStr;

use super::cards_types::{Card, Rank, Strain, Suit};
use crate::errors::domain::DomainError;

impl Suit {
    pub fn token(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }

    pub fn from_token(c: char) -> Option<Suit> {
        match c.to_ascii_uppercase() {
            'C' => Some(Suit::Clubs),
            'D' => Some(Suit::Diamonds),
            'H' => Some(Suit::Hearts),
            'S' => Some(Suit::Spades),
            _ => None,
        }
    }
}

impl Rank {
    pub fn token(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    pub fn from_token(c: char) -> Option<Rank> {
        match c.to_ascii_uppercase() {
            '2' => Some(Rank::Two),
            '3' => Some(Rank::Three),
            '4' => Some(Rank::Four),
            '5' => Some(Rank::Five),
            '6' => Some(Rank::Six),
            '7' => Some(Rank::Seven),
            '8' => Some(Rank::Eight),
            '9' => Some(Rank::Nine),
            'T' => Some(Rank::Ten),
            'J' => Some(Rank::Jack),
            'Q' => Some(Rank::Queen),
            'K' => Some(Rank::King),
            'A' => Some(Rank::Ace),
            _ => None,
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.suit.token(), self.rank.token())
    }
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(suit_ch), Some(rank_ch), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(DomainError::ParseCard(s.to_string()));
        };
        let suit = Suit::from_token(suit_ch).ok_or_else(|| DomainError::ParseCard(s.to_string()))?;
        let rank = Rank::from_token(rank_ch).ok_or_else(|| DomainError::ParseCard(s.to_string()))?;
        Ok(Card { suit, rank })
    }
}

impl Strain {
    pub fn token(self) -> &'static str {
        match self {
            Strain::Clubs => "C",
            Strain::Diamonds => "D",
            Strain::Hearts => "H",
            Strain::Spades => "S",
            Strain::NoTrump => "NT",
        }
    }
}

impl std::fmt::Display for Strain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Strain {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "C" => Ok(Strain::Clubs),
            "D" => Ok(Strain::Diamonds),
            "H" => Ok(Strain::Hearts),
            "S" => Ok(Strain::Spades),
            // The feed abbreviates notrump both ways.
            "N" | "NT" => Ok(Strain::NoTrump),
            _ => Err(DomainError::ParseCall(s.to_string())),
        }
    }
}

/// Non-panicking helper to parse card tokens into `Card`s; any invalid
/// token fails the whole batch.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}

/// A contract string decomposed for scoring: level, strain, and whether the
/// token itself carried a doubling suffix.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ContractToken {
    pub level: u8,
    pub strain: Strain,
    pub doubled: bool,
    pub redoubled: bool,
}

/// Parse a contract string such as "4H", "3NT", "5Cx" or "2SXX".
///
/// Malformed input is `InvalidContractFormat`: the caller must not fall
/// back to a guessed score.
pub fn parse_contract(s: &str) -> Result<ContractToken, DomainError> {
    let trimmed = s.trim();
    let invalid = || DomainError::InvalidContractFormat(s.to_string());

    let mut chars = trimmed.chars();
    let level_ch = chars.next().ok_or_else(invalid)?;
    let level = level_ch.to_digit(10).ok_or_else(invalid)? as u8;
    if !(1..=7).contains(&level) {
        return Err(invalid());
    }

    let rest: String = chars.collect();
    let doubles = rest.chars().rev().take_while(|c| *c == 'x' || *c == 'X').count();
    if doubles > 2 {
        return Err(invalid());
    }
    let strain_part = &rest[..rest.len() - doubles];
    let strain = strain_part.parse::<Strain>().map_err(|_| invalid())?;

    Ok(ContractToken {
        level,
        strain,
        doubled: doubles == 1,
        redoubled: doubles == 2,
    })
}
