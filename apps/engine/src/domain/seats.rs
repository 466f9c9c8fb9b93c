//! Seats, partnerships, and rotation math.
//!
//! Rotation is the fixed bridge order N -> E -> S -> W -> N. Every layer
//! (auction, tricks, session, snapshots) shares these helpers so "who acts
//! next" has a single source of truth.

use crate::errors::domain::DomainError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Seat {
    North,
    East,
    South,
    West,
}

impl Seat {
    pub const ALL: [Seat; 4] = [Seat::North, Seat::East, Seat::South, Seat::West];

    /// Next seat clockwise (the left-hand opponent).
    pub fn next(self) -> Seat {
        match self {
            Seat::North => Seat::East,
            Seat::East => Seat::South,
            Seat::South => Seat::West,
            Seat::West => Seat::North,
        }
    }

    /// Previous seat counter-clockwise.
    pub fn prev(self) -> Seat {
        match self {
            Seat::North => Seat::West,
            Seat::East => Seat::North,
            Seat::South => Seat::East,
            Seat::West => Seat::South,
        }
    }

    /// Partner: two positions around the cycle.
    pub fn partner(self) -> Seat {
        self.next().next()
    }

    pub fn partnership(self) -> Partnership {
        match self {
            Seat::North | Seat::South => Partnership::NorthSouth,
            Seat::East | Seat::West => Partnership::EastWest,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Seat::North => 0,
            Seat::East => 1,
            Seat::South => 2,
            Seat::West => 3,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Seat::North => "N",
            Seat::East => "E",
            Seat::South => "S",
            Seat::West => "W",
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl std::str::FromStr for Seat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "N" | "NORTH" => Ok(Seat::North),
            "E" | "EAST" => Ok(Seat::East),
            "S" | "SOUTH" => Ok(Seat::South),
            "W" | "WEST" => Ok(Seat::West),
            _ => Err(DomainError::ParseSeat(s.to_string())),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Partnership {
    NorthSouth,
    EastWest,
}

impl Partnership {
    pub fn opponents(self) -> Partnership {
        match self {
            Partnership::NorthSouth => Partnership::EastWest,
            Partnership::EastWest => Partnership::NorthSouth,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Partnership::NorthSouth => "NS",
            Partnership::EastWest => "EW",
        }
    }
}

impl std::fmt::Display for Partnership {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Upstream systems cannot always identify the player of a card. The
/// sentinel stays at the boundary: inference resolves it to a concrete
/// `Seat` before any state mutation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PlayerRef {
    Known(Seat),
    Unknown,
}
