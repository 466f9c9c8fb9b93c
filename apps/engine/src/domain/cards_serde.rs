//! Serde impls for the interchange tokens.
//!
//! Everything serializes as the exact boundary strings the collaborating
//! systems expect: "SA" for a card, "N" for a seat, "NT" for a strain, "?"
//! for an unidentified player.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_types::{Card, Strain, Suit};
use super::seats::{Partnership, PlayerRef, Seat};

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Card>()
            .map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

impl Serialize for Suit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.token().to_string())
    }
}

impl<'de> Deserialize<'de> for Suit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Suit::from_token(c).ok_or_else(|| serde::de::Error::custom(format!("invalid suit: {s}")))
            }
            _ => Err(serde::de::Error::custom(format!("invalid suit: {s}"))),
        }
    }
}

impl Serialize for Strain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.token())
    }
}

impl<'de> Deserialize<'de> for Strain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Strain>()
            .map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

impl Serialize for Seat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.token())
    }
}

impl<'de> Deserialize<'de> for Seat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Seat>()
            .map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

impl Serialize for Partnership {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.token())
    }
}

impl<'de> Deserialize<'de> for Partnership {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_ascii_uppercase().as_str() {
            "NS" => Ok(Partnership::NorthSouth),
            "EW" => Ok(Partnership::EastWest),
            _ => Err(serde::de::Error::custom(format!("invalid partnership: {s}"))),
        }
    }
}

impl Serialize for PlayerRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PlayerRef::Known(seat) => serializer.serialize_str(seat.token()),
            PlayerRef::Unknown => serializer.serialize_str("?"),
        }
    }
}

impl<'de> Deserialize<'de> for PlayerRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Anything that is not a seat token is the upstream "don't know"
        // sentinel, which inference resolves later.
        let s = String::deserialize(deserializer)?;
        Ok(match s.parse::<Seat>() {
            Ok(seat) => PlayerRef::Known(seat),
            Err(_) => PlayerRef::Unknown,
        })
    }
}
