//! Room domain model.
//!
//! # Responsibility
//! - Define hostel rooms and their `floor + number` identity.
//!
//! # Invariants
//! - `floor` is within `1..=99`, `room_number` within `1..=999`.
//! - Identity ignores `room_type`.

use super::identity::{EntityKind, Identity};
use super::validation::ModelValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const MAX_FLOOR: u16 = 99;
const MAX_ROOM_NUMBER: u16 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Floor(u16);

impl Floor {
    pub fn new(value: u16) -> Result<Self, ModelValidationError> {
        if value == 0 || value > MAX_FLOOR {
            return Err(ModelValidationError::FloorOutOfRange(value));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for Floor {
    type Error = ModelValidationError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Floor> for u16 {
    fn from(value: Floor) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct RoomNumber(u16);

impl RoomNumber {
    pub fn new(value: u16) -> Result<Self, ModelValidationError> {
        if value == 0 || value > MAX_ROOM_NUMBER {
            return Err(ModelValidationError::RoomNumberOutOfRange(value));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for RoomNumber {
    type Error = ModelValidationError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoomNumber> for u16 {
    fn from(value: RoomNumber) -> Self {
        value.0
    }
}

/// Room category code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    /// Corridor, air-conditioned.
    #[serde(rename = "CA")]
    CorridorAircon,
    /// Corridor, no air-conditioning.
    #[serde(rename = "CN")]
    CorridorNonAircon,
    /// Suite, air-conditioned.
    #[serde(rename = "SA")]
    SuiteAircon,
    /// Suite, no air-conditioning.
    #[serde(rename = "SN")]
    SuiteNonAircon,
}

impl RoomType {
    /// Stable two-letter code used in storage and display.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CorridorAircon => "CA",
            Self::CorridorNonAircon => "CN",
            Self::SuiteAircon => "SA",
            Self::SuiteNonAircon => "SN",
        }
    }
}

impl FromStr for RoomType {
    type Err = ModelValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "CA" => Ok(Self::CorridorAircon),
            "CN" => Ok(Self::CorridorNonAircon),
            "SA" => Ok(Self::SuiteAircon),
            "SN" => Ok(Self::SuiteNonAircon),
            _ => Err(ModelValidationError::UnknownRoomType(value.to_string())),
        }
    }
}

impl Display for RoomType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity key of a room. Rendered as `FF-NNN`, e.g. `08-109`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomKey {
    pub floor: Floor,
    pub number: RoomNumber,
}

impl Display for RoomKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}-{:03}", self.floor.get(), self.number.get())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub floor: Floor,
    pub room_number: RoomNumber,
    pub room_type: RoomType,
}

impl Room {
    pub fn new(floor: Floor, room_number: RoomNumber, room_type: RoomType) -> Self {
        Self {
            floor,
            room_number,
            room_type,
        }
    }

    /// Builds a room from raw values, validating each one.
    pub fn parse(
        floor: u16,
        room_number: u16,
        room_type: &str,
    ) -> Result<Self, ModelValidationError> {
        Ok(Self::new(
            Floor::new(floor)?,
            RoomNumber::new(room_number)?,
            room_type.parse()?,
        ))
    }

    pub fn key(&self) -> RoomKey {
        RoomKey {
            floor: self.floor,
            number: self.room_number,
        }
    }
}

impl Identity for Room {
    type Key = RoomKey;

    const KIND: EntityKind = EntityKind::Room;

    fn identity(&self) -> RoomKey {
        self.key()
    }
}

impl Display for Room {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} ({})", self.key(), self.room_type)
    }
}

#[cfg(test)]
mod tests {
    use super::{Floor, Room, RoomNumber, RoomType};
    use crate::model::validation::ModelValidationError;

    #[test]
    fn key_renders_zero_padded_label() {
        let room = Room::parse(8, 9, "ca").expect("valid room");
        assert_eq!(room.key().to_string(), "08-009");
        assert_eq!(room.room_type, RoomType::CorridorAircon);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert_eq!(Floor::new(0), Err(ModelValidationError::FloorOutOfRange(0)));
        assert_eq!(
            RoomNumber::new(1000),
            Err(ModelValidationError::RoomNumberOutOfRange(1000))
        );
        assert!(matches!(
            "XX".parse::<RoomType>(),
            Err(ModelValidationError::UnknownRoomType(_))
        ));
    }
}
