use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gender: {0}")]
pub struct UnknownGender(pub String);

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(UnknownGender(other.to_string())),
        }
    }
}

/// Which part of the bus a seat sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatSide {
    /// Two seats left of the aisle
    Left,
    /// Three seats right of the aisle
    Right,
    /// Full-width bench at the rear
    Back,
}

/// Physical location of a seat, derived from its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatPosition {
    pub row: u32,
    pub side: SeatSide,
    /// 1-based column counted from the left window
    pub column: u32,
}

/// The persisted claim on a seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: Uuid,
    pub seat_id: u32,
    pub full_name: String,
    pub registration_no: String,
    pub gender: Gender,
    pub created_at: DateTime<Utc>,
}

/// Passenger details carried by a booked seat. Either all of them are
/// present or the seat is available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passenger {
    pub full_name: String,
    pub registration_no: String,
    pub gender: Gender,
    pub booked_at: DateTime<Utc>,
}

impl From<&BookingRecord> for Passenger {
    fn from(record: &BookingRecord) -> Self {
        Self {
            full_name: record.full_name.clone(),
            registration_no: record.registration_no.clone(),
            gender: record.gender,
            booked_at: record.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub id: u32,
    pub position: SeatPosition,
    pub passenger: Option<Passenger>,
}

impl Seat {
    pub fn is_booked(&self) -> bool {
        self.passenger.is_some()
    }

    pub fn gender(&self) -> Option<Gender> {
        self.passenger.as_ref().map(|p| p.gender)
    }
}
