//! Doctor schedule models.
//!
//! Two status vocabularies coexist: doctor availability (used when a schedule
//! entry is created) and appointment-slot progress (used when a slot is
//! edited). They are kept as separate enumerations under one tagged
//! [`ScheduleStatus`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A status label that matches neither schedule vocabulary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown schedule status: {0}")]
pub struct UnknownStatus(pub String);

/// Doctor availability for a schedule block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvailabilityStatus {
    Available,
    Unavailable,
    OnCall,
    Surgery,
    Vacation,
}

impl AvailabilityStatus {
    pub const ALL: [AvailabilityStatus; 5] = [
        AvailabilityStatus::Available,
        AvailabilityStatus::Unavailable,
        AvailabilityStatus::OnCall,
        AvailabilityStatus::Surgery,
        AvailabilityStatus::Vacation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "Available",
            AvailabilityStatus::Unavailable => "Unavailable",
            AvailabilityStatus::OnCall => "On Call",
            AvailabilityStatus::Surgery => "Surgery",
            AvailabilityStatus::Vacation => "Vacation",
        }
    }
}

impl FromStr for AvailabilityStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Progress of a patient-facing appointment slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotStatus {
    Scheduled,
    InProgress,
}

impl SlotStatus {
    pub const ALL: [SlotStatus; 2] = [SlotStatus::Scheduled, SlotStatus::InProgress];

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotStatus::Scheduled => "scheduled",
            SlotStatus::InProgress => "in-progress",
        }
    }
}

impl FromStr for SlotStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Status of a schedule entry, tagged by vocabulary.
///
/// Serialized as its bare label ("On Call", "in-progress", ...).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "String", try_from = "String")]
pub enum ScheduleStatus {
    Availability(AvailabilityStatus),
    Slot(SlotStatus),
}

impl ScheduleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Availability(status) => status.as_str(),
            ScheduleStatus::Slot(status) => status.as_str(),
        }
    }

    /// Whether this status belongs to the doctor-availability vocabulary.
    pub fn is_availability(&self) -> bool {
        matches!(self, ScheduleStatus::Availability(_))
    }
}

impl Default for ScheduleStatus {
    fn default() -> Self {
        ScheduleStatus::Availability(AvailabilityStatus::Available)
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(status) = s.parse::<AvailabilityStatus>() {
            return Ok(ScheduleStatus::Availability(status));
        }
        s.parse::<SlotStatus>().map(ScheduleStatus::Slot)
    }
}

impl From<ScheduleStatus> for String {
    fn from(status: ScheduleStatus) -> Self {
        status.as_str().to_string()
    }
}

impl TryFrom<String> for ScheduleStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A finalized schedule entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleEntry {
    /// Unique token minted when the entry was created
    pub id: String,
    /// Doctor display name (e.g., "Dr. James Wilson")
    pub doctor_name: String,
    /// Calendar date of the block
    pub date: NaiveDate,
    /// Start time in 12-hour display form (e.g., "02:30 PM")
    pub start_time: String,
    /// End time in 12-hour display form
    pub end_time: String,
    /// Department the doctor works in
    pub department: String,
    /// Free-text notes
    pub details: String,
    /// Availability or slot status
    pub status: ScheduleStatus,
}
