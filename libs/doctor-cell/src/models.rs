use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shared_models::error::AppError;

pub const DAY_NAMES: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

// ==============================================================================
// DOCTOR MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub name: String,
    pub department: String,
    /// Weekdays the doctor accepts appointments, 0 = Sunday .. 6 = Saturday.
    pub work_days: BTreeSet<u8>,
}

impl Doctor {
    pub fn new(name: &str, department: &str, work_days: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            department: department.to_string(),
            work_days: work_days.iter().copied().collect(),
        }
    }

    pub fn works_on_day(&self, day_of_week: u8) -> bool {
        self.work_days.contains(&day_of_week)
    }

    /// Comma separated day names, e.g. "Tuesday, Thursday, Friday".
    pub fn work_days_text(&self) -> String {
        self.work_days
            .iter()
            .filter_map(|day| DAY_NAMES.get(*day as usize).copied())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorProfile {
    pub name: String,
    pub department: String,
    pub work_days: BTreeSet<u8>,
    pub work_days_text: String,
}

impl From<&Doctor> for DoctorProfile {
    fn from(doctor: &Doctor) -> Self {
        Self {
            name: doctor.name.clone(),
            department: doctor.department.clone(),
            work_days: doctor.work_days.clone(),
            work_days_text: doctor.work_days_text(),
        }
    }
}

// ==============================================================================
// TIME SLOTS
// ==============================================================================

/// One of the twelve bookable half-hour windows. Declaration order is the
/// master slot order, so `Ord` sorts chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "09:00 AM")]
    Am0900,
    #[serde(rename = "09:30 AM")]
    Am0930,
    #[serde(rename = "10:00 AM")]
    Am1000,
    #[serde(rename = "10:30 AM")]
    Am1030,
    #[serde(rename = "11:00 AM")]
    Am1100,
    #[serde(rename = "11:30 AM")]
    Am1130,
    #[serde(rename = "02:00 PM")]
    Pm0200,
    #[serde(rename = "02:30 PM")]
    Pm0230,
    #[serde(rename = "03:00 PM")]
    Pm0300,
    #[serde(rename = "03:30 PM")]
    Pm0330,
    #[serde(rename = "04:00 PM")]
    Pm0400,
    #[serde(rename = "04:30 PM")]
    Pm0430,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 12] = [
        TimeSlot::Am0900,
        TimeSlot::Am0930,
        TimeSlot::Am1000,
        TimeSlot::Am1030,
        TimeSlot::Am1100,
        TimeSlot::Am1130,
        TimeSlot::Pm0200,
        TimeSlot::Pm0230,
        TimeSlot::Pm0300,
        TimeSlot::Pm0330,
        TimeSlot::Pm0400,
        TimeSlot::Pm0430,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Am0900 => "09:00 AM",
            TimeSlot::Am0930 => "09:30 AM",
            TimeSlot::Am1000 => "10:00 AM",
            TimeSlot::Am1030 => "10:30 AM",
            TimeSlot::Am1100 => "11:00 AM",
            TimeSlot::Am1130 => "11:30 AM",
            TimeSlot::Pm0200 => "02:00 PM",
            TimeSlot::Pm0230 => "02:30 PM",
            TimeSlot::Pm0300 => "03:00 PM",
            TimeSlot::Pm0330 => "03:30 PM",
            TimeSlot::Pm0400 => "04:00 PM",
            TimeSlot::Pm0430 => "04:30 PM",
        }
    }

    pub fn is_morning(&self) -> bool {
        *self <= TimeSlot::Am1130
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeSlot {
    type Err = DoctorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TimeSlot::ALL
            .iter()
            .copied()
            .find(|slot| slot.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DoctorError::InvalidTimeSlot(s.to_string()))
    }
}

/// Anything occupying a doctor's slot on a given date.
pub trait SlotBooking {
    fn doctor_name(&self) -> &str;
    fn booked_date(&self) -> NaiveDate;
    fn booked_slot(&self) -> TimeSlot;
    fn is_cancelled(&self) -> bool;
}

// ==============================================================================
// AVAILABILITY RESULTS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    UnsetSelection,
    UnknownDoctor,
    MalformedDate,
    NotAWorkDay,
    FullyBooked,
}

impl UnavailableReason {
    pub fn message(&self) -> &'static str {
        match self {
            UnavailableReason::UnsetSelection => "Please select a doctor and a date first",
            UnavailableReason::UnknownDoctor => "The selected doctor is not on the roster",
            UnavailableReason::MalformedDate => "The selected date is not a valid calendar date",
            UnavailableReason::NotAWorkDay => "The doctor is not available on this day",
            UnavailableReason::FullyBooked => {
                "No available time slots for this date. Please choose another date."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Availability {
    Available { slots: Vec<TimeSlot> },
    Unavailable { reason: UnavailableReason },
}

impl Availability {
    pub fn slots(&self) -> &[TimeSlot] {
        match self {
            Availability::Available { slots } => slots,
            Availability::Unavailable { .. } => &[],
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available { .. })
    }
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DoctorError {
    #[error("Doctor not found: {0}")]
    NotFound(String),

    #[error("Invalid time slot: {0}")]
    InvalidTimeSlot(String),

    #[error("Invalid doctor roster: {0}")]
    InvalidRoster(String),
}

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::NotFound(_) => AppError::NotFound(err.to_string()),
            DoctorError::InvalidTimeSlot(_) => AppError::ValidationError(err.to_string()),
            DoctorError::InvalidRoster(_) => AppError::Internal(err.to_string()),
        }
    }
}
