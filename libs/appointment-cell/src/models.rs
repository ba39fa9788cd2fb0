// libs/appointment-cell/src/models.rs
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use doctor_cell::models::{Availability, SlotBooking, TimeSlot};
use shared_database::StoreError;
use shared_models::error::AppError;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// One booking as kept in the record store. Field names follow the stored
/// JSON shape (`patientId`, `patientName`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub patient_email: String,
    pub patient_phone: String,
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub doctor: String,
    pub department: String,
    pub reason: String,
    pub status: AppointmentStatus,
    /// Staff-only notes.
    #[serde(default)]
    pub notes: String,
}

impl Appointment {
    pub fn is_active(&self) -> bool {
        self.status != AppointmentStatus::Cancelled
    }

    pub fn occupies(&self, doctor: &str, date: NaiveDate, time: TimeSlot) -> bool {
        self.is_active() && self.doctor == doctor && self.date == date && self.time == time
    }
}

impl SlotBooking for Appointment {
    fn doctor_name(&self) -> &str {
        &self.doctor
    }

    fn booked_date(&self) -> NaiveDate {
        self.date
    }

    fn booked_slot(&self) -> TimeSlot {
        self.time
    }

    fn is_cancelled(&self) -> bool {
        self.status == AppointmentStatus::Cancelled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = AppointmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppointmentError::ValidationError(format!("unknown status '{}'", s)))
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub patient_name: String,
    pub patient_email: String,
    pub patient_phone: String,
    pub doctor: String,
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub reason: String,
}

/// Staff edit from the appointment detail screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentSearchQuery {
    /// Matched against patient name, doctor and reason.
    pub search: Option<String>,
    /// A status name, or `all`.
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientLookupQuery {
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub doctor: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub doctor: Option<String>,
    pub date: Option<String>,
    pub is_date_available: bool,
    pub available_slots: Vec<TimeSlot>,
    pub availability: Availability,
    pub message: Option<String>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found: {0}")]
    NotFound(String),

    #[error("Doctor not found: {0}")]
    UnknownDoctor(String),

    #[error("Dr. {doctor} is not available on {date}")]
    DoctorNotAvailable { doctor: String, date: NaiveDate },

    #[error("Dr. {doctor} is already booked at {time} on {date}")]
    SlotTaken {
        doctor: String,
        date: NaiveDate,
        time: TimeSlot,
    },

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Record store contention: gave up after {attempts} attempts")]
    Contention { attempts: usize },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for AppointmentError {
    fn from(err: StoreError) -> Self {
        AppointmentError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppointmentError {
    fn from(err: serde_json::Error) -> Self {
        AppointmentError::Storage(format!("appointment records are malformed: {}", err))
    }
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::NotFound(_) | AppointmentError::UnknownDoctor(_) => {
                AppError::NotFound(err.to_string())
            }
            AppointmentError::DoctorNotAvailable { .. }
            | AppointmentError::SlotTaken { .. }
            | AppointmentError::InvalidStatusTransition { .. }
            | AppointmentError::Contention { .. } => AppError::Conflict(err.to_string()),
            AppointmentError::ValidationError(_) => AppError::ValidationError(err.to_string()),
            AppointmentError::Storage(_) => AppError::Storage(err.to_string()),
        }
    }
}
