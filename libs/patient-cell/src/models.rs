use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use appointment_cell::models::{Appointment, AppointmentError};
use shared_models::error::AppError;

/// A patient as seen through their appointments. Contact details come from
/// the first appointment recorded under the patient id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub visit_count: usize,
    pub last_visit: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientDetail {
    pub patient: PatientSummary,
    pub appointments: Vec<Appointment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientSearchQuery {
    /// Name or email substring, ignoring case, or a phone substring.
    pub search: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("Patient not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Appointments(#[from] AppointmentError),
}

impl From<PatientError> for AppError {
    fn from(err: PatientError) -> Self {
        match err {
            PatientError::NotFound(_) => AppError::NotFound(err.to_string()),
            PatientError::Appointments(inner) => inner.into(),
        }
    }
}
