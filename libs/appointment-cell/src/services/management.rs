use std::str::FromStr;

use tracing::info;

use crate::models::{
    Appointment, AppointmentError, AppointmentSearchQuery, AppointmentStatus, UpdateAppointmentRequest,
};
use crate::services::lifecycle::AppointmentLifecycleService;
use crate::services::repository::AppointmentRepository;
use crate::state::AppointmentState;

/// Staff console operations on existing appointments.
pub struct AppointmentManagementService {
    repository: AppointmentRepository,
    lifecycle: AppointmentLifecycleService,
}

impl AppointmentManagementService {
    pub fn new(state: &AppointmentState) -> Self {
        Self {
            repository: state.repository.clone(),
            lifecycle: AppointmentLifecycleService::new(),
        }
    }

    pub async fn search(&self, query: &AppointmentSearchQuery) -> Result<Vec<Appointment>, AppointmentError> {
        let status = parse_status_filter(query.status.as_deref())?;
        let records = self.repository.list().await?;
        Ok(filter_appointments(&records, query.search.as_deref(), status))
    }

    /// Accept a pending request.
    pub async fn accept(&self, id: &str) -> Result<Appointment, AppointmentError> {
        self.set_status(id, AppointmentStatus::Confirmed).await
    }

    /// Reject a request; the appointment is kept as cancelled.
    pub async fn reject(&self, id: &str) -> Result<Appointment, AppointmentError> {
        self.set_status(id, AppointmentStatus::Cancelled).await
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let lifecycle = self.lifecycle;
        let appointment = self
            .repository
            .update(id, |record| {
                if let Some(status) = request.status {
                    lifecycle.validate_status_transition(record.status, status)?;
                    record.status = status;
                }
                if let Some(notes) = &request.notes {
                    record.notes = notes.clone();
                }
                Ok(())
            })
            .await?;

        info!("Appointment {} updated by staff (status: {})", appointment.id, appointment.status);
        Ok(appointment)
    }

    async fn set_status(&self, id: &str, status: AppointmentStatus) -> Result<Appointment, AppointmentError> {
        let lifecycle = self.lifecycle;
        let appointment = self
            .repository
            .update(id, |record| {
                lifecycle.validate_status_transition(record.status, status)?;
                record.status = status;
                Ok(())
            })
            .await?;

        info!("Appointment {} is now {}", appointment.id, appointment.status);
        Ok(appointment)
    }
}

/// `None` and `all` mean no status filter.
pub fn parse_status_filter(status: Option<&str>) -> Result<Option<AppointmentStatus>, AppointmentError> {
    match status.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => AppointmentStatus::from_str(value).map(Some),
    }
}

/// Case-insensitive substring search over patient name, doctor and reason,
/// combined with an optional status filter. Source order is kept.
pub fn filter_appointments(
    records: &[Appointment],
    search: Option<&str>,
    status: Option<AppointmentStatus>,
) -> Vec<Appointment> {
    let term = search.map(|term| term.trim().to_lowercase()).unwrap_or_default();

    records
        .iter()
        .filter(|record| {
            let matches_search = term.is_empty()
                || record.patient_name.to_lowercase().contains(&term)
                || record.doctor.to_lowercase().contains(&term)
                || record.reason.to_lowercase().contains(&term);
            let matches_status = status.map_or(true, |status| record.status == status);
            matches_search && matches_status
        })
        .cloned()
        .collect()
}
