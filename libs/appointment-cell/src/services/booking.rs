use chrono::Utc;
use tracing::{debug, info, warn};

use doctor_cell::models::Availability;
use doctor_cell::services::{works_on, AvailabilityService};
use shared_config::AppConfig;

use crate::models::{
    Appointment, AppointmentError, AppointmentStatus, AvailabilityQuery, AvailabilityResponse,
    BookAppointmentRequest, PatientLookupQuery,
};
use crate::services::lifecycle::AppointmentLifecycleService;
use crate::services::repository::{is_valid_email, next_id, AppointmentRepository};
use crate::state::AppointmentState;

/// Whether a booking is re-checked against the doctor's schedule when it is
/// submitted. Off by default: the booking form only offers free slots and a
/// submission is taken as-is, with a warning logged if it overlaps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingPolicy {
    pub enforce_availability: bool,
}

impl BookingPolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            enforce_availability: config.enforce_availability,
        }
    }
}

/// Patient-facing flow: slot lookup, booking, finding and cancelling one's
/// own appointments.
pub struct BookingService {
    repository: AppointmentRepository,
    availability: AvailabilityService,
    lifecycle: AppointmentLifecycleService,
    policy: BookingPolicy,
}

impl BookingService {
    pub fn new(state: &AppointmentState) -> Self {
        Self {
            repository: state.repository.clone(),
            availability: AvailabilityService::new(state.roster.clone()),
            lifecycle: AppointmentLifecycleService::new(),
            policy: state.policy,
        }
    }

    pub async fn availability(&self, query: &AvailabilityQuery) -> Result<AvailabilityResponse, AppointmentError> {
        let records = self.repository.list().await?;
        let doctor = query.doctor.as_deref();
        let date = query.date.as_deref();

        let availability = self.availability.check_availability(doctor, date, &records);
        let message = match &availability {
            Availability::Available { .. } => None,
            Availability::Unavailable { reason } => Some(reason.message().to_string()),
        };

        Ok(AvailabilityResponse {
            doctor: query.doctor.clone(),
            date: query.date.clone(),
            is_date_available: self.availability.is_date_available(doctor, date),
            available_slots: availability.slots().to_vec(),
            availability,
            message,
        })
    }

    pub async fn book(&self, request: BookAppointmentRequest) -> Result<Appointment, AppointmentError> {
        validate_booking_request(&request)?;

        let doctor = self
            .availability
            .roster()
            .find(request.doctor.trim())
            .cloned()
            .ok_or_else(|| AppointmentError::UnknownDoctor(request.doctor.clone()))?;
        debug!("Booking {} with Dr. {} on {} at {}", request.patient_name, doctor.name, request.date, request.time);

        let policy = self.policy;
        let appointment = self
            .repository
            .modify(|records| {
                if !works_on(&doctor, request.date) {
                    if policy.enforce_availability {
                        return Err(AppointmentError::DoctorNotAvailable {
                            doctor: doctor.name.clone(),
                            date: request.date,
                        });
                    }
                    warn!("Dr. {} does not work on {}, accepting booking anyway", doctor.name, request.date);
                }

                if records
                    .iter()
                    .any(|record| record.occupies(&doctor.name, request.date, request.time))
                {
                    if policy.enforce_availability {
                        return Err(AppointmentError::SlotTaken {
                            doctor: doctor.name.clone(),
                            date: request.date,
                            time: request.time,
                        });
                    }
                    warn!(
                        "Dr. {} already has an active booking at {} on {}, accepting double booking",
                        doctor.name, request.time, request.date
                    );
                }

                let id = next_id(records, Utc::now().timestamp_millis())?;
                let appointment = Appointment {
                    patient_id: format!("p{}", id),
                    id,
                    patient_name: request.patient_name.trim().to_string(),
                    patient_email: request.patient_email.trim().to_string(),
                    patient_phone: request.patient_phone.trim().to_string(),
                    date: request.date,
                    time: request.time,
                    doctor: doctor.name.clone(),
                    department: doctor.department.clone(),
                    reason: request.reason.trim().to_string(),
                    status: AppointmentStatus::Pending,
                    notes: String::new(),
                };
                records.push(appointment.clone());
                Ok(appointment)
            })
            .await?;

        info!("Appointment {} booked for {} with Dr. {}", appointment.id, appointment.patient_name, appointment.doctor);
        Ok(appointment)
    }

    pub async fn get(&self, id: &str) -> Result<Appointment, AppointmentError> {
        self.repository.find(id).await
    }

    pub async fn lookup(&self, query: &PatientLookupQuery) -> Result<Vec<Appointment>, AppointmentError> {
        let email = query.email.as_deref().map(str::trim).filter(|email| !email.is_empty());
        let phone = query.phone.as_deref().map(str::trim).filter(|phone| !phone.is_empty());

        if email.is_none() && phone.is_none() {
            return Err(AppointmentError::ValidationError(
                "Please enter your email or phone number".to_string(),
            ));
        }

        let records = self.repository.list().await?;
        Ok(find_patient_appointments(&records, email, phone))
    }

    /// Patient self-cancellation.
    pub async fn cancel(&self, id: &str) -> Result<Appointment, AppointmentError> {
        let lifecycle = self.lifecycle;
        let appointment = self
            .repository
            .update(id, |record| {
                if record.status == AppointmentStatus::Cancelled {
                    return Ok(());
                }
                if !lifecycle.can_patient_cancel(record.status) {
                    return Err(AppointmentError::InvalidStatusTransition {
                        from: record.status,
                        to: AppointmentStatus::Cancelled,
                    });
                }
                record.status = AppointmentStatus::Cancelled;
                Ok(())
            })
            .await?;

        info!("Appointment {} cancelled by patient", appointment.id);
        Ok(appointment)
    }
}

fn validate_booking_request(request: &BookAppointmentRequest) -> Result<(), AppointmentError> {
    let required = [
        ("patientName", &request.patient_name),
        ("patientEmail", &request.patient_email),
        ("patientPhone", &request.patient_phone),
        ("doctor", &request.doctor),
        ("reason", &request.reason),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(AppointmentError::ValidationError(format!("{} is required", field)));
    }
    if !is_valid_email(&request.patient_email) {
        return Err(AppointmentError::ValidationError(format!(
            "'{}' is not a valid email address",
            request.patient_email
        )));
    }
    Ok(())
}

/// Email matches in full ignoring case, phone matches as a substring; both
/// must match when both are given.
pub fn find_patient_appointments(
    records: &[Appointment],
    email: Option<&str>,
    phone: Option<&str>,
) -> Vec<Appointment> {
    let email = email.map(str::to_lowercase);

    records
        .iter()
        .filter(|record| {
            let email_match = email
                .as_deref()
                .map_or(true, |email| record.patient_email.to_lowercase() == email);
            let phone_match = phone.map_or(true, |phone| record.patient_phone.contains(phone));
            email_match && phone_match
        })
        .cloned()
        .collect()
}
