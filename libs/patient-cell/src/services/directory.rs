use tracing::debug;

use appointment_cell::models::Appointment;
use appointment_cell::services::AppointmentRepository;
use appointment_cell::state::AppointmentState;

use crate::models::{PatientDetail, PatientError, PatientSummary};

pub struct PatientService {
    repository: AppointmentRepository,
}

impl PatientService {
    pub fn new(state: &AppointmentState) -> Self {
        Self {
            repository: state.repository.clone(),
        }
    }

    pub async fn list(&self, search: Option<&str>) -> Result<Vec<PatientSummary>, PatientError> {
        let records = self.repository.list().await?;
        let patients = collect_patients(&records);
        debug!("Patient directory has {} entries", patients.len());

        Ok(match search.map(str::trim).filter(|term| !term.is_empty()) {
            Some(term) => search_patients(&patients, term),
            None => patients,
        })
    }

    pub async fn get(&self, patient_id: &str) -> Result<PatientDetail, PatientError> {
        let records = self.repository.list().await?;
        let patient = collect_patients(&records)
            .into_iter()
            .find(|patient| patient.id == patient_id)
            .ok_or_else(|| PatientError::NotFound(patient_id.to_string()))?;

        let mut appointments: Vec<Appointment> = records
            .into_iter()
            .filter(|record| record.patient_id == patient_id)
            .collect();
        appointments.sort_by(|a, b| (b.date, b.time).cmp(&(a.date, a.time)));

        Ok(PatientDetail { patient, appointments })
    }
}

/// One entry per distinct patient id, in the order patients first appear.
pub fn collect_patients(records: &[Appointment]) -> Vec<PatientSummary> {
    let mut patients: Vec<PatientSummary> = Vec::new();

    for record in records {
        match patients.iter_mut().find(|patient| patient.id == record.patient_id) {
            Some(patient) => {
                patient.visit_count += 1;
                patient.last_visit = patient.last_visit.max(record.date);
            }
            None => patients.push(PatientSummary {
                id: record.patient_id.clone(),
                name: record.patient_name.clone(),
                email: record.patient_email.clone(),
                phone: record.patient_phone.clone(),
                visit_count: 1,
                last_visit: record.date,
            }),
        }
    }

    patients
}

pub fn search_patients(patients: &[PatientSummary], term: &str) -> Vec<PatientSummary> {
    let lowered = term.to_lowercase();

    patients
        .iter()
        .filter(|patient| {
            patient.name.to_lowercase().contains(&lowered)
                || patient.email.to_lowercase().contains(&lowered)
                || patient.phone.contains(term)
        })
        .cloned()
        .collect()
}
