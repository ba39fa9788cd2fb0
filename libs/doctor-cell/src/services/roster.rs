use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use shared_config::AppConfig;

use crate::models::{Doctor, DoctorError};

/// The clinic's doctors. Names are unique and act as the doctor reference on
/// appointment records.
#[derive(Debug, Clone)]
pub struct DoctorRoster {
    doctors: Vec<Doctor>,
}

impl Default for DoctorRoster {
    fn default() -> Self {
        Self {
            doctors: vec![
                Doctor::new("Sarah Johnson", "General Medicine", &[1, 2, 3, 4, 5]),
                Doctor::new("Michael Chen", "Cardiology", &[2, 3, 4, 5]),
                Doctor::new("David Martinez", "Dermatology", &[1, 3, 5]),
                Doctor::new("Emily Roberts", "Pediatrics", &[1, 2, 3, 4, 5]),
                Doctor::new("James Wilson", "Orthopedics", &[2, 4, 5]),
            ],
        }
    }
}

impl DoctorRoster {
    pub fn new(doctors: Vec<Doctor>) -> Result<Self, DoctorError> {
        let mut seen = HashSet::new();
        for doctor in &doctors {
            if doctor.name.trim().is_empty() {
                return Err(DoctorError::InvalidRoster("doctor name must not be empty".to_string()));
            }
            if !seen.insert(doctor.name.as_str()) {
                return Err(DoctorError::InvalidRoster(format!(
                    "duplicate doctor name '{}'",
                    doctor.name
                )));
            }
            if let Some(day) = doctor.work_days.iter().find(|day| **day > 6) {
                return Err(DoctorError::InvalidRoster(format!(
                    "work day {} for '{}' must be between 0 (Sunday) and 6 (Saturday)",
                    day, doctor.name
                )));
            }
        }

        Ok(Self { doctors })
    }

    /// Load a roster from a JSON array of `{name, department, workDays}`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DoctorError> {
        let path = path.as_ref();
        debug!("Loading doctor roster from {}", path.display());

        let contents = std::fs::read_to_string(path).map_err(|e| {
            DoctorError::InvalidRoster(format!("cannot read {}: {}", path.display(), e))
        })?;
        let doctors: Vec<Doctor> = serde_json::from_str(&contents).map_err(|e| {
            DoctorError::InvalidRoster(format!("cannot parse {}: {}", path.display(), e))
        })?;

        Self::new(doctors)
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, DoctorError> {
        let roster = match &config.roster_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        info!("Doctor roster loaded with {} doctors", roster.len());
        Ok(roster)
    }

    pub fn find(&self, name: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|doctor| doctor.name == name)
    }

    pub fn get(&self, name: &str) -> Result<&Doctor, DoctorError> {
        self.find(name).ok_or_else(|| DoctorError::NotFound(name.to_string()))
    }

    pub fn all(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }
}
