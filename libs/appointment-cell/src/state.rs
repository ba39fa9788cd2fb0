use std::sync::Arc;

use doctor_cell::services::DoctorRoster;
use shared_config::AppConfig;
use shared_database::KeyValueStore;

use crate::services::{AppointmentRepository, BookingPolicy};

/// Shared state behind the appointment and dashboard routes.
#[derive(Clone)]
pub struct AppointmentState {
    pub repository: AppointmentRepository,
    pub roster: Arc<DoctorRoster>,
    pub policy: BookingPolicy,
}

impl AppointmentState {
    pub fn new(config: &AppConfig, store: Arc<dyn KeyValueStore>, roster: Arc<DoctorRoster>) -> Self {
        Self {
            repository: AppointmentRepository::new(store),
            roster,
            policy: BookingPolicy::from_config(config),
        }
    }
}
