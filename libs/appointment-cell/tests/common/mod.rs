#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;

use appointment_cell::models::BookAppointmentRequest;
use appointment_cell::state::AppointmentState;
use doctor_cell::models::TimeSlot;
use doctor_cell::services::DoctorRoster;
use shared_config::AppConfig;
use shared_database::{KeyValueStore, MemoryStore};

// 2024-06-02 is a Sunday.
pub const SUNDAY: &str = "2024-06-02";
pub const MONDAY: &str = "2024-06-03";
pub const TUESDAY: &str = "2024-06-04";
pub const WEDNESDAY: &str = "2024-06-05";

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

pub fn test_state_with(config: AppConfig, store: Arc<dyn KeyValueStore>) -> Arc<AppointmentState> {
    Arc::new(AppointmentState::new(
        &config,
        store,
        Arc::new(DoctorRoster::default()),
    ))
}

pub fn test_state() -> Arc<AppointmentState> {
    test_state_with(AppConfig::default(), Arc::new(MemoryStore::new()))
}

pub fn enforcing_state() -> Arc<AppointmentState> {
    let config = AppConfig {
        enforce_availability: true,
        ..AppConfig::default()
    };
    test_state_with(config, Arc::new(MemoryStore::new()))
}

pub fn booking_request(doctor: &str, on: &str, time: TimeSlot) -> BookAppointmentRequest {
    BookAppointmentRequest {
        patient_name: "John Smith".to_string(),
        patient_email: "john.smith@email.com".to_string(),
        patient_phone: "(555) 123-4567".to_string(),
        doctor: doctor.to_string(),
        date: date(on),
        time,
        reason: "Regular checkup".to_string(),
    }
}
