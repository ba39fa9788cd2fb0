use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::{debug, info, warn};

use shared_database::{KeyValueStore, StoreError};

use crate::models::{Appointment, AppointmentError};

pub const APPOINTMENTS_KEY: &str = "appointments";
pub const MAX_WRITE_ATTEMPTS: usize = 5;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email.trim())
}

/// Reject records missing required fields before they reach the store.
pub fn validate_records(records: &[Appointment]) -> Result<(), AppointmentError> {
    let mut ids = HashSet::with_capacity(records.len());

    for record in records {
        let required = [
            ("id", &record.id),
            ("patientId", &record.patient_id),
            ("patientName", &record.patient_name),
            ("patientEmail", &record.patient_email),
            ("patientPhone", &record.patient_phone),
            ("doctor", &record.doctor),
            ("department", &record.department),
            ("reason", &record.reason),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(AppointmentError::ValidationError(format!(
                "appointment '{}' is missing {}",
                record.id, field
            )));
        }
        if !is_valid_email(&record.patient_email) {
            return Err(AppointmentError::ValidationError(format!(
                "appointment '{}' has an invalid email address",
                record.id
            )));
        }
        if !ids.insert(record.id.as_str()) {
            return Err(AppointmentError::ValidationError(format!(
                "duplicate appointment id '{}'",
                record.id
            )));
        }
    }

    Ok(())
}

/// Decode the stored list one record at a time so a record that does not
/// fit the schema is reported by position and id.
fn decode_records(value: &str) -> Result<Vec<Appointment>, AppointmentError> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(value)?;

    raw.into_iter()
        .enumerate()
        .map(|(index, record)| {
            let id = record
                .get("id")
                .and_then(|id| id.as_str())
                .unwrap_or("<missing>")
                .to_string();
            serde_json::from_value(record).map_err(|e| {
                AppointmentError::ValidationError(format!(
                    "stored appointment #{} (id '{}') is malformed: {}",
                    index, id, e
                ))
            })
        })
        .collect()
}

/// Next appointment id: the current time in milliseconds, bumped past the
/// largest numeric id already issued so ids follow creation order.
pub fn next_id(records: &[Appointment], now_millis: i64) -> Result<String, AppointmentError> {
    let largest = records
        .iter()
        .filter_map(|record| record.id.parse::<u64>().ok())
        .max();
    let now = u64::try_from(now_millis).unwrap_or(0);

    let floor = match largest {
        Some(largest) => largest.checked_add(1).ok_or_else(|| {
            AppointmentError::ValidationError(format!(
                "appointment id space exhausted after '{}'",
                largest
            ))
        })?,
        None => 0,
    };

    Ok(now.max(floor).to_string())
}

/// Typed access to the appointment list kept under one store key.
///
/// Every write is a read-modify-write against the version that was read, so
/// two writers racing on the list cannot silently drop each other's changes:
/// the loser re-reads and re-applies its change.
#[derive(Clone)]
pub struct AppointmentRepository {
    store: Arc<dyn KeyValueStore>,
}

impl AppointmentRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn load(&self) -> Result<(Vec<Appointment>, u64), AppointmentError> {
        match self.store.get(APPOINTMENTS_KEY).await? {
            Some(entry) => {
                let records = decode_records(&entry.value)?;
                validate_records(&records)?;
                Ok((records, entry.version))
            }
            None => Ok((Vec::new(), 0)),
        }
    }

    pub async fn list(&self) -> Result<Vec<Appointment>, AppointmentError> {
        let (records, _) = self.load().await?;
        Ok(records)
    }

    pub async fn find(&self, id: &str) -> Result<Appointment, AppointmentError> {
        self.list()
            .await?
            .into_iter()
            .find(|record| record.id == id)
            .ok_or_else(|| AppointmentError::NotFound(id.to_string()))
    }

    /// Apply `change` to the current list and write it back atomically.
    ///
    /// `change` may run more than once if another writer gets in first, so it
    /// must only depend on the records it is handed.
    pub async fn modify<T, F>(&self, mut change: F) -> Result<T, AppointmentError>
    where
        F: FnMut(&mut Vec<Appointment>) -> Result<T, AppointmentError> + Send,
        T: Send,
    {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let (mut records, version) = self.load().await?;
            let outcome = change(&mut records)?;
            validate_records(&records)?;

            let value = serde_json::to_string(&records)?;
            match self.store.put(APPOINTMENTS_KEY, value, version).await {
                Ok(new_version) => {
                    debug!("Appointments written at version {} ({} records)", new_version, records.len());
                    return Ok(outcome);
                }
                Err(StoreError::VersionConflict { expected, actual, .. }) => {
                    warn!(
                        "Appointment write conflict on attempt {} (read v{}, store at v{}), retrying",
                        attempt, expected, actual
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppointmentError::Contention {
            attempts: MAX_WRITE_ATTEMPTS,
        })
    }

    /// Apply `change` to one appointment and return the updated record.
    pub async fn update<F>(&self, id: &str, mut change: F) -> Result<Appointment, AppointmentError>
    where
        F: FnMut(&mut Appointment) -> Result<(), AppointmentError> + Send,
    {
        self.modify(|records| {
            let record = records
                .iter_mut()
                .find(|record| record.id == id)
                .ok_or_else(|| AppointmentError::NotFound(id.to_string()))?;
            change(record)?;
            Ok(record.clone())
        })
        .await
    }

    /// Write `records` only when the store holds no appointment list yet.
    /// Returns whether anything was written.
    pub async fn seed_if_empty(&self, records: Vec<Appointment>) -> Result<bool, AppointmentError> {
        if self.store.get(APPOINTMENTS_KEY).await?.is_some() {
            debug!("Appointment list already present, skipping seed");
            return Ok(false);
        }

        validate_records(&records)?;
        let value = serde_json::to_string(&records)?;
        match self.store.put(APPOINTMENTS_KEY, value, 0).await {
            Ok(_) => {
                info!("Seeded record store with {} demo appointments", records.len());
                Ok(true)
            }
            // Someone else initialised the list first.
            Err(StoreError::VersionConflict { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
