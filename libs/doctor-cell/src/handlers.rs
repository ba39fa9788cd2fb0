use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::error::AppError;

use crate::models::DoctorProfile;
use crate::services::DoctorRoster;

#[axum::debug_handler]
pub async fn list_doctors(
    State(roster): State<Arc<DoctorRoster>>,
) -> Result<Json<Value>, AppError> {
    let doctors: Vec<DoctorProfile> = roster.all().iter().map(DoctorProfile::from).collect();

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    })))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(roster): State<Arc<DoctorRoster>>,
    Path(name): Path<String>,
) -> Result<Json<DoctorProfile>, AppError> {
    debug!("Looking up doctor '{}'", name);
    let doctor = roster.get(&name)?;

    Ok(Json(DoctorProfile::from(doctor)))
}
