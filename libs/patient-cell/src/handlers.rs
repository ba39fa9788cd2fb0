use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use appointment_cell::state::AppointmentState;
use shared_models::error::AppError;

use crate::models::{PatientDetail, PatientSearchQuery};
use crate::services::PatientService;

#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<Arc<AppointmentState>>,
    Query(query): Query<PatientSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&state);
    let patients = service.list(query.search.as_deref()).await?;

    Ok(Json(json!({
        "patients": patients,
        "total": patients.len()
    })))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<Arc<AppointmentState>>,
    Path(patient_id): Path<String>,
) -> Result<Json<PatientDetail>, AppError> {
    let service = PatientService::new(&state);
    let detail = service.get(&patient_id).await?;

    Ok(Json(detail))
}
