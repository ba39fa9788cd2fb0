use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Datelike, Local, NaiveDate};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{
    Appointment, AppointmentSearchQuery, AvailabilityQuery, AvailabilityResponse,
    BookAppointmentRequest, PatientLookupQuery, UpdateAppointmentRequest,
};
use crate::services::dashboard::{CalendarMonth, DashboardSummary};
use crate::services::{AppointmentManagementService, BookingService, DashboardService};
use crate::state::AppointmentState;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub selected: Option<NaiveDate>,
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date: NaiveDate,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ==============================================================================
// PATIENT BOOKING HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<AppointmentState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let service = BookingService::new(&state);
    let availability = service.availability(&query).await?;

    Ok(Json(availability))
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppointmentState>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let service = BookingService::new(&state);
    let appointment = service.book(request).await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppointmentState>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Appointment>, AppError> {
    let service = BookingService::new(&state);
    let appointment = service.get(&appointment_id).await?;

    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn lookup_patient_appointments(
    State(state): State<Arc<AppointmentState>>,
    Query(query): Query<PatientLookupQuery>,
) -> Result<Json<Value>, AppError> {
    let service = BookingService::new(&state);
    let appointments = service.lookup(&query).await?;

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppointmentState>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Appointment>, AppError> {
    let service = BookingService::new(&state);
    let appointment = service.cancel(&appointment_id).await?;

    Ok(Json(appointment))
}

// ==============================================================================
// STAFF HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn search_appointments(
    State(state): State<Arc<AppointmentState>>,
    Query(query): Query<AppointmentSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentManagementService::new(&state);
    let appointments = service.search(&query).await?;

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn accept_appointment(
    State(state): State<Arc<AppointmentState>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Appointment>, AppError> {
    let service = AppointmentManagementService::new(&state);
    let appointment = service.accept(&appointment_id).await?;

    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn reject_appointment(
    State(state): State<Arc<AppointmentState>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Appointment>, AppError> {
    let service = AppointmentManagementService::new(&state);
    let appointment = service.reject(&appointment_id).await?;

    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<AppointmentState>>,
    Path(appointment_id): Path<String>,
    Json(request): Json<UpdateAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let service = AppointmentManagementService::new(&state);
    let appointment = service.update(&appointment_id, request).await?;

    Ok(Json(appointment))
}

// ==============================================================================
// DASHBOARD HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_dashboard(
    State(state): State<Arc<AppointmentState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardSummary>, AppError> {
    let service = DashboardService::new(&state);
    let summary = service.summary(query.date.unwrap_or_else(today)).await?;

    Ok(Json(summary))
}

#[axum::debug_handler]
pub async fn get_calendar(
    State(state): State<Arc<AppointmentState>>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarMonth>, AppError> {
    let today = query.today.unwrap_or_else(today);
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());

    let service = DashboardService::new(&state);
    let calendar = service
        .calendar(year, month, today, query.selected.or(Some(today)))
        .await?;

    Ok(Json(calendar))
}

#[axum::debug_handler]
pub async fn get_day_appointments(
    State(state): State<Arc<AppointmentState>>,
    Query(query): Query<DayQuery>,
) -> Result<Json<Value>, AppError> {
    let service = DashboardService::new(&state);
    let appointments = service.day(query.date).await?;

    Ok(Json(json!({
        "date": query.date,
        "appointments": appointments,
        "total": appointments.len()
    })))
}
