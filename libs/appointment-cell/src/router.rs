// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppointmentState;

pub fn appointment_routes(state: Arc<AppointmentState>) -> Router {
    Router::new()
        // Patient booking flow
        .route("/", post(handlers::book_appointment).get(handlers::search_appointments))
        .route("/availability", get(handlers::get_availability))
        .route("/lookup", get(handlers::lookup_patient_appointments))
        .route("/{appointment_id}", get(handlers::get_appointment).put(handlers::update_appointment))
        .route("/{appointment_id}/cancel", post(handlers::cancel_appointment))
        // Staff request handling
        .route("/{appointment_id}/accept", post(handlers::accept_appointment))
        .route("/{appointment_id}/reject", post(handlers::reject_appointment))
        .with_state(state)
}

pub fn dashboard_routes(state: Arc<AppointmentState>) -> Router {
    Router::new()
        .route("/", get(handlers::get_dashboard))
        .route("/calendar", get(handlers::get_calendar))
        .route("/day", get(handlers::get_day_appointments))
        .with_state(state)
}
