use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::router::{appointment_routes, dashboard_routes};
use appointment_cell::state::AppointmentState;
use doctor_cell::router::doctor_routes;
use doctor_cell::services::DoctorRoster;
use patient_cell::router::patient_routes;

pub fn create_router(roster: Arc<DoctorRoster>, state: Arc<AppointmentState>) -> Router {
    Router::new()
        .route("/", get(|| async { "HealthBook API is running!" }))
        .nest("/doctors", doctor_routes(roster))
        .nest("/appointments", appointment_routes(state.clone()))
        .nest("/dashboard", dashboard_routes(state.clone()))
        .nest("/patients", patient_routes(state))
}
