use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::state::AppointmentState;

use crate::handlers::*;

pub fn patient_routes(state: Arc<AppointmentState>) -> Router {
    Router::new()
        .route("/", get(list_patients))
        .route("/{patient_id}", get(get_patient))
        .with_state(state)
}
