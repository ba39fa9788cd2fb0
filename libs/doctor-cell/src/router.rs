use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::services::DoctorRoster;

pub fn doctor_routes(roster: Arc<DoctorRoster>) -> Router {
    Router::new()
        .route("/", get(handlers::list_doctors))
        .route("/{name}", get(handlers::get_doctor))
        .with_state(roster)
}
