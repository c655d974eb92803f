use std::sync::Arc;

use axum::{routing::get, Router};

use scheduling_cell::router::appointment_routes;
use scheduling_cell::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic booking API is running!" }))
        .nest("/appointments", appointment_routes(state))
}
