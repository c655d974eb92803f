// libs/scheduling-cell/src/router.rs
use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use shared_config::CancellationWorkflow;
use shared_utils::extractor::auth_middleware;

use crate::handlers;
use crate::state::AppState;

/// Appointment routes. All operations require authentication. The
/// cancellation routes depend on the deployment profile: either the direct
/// patient cancel or the request/approve pair is mounted, never both.
pub fn appointment_routes(state: Arc<AppState>) -> Router {
    let mut protected_routes = Router::new()
        .route("/doctors", get(handlers::list_doctors))
        .route("/book", post(handlers::book_appointment))
        .route("/my-appointments", get(handlers::my_appointments))
        .route("/doctor-appointments", get(handlers::doctor_appointments));

    protected_routes = match state.config.cancellation_workflow {
        CancellationWorkflow::Direct => protected_routes
            .route("/cancel/{appointment_id}", delete(handlers::cancel_appointment)),
        CancellationWorkflow::RequestApprove => protected_routes
            .route(
                "/request-cancel/{appointment_id}",
                post(handlers::request_cancel_appointment),
            )
            .route(
                "/approve-cancel/{appointment_id}",
                post(handlers::approve_cancel_appointment),
            ),
    };

    let protected_routes = protected_routes
        .layer(middleware::from_fn_with_state(state.config.clone(), auth_middleware));

    Router::new().merge(protected_routes).with_state(state)
}
