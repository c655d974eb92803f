// libs/scheduling-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{BookAppointmentRequest, BookingError, CancelError, StoreError};
use crate::services::booking::BookingService;
use crate::services::cancellation::CancellationService;
use crate::services::queries::QueryService;
use crate::state::AppState;

fn caller_id(user: &User) -> Result<Uuid, AppError> {
    Uuid::parse_str(&user.id)
        .map_err(|_| AppError::Auth("Invalid user id in token".to_string()))
}

fn require_patient(user: &User) -> Result<Uuid, AppError> {
    if !user.is_patient() {
        return Err(AppError::Forbidden(
            "Only patients may perform this action".to_string(),
        ));
    }
    caller_id(user)
}

fn require_doctor(user: &User) -> Result<Uuid, AppError> {
    if !user.is_doctor() {
        return Err(AppError::Forbidden(
            "Only doctors may perform this action".to_string(),
        ));
    }
    caller_id(user)
}

fn map_store_error(err: StoreError) -> AppError {
    match err {
        StoreError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        StoreError::Backend(msg) => AppError::Database(msg),
    }
}

fn map_directory_error(err: StoreError) -> AppError {
    match err {
        StoreError::NotFound => AppError::NotFound("Doctor not found".to_string()),
        StoreError::Backend(msg) => AppError::Database(msg),
    }
}

fn map_booking_error(err: BookingError) -> AppError {
    match err {
        BookingError::DoctorNotFound => AppError::NotFound("Doctor not found".to_string()),
        BookingError::InvalidSlot(slot_error) => AppError::BadRequest(slot_error.to_string()),
        BookingError::SlotTaken => {
            AppError::BadRequest("Doctor already has an appointment at this time".to_string())
        }
        BookingError::Store(store_error) => map_store_error(store_error),
    }
}

fn map_cancel_error(err: CancelError) -> AppError {
    match err {
        CancelError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        CancelError::NotOwner => AppError::Forbidden(err.to_string()),
        CancelError::NotTreatingDoctor => AppError::Forbidden(err.to_string()),
        CancelError::AlreadyCancelled
        | CancelError::CancellationAlreadyRequested
        | CancelError::AppointmentInPast
        | CancelError::NotPendingCancellation => AppError::BadRequest(err.to_string()),
        CancelError::Store(msg) => AppError::Database(msg),
    }
}

// ==============================================================================
// HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<AppState>>,
    Extension(_user): Extension<User>,
) -> Result<impl IntoResponse, AppError> {
    let doctors = state.directory.list_doctors().await.map_err(map_directory_error)?;
    Ok(Json(json!({ "doctors": doctors })))
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let patient_id = require_patient(&user)?;

    let booking_service = BookingService::new(
        Arc::clone(&state.store),
        Arc::clone(&state.directory),
        Arc::clone(&state.media),
        state.slot_locks.clone(),
    );

    let appointment = booking_service
        .book(patient_id, request.doctor_id, request.date_time, request.reason)
        .await
        .map_err(map_booking_error)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Appointment booked successfully",
            "appointment_id": appointment.id
        })),
    ))
}

#[axum::debug_handler]
pub async fn my_appointments(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse, AppError> {
    let patient_id = require_patient(&user)?;

    let query_service = QueryService::new(Arc::clone(&state.store), Arc::clone(&state.directory));
    let appointments = query_service
        .list_for_patient(patient_id)
        .await
        .map_err(map_store_error)?;

    Ok(Json(json!({ "appointments": appointments })))
}

#[axum::debug_handler]
pub async fn doctor_appointments(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse, AppError> {
    let doctor_id = require_doctor(&user)?;

    let query_service = QueryService::new(Arc::clone(&state.store), Arc::clone(&state.directory));
    let appointments = query_service
        .list_for_doctor(doctor_id)
        .await
        .map_err(map_store_error)?;

    Ok(Json(json!({ "appointments": appointments })))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<Uuid>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse, AppError> {
    let patient_id = require_patient(&user)?;

    let cancellation_service = CancellationService::new(Arc::clone(&state.store));
    cancellation_service
        .cancel(patient_id, appointment_id)
        .await
        .map_err(map_cancel_error)?;

    Ok(Json(json!({
        "message": "Appointment cancelled successfully",
        "appointment_id": appointment_id
    })))
}

#[axum::debug_handler]
pub async fn request_cancel_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<Uuid>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse, AppError> {
    let patient_id = require_patient(&user)?;

    let cancellation_service = CancellationService::new(Arc::clone(&state.store));
    cancellation_service
        .request_cancel(patient_id, appointment_id)
        .await
        .map_err(map_cancel_error)?;

    Ok(Json(json!({
        "message": "Cancellation requested, awaiting doctor approval",
        "appointment_id": appointment_id
    })))
}

#[axum::debug_handler]
pub async fn approve_cancel_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<Uuid>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse, AppError> {
    let doctor_id = require_doctor(&user)?;

    let cancellation_service = CancellationService::new(Arc::clone(&state.store));
    cancellation_service
        .approve_cancel(doctor_id, appointment_id)
        .await
        .map_err(map_cancel_error)?;

    Ok(Json(json!({
        "message": "Appointment cancelled successfully",
        "appointment_id": appointment_id
    })))
}
