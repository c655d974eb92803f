// libs/scheduling-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// A booked slot with a doctor. `patient_id`, `doctor_id` and `scheduled_at`
/// are immutable after creation; only `status` ever changes, and only through
/// the cancellation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub reason: Option<String>,
    /// Snapshot of the patient's most recent uploaded image at booking time.
    /// Not kept in sync with later uploads.
    pub image_ref: Option<ImageRef>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// An appointment counts against its slot unless it has been cancelled.
    pub fn occupies_slot(&self) -> bool {
        self.status != AppointmentStatus::Cancelled
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Cancelled,
    PendingCancellation,
}

impl AppointmentStatus {
    /// Legal lifecycle transitions. There is no way back out of `Cancelled`,
    /// and a pending cancellation can only resolve to `Cancelled`.
    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        matches!(
            (self, next),
            (AppointmentStatus::Scheduled, AppointmentStatus::Cancelled)
                | (AppointmentStatus::Scheduled, AppointmentStatus::PendingCancellation)
                | (AppointmentStatus::PendingCancellation, AppointmentStatus::Cancelled)
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::PendingCancellation => write!(f, "pending_cancellation"),
        }
    }
}

/// Reference to an uploaded image, captured once at booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageRef {
    pub id: Uuid,
    pub url: String,
}

/// Doctor display data served by the directory collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorProfile {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub doctor_id: Uuid,
    pub date_time: DateTime<Utc>,
    pub reason: Option<String>,
}

/// Read-model row for appointment listings. Exactly one of `doctor_name` /
/// `patient_name` is set, depending on who is asking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentView {
    pub appointment_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    pub date_time: String,
    pub status: AppointmentStatus,
    pub reason: String,
    pub image_url: Option<String>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    #[error("Cannot book an appointment in the past")]
    InThePast,

    #[error("Appointment must be within working hours (10:00 - 16:00)")]
    OutsideWorkingHours,

    #[error("Appointments are only allowed from Sunday to Thursday")]
    NotAWorkingDay,

    #[error("Appointments must start at 00 or 30 minutes")]
    InvalidMinuteGranularity,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Storage backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("Doctor not found")]
    DoctorNotFound,

    #[error(transparent)]
    InvalidSlot(#[from] SlotError),

    #[error("Doctor already has an appointment at this time")]
    SlotTaken,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CancelError {
    #[error("Appointment not found")]
    NotFound,

    #[error("You are not allowed to cancel this appointment")]
    NotOwner,

    #[error("Appointment already cancelled")]
    AlreadyCancelled,

    #[error("Cancellation already requested for this appointment")]
    CancellationAlreadyRequested,

    #[error("Cannot cancel a past appointment")]
    AppointmentInPast,

    #[error("Appointment is not pending cancellation")]
    NotPendingCancellation,

    #[error("Only the treating doctor can approve this cancellation")]
    NotTreatingDoctor,

    #[error("Storage backend error: {0}")]
    Store(String),
}

impl From<StoreError> for CancelError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => CancelError::NotFound,
            StoreError::Backend(msg) => CancelError::Store(msg),
        }
    }
}
