// libs/scheduling-cell/src/services/cancellation.rs
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{AppointmentStatus, CancelError};
use crate::store::AppointmentStore;

/// The only writer of status transitions. Two workflows exist; the router
/// mounts exactly one of them per deployment profile.
pub struct CancellationService {
    store: Arc<dyn AppointmentStore>,
}

impl CancellationService {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self { store }
    }

    /// Direct cancel by the owning patient, effective immediately.
    /// Precondition order: exists, owner, not already cancelled, not in the
    /// past.
    pub async fn cancel(&self, patient_id: Uuid, appointment_id: Uuid) -> Result<(), CancelError> {
        debug!("Cancelling appointment {}", appointment_id);

        let appointment = self
            .store
            .find_by_id(appointment_id)
            .await?
            .ok_or(CancelError::NotFound)?;

        if appointment.patient_id != patient_id {
            return Err(CancelError::NotOwner);
        }

        if appointment.status == AppointmentStatus::Cancelled {
            return Err(CancelError::AlreadyCancelled);
        }

        if appointment.scheduled_at < Utc::now() {
            return Err(CancelError::AppointmentInPast);
        }

        self.store
            .update_status(appointment_id, AppointmentStatus::Cancelled)
            .await?;

        info!("Appointment {} cancelled by patient {}", appointment_id, patient_id);
        Ok(())
    }

    /// Two-step workflow, step one: the owning patient asks for
    /// cancellation. Only a `Scheduled` appointment can enter the pipeline.
    /// No past-date check applies on this path; the doctor decides.
    pub async fn request_cancel(
        &self,
        patient_id: Uuid,
        appointment_id: Uuid,
    ) -> Result<(), CancelError> {
        debug!("Cancellation requested for appointment {}", appointment_id);

        let appointment = self
            .store
            .find_by_id(appointment_id)
            .await?
            .ok_or(CancelError::NotFound)?;

        if appointment.patient_id != patient_id {
            return Err(CancelError::NotOwner);
        }

        match appointment.status {
            AppointmentStatus::Cancelled => return Err(CancelError::AlreadyCancelled),
            AppointmentStatus::PendingCancellation => {
                return Err(CancelError::CancellationAlreadyRequested)
            }
            AppointmentStatus::Scheduled => {}
        }

        self.store
            .update_status(appointment_id, AppointmentStatus::PendingCancellation)
            .await?;

        info!(
            "Appointment {} is pending cancellation, awaiting doctor approval",
            appointment_id
        );
        Ok(())
    }

    /// Two-step workflow, step two: the treating doctor approves. The record
    /// is marked `Cancelled`, never deleted, so the history stays auditable.
    pub async fn approve_cancel(
        &self,
        doctor_id: Uuid,
        appointment_id: Uuid,
    ) -> Result<(), CancelError> {
        debug!("Approving cancellation of appointment {}", appointment_id);

        let appointment = self
            .store
            .find_by_id(appointment_id)
            .await?
            .ok_or(CancelError::NotFound)?;

        if appointment.doctor_id != doctor_id {
            return Err(CancelError::NotTreatingDoctor);
        }

        if appointment.status != AppointmentStatus::PendingCancellation {
            return Err(CancelError::NotPendingCancellation);
        }

        self.store
            .update_status(appointment_id, AppointmentStatus::Cancelled)
            .await?;

        info!(
            "Cancellation of appointment {} approved by doctor {}",
            appointment_id, doctor_id
        );
        Ok(())
    }
}
