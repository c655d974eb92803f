// libs/scheduling-cell/src/services/booking.rs
use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::clients::{MediaStore, UserDirectory};
use crate::models::{Appointment, AppointmentStatus, BookingError};
use crate::services::availability::AvailabilityChecker;
use crate::services::locks::DoctorSlotLocks;
use crate::services::slots;
use crate::store::AppointmentStore;

/// The only writer that brings appointments into existence. Orchestrates the
/// slot policy, the availability check and the store insert; the check and
/// the insert run under the doctor's slot lock so that two concurrent
/// bookings of the same slot cannot both succeed.
pub struct BookingService {
    store: Arc<dyn AppointmentStore>,
    directory: Arc<dyn UserDirectory>,
    media: Arc<dyn MediaStore>,
    availability: AvailabilityChecker,
    slot_locks: DoctorSlotLocks,
}

impl BookingService {
    pub fn new(
        store: Arc<dyn AppointmentStore>,
        directory: Arc<dyn UserDirectory>,
        media: Arc<dyn MediaStore>,
        slot_locks: DoctorSlotLocks,
    ) -> Self {
        let availability = AvailabilityChecker::new(Arc::clone(&store));
        Self {
            store,
            directory,
            media,
            availability,
            slot_locks,
        }
    }

    /// Book a slot. Check order matters for error precedence: doctor
    /// existence, then slot policy (past, hours, day, minutes), then
    /// availability.
    pub async fn book(
        &self,
        patient_id: Uuid,
        doctor_id: Uuid,
        scheduled_at: DateTime<Utc>,
        reason: Option<String>,
    ) -> Result<Appointment, BookingError> {
        // Slot identity is whole-second. A subsecond component would make the
        // stored timestamp and the availability lookup disagree on the key.
        let scheduled_at = scheduled_at.trunc_subsecs(0);

        info!(
            "Booking appointment for patient {} with doctor {} at {}",
            patient_id, doctor_id, scheduled_at
        );

        if !self.directory.doctor_exists(doctor_id).await? {
            return Err(BookingError::DoctorNotFound);
        }

        slots::is_valid_slot(scheduled_at)?;

        let lock = self.slot_locks.lock_for(doctor_id).await;
        let _guard = lock.lock().await;

        if !self.availability.is_available(doctor_id, scheduled_at).await? {
            warn!(
                "Slot conflict for doctor {} at {}",
                doctor_id, scheduled_at
            );
            return Err(BookingError::SlotTaken);
        }

        // Snapshot the patient's latest upload. No image, or an unreachable
        // media store, books the appointment without one.
        let image_ref = match self.media.latest_image_for(patient_id).await {
            Ok(image) => image,
            Err(e) => {
                warn!("Image snapshot unavailable for patient {}: {}", patient_id, e);
                None
            }
        };

        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_id,
            doctor_id,
            scheduled_at,
            reason,
            image_ref,
            status: AppointmentStatus::Scheduled,
            created_at: now,
            updated_at: now,
        };

        let created = self.store.create(appointment).await?;

        info!(
            "Appointment {} booked for patient {} with doctor {}",
            created.id, patient_id, doctor_id
        );

        Ok(created)
    }
}
