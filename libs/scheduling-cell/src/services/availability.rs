// libs/scheduling-cell/src/services/availability.rs
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::models::{AppointmentStatus, StoreError};
use crate::store::AppointmentStore;

/// Point check: is this exact `(doctor, timestamp)` slot free? Equality only,
/// no tolerance window — the slot policy's half-hour grid is what makes an
/// exact match equivalent to "same slot".
pub struct AvailabilityChecker {
    store: Arc<dyn AppointmentStore>,
}

impl AvailabilityChecker {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self { store }
    }

    pub async fn is_available(
        &self,
        doctor_id: Uuid,
        scheduled_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let occupied = self
            .store
            .find_by_doctor_and_time(doctor_id, scheduled_at, AppointmentStatus::Cancelled)
            .await?;

        debug!(
            "Availability for doctor {} at {}: {}",
            doctor_id,
            scheduled_at,
            occupied.is_none()
        );

        Ok(occupied.is_none())
    }
}
