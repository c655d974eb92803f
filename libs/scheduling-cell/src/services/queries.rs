// libs/scheduling-cell/src/services/queries.rs
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::clients::UserDirectory;
use crate::models::{Appointment, AppointmentView, StoreError};
use crate::store::AppointmentStore;

const UNKNOWN_NAME: &str = "Unknown";
const NO_REASON: &str = "-";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Read-only projections of a caller's appointments, joined with display
/// names from the user directory. A dangling patient/doctor reference is
/// rendered as "Unknown" rather than failing the listing.
pub struct QueryService {
    store: Arc<dyn AppointmentStore>,
    directory: Arc<dyn UserDirectory>,
}

impl QueryService {
    pub fn new(store: Arc<dyn AppointmentStore>, directory: Arc<dyn UserDirectory>) -> Self {
        Self { store, directory }
    }

    pub async fn list_for_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<AppointmentView>, StoreError> {
        debug!("Listing appointments for patient {}", patient_id);

        let appointments = self.store.list_by_patient(patient_id).await?;
        let mut views = Vec::with_capacity(appointments.len());

        for appointment in appointments {
            let doctor_name = self
                .directory
                .get_doctor_name(appointment.doctor_id)
                .await?
                .unwrap_or_else(|| UNKNOWN_NAME.to_string());

            views.push(Self::view(appointment, Some(doctor_name), None));
        }

        Ok(views)
    }

    pub async fn list_for_doctor(
        &self,
        doctor_id: Uuid,
    ) -> Result<Vec<AppointmentView>, StoreError> {
        debug!("Listing appointments for doctor {}", doctor_id);

        let appointments = self.store.list_by_doctor(doctor_id).await?;
        let mut views = Vec::with_capacity(appointments.len());

        for appointment in appointments {
            let patient_name = self
                .directory
                .get_patient_name(appointment.patient_id)
                .await?
                .unwrap_or_else(|| UNKNOWN_NAME.to_string());

            views.push(Self::view(appointment, None, Some(patient_name)));
        }

        Ok(views)
    }

    fn view(
        appointment: Appointment,
        doctor_name: Option<String>,
        patient_name: Option<String>,
    ) -> AppointmentView {
        AppointmentView {
            appointment_id: appointment.id,
            doctor_name,
            patient_name,
            date_time: appointment.scheduled_at.format(DATE_TIME_FORMAT).to_string(),
            status: appointment.status,
            reason: appointment.reason.unwrap_or_else(|| NO_REASON.to_string()),
            image_url: appointment.image_ref.map(|image| image.url),
        }
    }
}
