// libs/scheduling-cell/src/store/memory.rs
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Appointment, AppointmentStatus, StoreError};
use crate::store::AppointmentStore;

/// In-memory appointment store for the dev/test profile.
#[derive(Default)]
pub struct InMemoryAppointmentStore {
    appointments: RwLock<HashMap<Uuid, Appointment>>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut appointments: Vec<Appointment>) -> Vec<Appointment> {
        appointments.sort_by_key(|a| a.scheduled_at);
        appointments
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn create(&self, appointment: Appointment) -> Result<Appointment, StoreError> {
        let mut appointments = self.appointments.write().await;
        if appointments.contains_key(&appointment.id) {
            return Err(StoreError::Backend(format!(
                "duplicate appointment id {}",
                appointment.id
            )));
        }
        appointments.insert(appointment.id, appointment.clone());
        Ok(appointment)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, StoreError> {
        Ok(self.appointments.read().await.get(&id).cloned())
    }

    async fn find_by_doctor_and_time(
        &self,
        doctor_id: Uuid,
        scheduled_at: DateTime<Utc>,
        exclude_status: AppointmentStatus,
    ) -> Result<Option<Appointment>, StoreError> {
        let appointments = self.appointments.read().await;
        Ok(appointments
            .values()
            .find(|a| {
                a.doctor_id == doctor_id
                    && a.scheduled_at == scheduled_at
                    && a.status != exclude_status
            })
            .cloned())
    }

    async fn list_by_patient(&self, patient_id: Uuid) -> Result<Vec<Appointment>, StoreError> {
        let appointments = self.appointments.read().await;
        Ok(Self::sorted(
            appointments
                .values()
                .filter(|a| a.patient_id == patient_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_by_doctor(&self, doctor_id: Uuid) -> Result<Vec<Appointment>, StoreError> {
        let appointments = self.appointments.read().await;
        Ok(Self::sorted(
            appointments
                .values()
                .filter(|a| a.doctor_id == doctor_id)
                .cloned()
                .collect(),
        ))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, StoreError> {
        let mut appointments = self.appointments.write().await;
        let appointment = appointments.get_mut(&id).ok_or(StoreError::NotFound)?;
        appointment.status = status;
        appointment.updated_at = Utc::now();
        Ok(appointment.clone())
    }
}
