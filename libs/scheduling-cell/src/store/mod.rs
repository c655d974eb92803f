// libs/scheduling-cell/src/store/mod.rs
pub mod memory;
pub mod supabase;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Appointment, AppointmentStatus, StoreError};

pub use memory::InMemoryAppointmentStore;
pub use supabase::SupabaseAppointmentStore;

/// System of record for appointments. The store is the only mutable shared
/// resource; services never cache appointment state across requests.
///
/// Guarantees: `id` uniqueness, and `create` has durably persisted the record
/// before it returns. Listings are ordered ascending by `scheduled_at`.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn create(&self, appointment: Appointment) -> Result<Appointment, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, StoreError>;

    /// Exact-timestamp lookup used by the availability check. Appointments
    /// with `exclude_status` are ignored.
    async fn find_by_doctor_and_time(
        &self,
        doctor_id: Uuid,
        scheduled_at: DateTime<Utc>,
        exclude_status: AppointmentStatus,
    ) -> Result<Option<Appointment>, StoreError>;

    async fn list_by_patient(&self, patient_id: Uuid) -> Result<Vec<Appointment>, StoreError>;

    async fn list_by_doctor(&self, doctor_id: Uuid) -> Result<Vec<Appointment>, StoreError>;

    async fn update_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, StoreError>;
}
