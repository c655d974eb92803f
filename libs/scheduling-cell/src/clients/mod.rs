// libs/scheduling-cell/src/clients/mod.rs
//
// External collaborators: the user directory (patient/doctor profiles) and
// the media store (uploaded images). Both are owned by other services; this
// cell only reads from them through these seams.

pub mod memory;
pub mod supabase;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{DoctorProfile, ImageRef, StoreError};

pub use memory::{InMemoryMediaStore, InMemoryUserDirectory};
pub use supabase::{SupabaseMediaStore, SupabaseUserDirectory};

/// Patient and doctor profile lookups. Absence is an `Ok(None)` / `Ok(false)`
/// result, never an error; listings tolerate dangling references.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn doctor_exists(&self, doctor_id: Uuid) -> Result<bool, StoreError>;

    async fn patient_exists(&self, patient_id: Uuid) -> Result<bool, StoreError>;

    async fn get_doctor_name(&self, doctor_id: Uuid) -> Result<Option<String>, StoreError>;

    async fn get_patient_name(&self, patient_id: Uuid) -> Result<Option<String>, StoreError>;

    async fn list_doctors(&self) -> Result<Vec<DoctorProfile>, StoreError>;
}

/// Uploaded-image lookups. Booking snapshots the most recent image; a patient
/// with no uploads simply books without one.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn latest_image_for(&self, patient_id: Uuid) -> Result<Option<ImageRef>, StoreError>;
}
