// libs/scheduling-cell/src/clients/memory.rs
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::clients::{MediaStore, UserDirectory};
use crate::models::{DoctorProfile, ImageRef, StoreError};

/// In-memory directory for the dev/test profile.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    doctors: RwLock<HashMap<Uuid, DoctorProfile>>,
    patients: RwLock<HashMap<Uuid, String>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_doctor(&self, id: Uuid, name: &str, specialty: &str) {
        self.doctors.write().await.insert(
            id,
            DoctorProfile {
                id,
                name: name.to_string(),
                specialty: specialty.to_string(),
            },
        );
    }

    pub async fn add_patient(&self, id: Uuid, name: &str) {
        self.patients.write().await.insert(id, name.to_string());
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn doctor_exists(&self, doctor_id: Uuid) -> Result<bool, StoreError> {
        Ok(self.doctors.read().await.contains_key(&doctor_id))
    }

    async fn patient_exists(&self, patient_id: Uuid) -> Result<bool, StoreError> {
        Ok(self.patients.read().await.contains_key(&patient_id))
    }

    async fn get_doctor_name(&self, doctor_id: Uuid) -> Result<Option<String>, StoreError> {
        Ok(self
            .doctors
            .read()
            .await
            .get(&doctor_id)
            .map(|d| d.name.clone()))
    }

    async fn get_patient_name(&self, patient_id: Uuid) -> Result<Option<String>, StoreError> {
        Ok(self.patients.read().await.get(&patient_id).cloned())
    }

    async fn list_doctors(&self) -> Result<Vec<DoctorProfile>, StoreError> {
        let mut doctors: Vec<DoctorProfile> = self.doctors.read().await.values().cloned().collect();
        doctors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(doctors)
    }
}

/// In-memory media store for the dev/test profile. Images are kept in upload
/// order per patient; the last entry is the latest.
#[derive(Default)]
pub struct InMemoryMediaStore {
    images: RwLock<HashMap<Uuid, Vec<ImageRef>>>,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_image(&self, patient_id: Uuid, image: ImageRef) {
        self.images.write().await.entry(patient_id).or_default().push(image);
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn latest_image_for(&self, patient_id: Uuid) -> Result<Option<ImageRef>, StoreError> {
        Ok(self
            .images
            .read()
            .await
            .get(&patient_id)
            .and_then(|images| images.last().cloned()))
    }
}
