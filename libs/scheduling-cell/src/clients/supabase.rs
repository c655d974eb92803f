// libs/scheduling-cell/src/clients/supabase.rs
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use shared_database::supabase::SupabaseClient;

use crate::clients::{MediaStore, UserDirectory};
use crate::models::{DoctorProfile, ImageRef, StoreError};

pub struct SupabaseUserDirectory {
    supabase: Arc<SupabaseClient>,
}

impl SupabaseUserDirectory {
    pub fn new(supabase: Arc<SupabaseClient>) -> Self {
        Self { supabase }
    }

    async fn get_rows(&self, path: &str) -> Result<Vec<Value>, StoreError> {
        self.supabase
            .request(Method::GET, path, None, None)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

#[async_trait]
impl UserDirectory for SupabaseUserDirectory {
    async fn doctor_exists(&self, doctor_id: Uuid) -> Result<bool, StoreError> {
        let path = format!("/rest/v1/doctors?id=eq.{}&select=id", doctor_id);
        Ok(!self.get_rows(&path).await?.is_empty())
    }

    async fn patient_exists(&self, patient_id: Uuid) -> Result<bool, StoreError> {
        let path = format!("/rest/v1/patients?id=eq.{}&select=id", patient_id);
        Ok(!self.get_rows(&path).await?.is_empty())
    }

    async fn get_doctor_name(&self, doctor_id: Uuid) -> Result<Option<String>, StoreError> {
        let path = format!("/rest/v1/doctors?id=eq.{}&select=name", doctor_id);
        let rows = self.get_rows(&path).await?;
        Ok(rows
            .first()
            .and_then(|row| row["name"].as_str())
            .map(|name| name.to_string()))
    }

    async fn get_patient_name(&self, patient_id: Uuid) -> Result<Option<String>, StoreError> {
        let path = format!("/rest/v1/patients?id=eq.{}&select=name", patient_id);
        let rows = self.get_rows(&path).await?;
        Ok(rows
            .first()
            .and_then(|row| row["name"].as_str())
            .map(|name| name.to_string()))
    }

    async fn list_doctors(&self) -> Result<Vec<DoctorProfile>, StoreError> {
        let path = "/rest/v1/doctors?select=id,name,specialty&order=name.asc";
        debug!("Listing doctors: {}", path);
        let rows = self.get_rows(path).await?;
        rows.into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<DoctorProfile>, _>>()
            .map_err(|e| StoreError::Backend(format!("failed to parse doctor rows: {}", e)))
    }
}

pub struct SupabaseMediaStore {
    supabase: Arc<SupabaseClient>,
}

impl SupabaseMediaStore {
    pub fn new(supabase: Arc<SupabaseClient>) -> Self {
        Self { supabase }
    }
}

#[async_trait]
impl MediaStore for SupabaseMediaStore {
    async fn latest_image_for(&self, patient_id: Uuid) -> Result<Option<ImageRef>, StoreError> {
        let path = format!(
            "/rest/v1/images?patient_id=eq.{}&select=id,url&order=id.desc&limit=1",
            patient_id
        );
        let rows: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, None, None)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let Some(row) = rows.into_iter().next() else {
            return Ok(None);
        };

        let mut image: ImageRef = serde_json::from_value(row)
            .map_err(|e| StoreError::Backend(format!("failed to parse image row: {}", e)))?;

        // Rows hold a storage path; listings need the public URL.
        if image.url.starts_with('/') {
            image.url = self.supabase.get_public_url(&image.url);
        }

        Ok(Some(image))
    }
}
