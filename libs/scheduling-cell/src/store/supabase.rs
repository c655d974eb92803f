// libs/scheduling-cell/src/store/supabase.rs
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_database::supabase::SupabaseClient;

use crate::models::{Appointment, AppointmentStatus, StoreError};
use crate::store::AppointmentStore;

/// Appointment store backed by the Supabase REST API. Requests run with the
/// service API key; row-level policies are not involved on this path.
pub struct SupabaseAppointmentStore {
    supabase: Arc<SupabaseClient>,
}

impl SupabaseAppointmentStore {
    pub fn new(supabase: Arc<SupabaseClient>) -> Self {
        Self { supabase }
    }

    fn timestamp_filter(scheduled_at: DateTime<Utc>) -> String {
        // "Z"-suffixed RFC 3339 keeps the filter free of characters that
        // would need URL encoding.
        scheduled_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    async fn get_rows(&self, path: &str) -> Result<Vec<Appointment>, StoreError> {
        let rows: Vec<Value> = self
            .supabase
            .request(Method::GET, path, None, None)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        rows.into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Appointment>, _>>()
            .map_err(|e| StoreError::Backend(format!("failed to parse appointment rows: {}", e)))
    }

    fn representation_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        headers
    }
}

#[async_trait]
impl AppointmentStore for SupabaseAppointmentStore {
    async fn create(&self, appointment: Appointment) -> Result<Appointment, StoreError> {
        let body = serde_json::to_value(&appointment)
            .map_err(|e| StoreError::Backend(format!("failed to serialize appointment: {}", e)))?;

        let rows: Vec<Appointment> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/appointments",
                None,
                Some(body),
                Some(Self::representation_headers()),
            )
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Backend("insert returned no rows".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, StoreError> {
        let path = format!("/rest/v1/appointments?id=eq.{}", id);
        Ok(self.get_rows(&path).await?.into_iter().next())
    }

    async fn find_by_doctor_and_time(
        &self,
        doctor_id: Uuid,
        scheduled_at: DateTime<Utc>,
        exclude_status: AppointmentStatus,
    ) -> Result<Option<Appointment>, StoreError> {
        let path = format!(
            "/rest/v1/appointments?doctor_id=eq.{}&scheduled_at=eq.{}&status=neq.{}",
            doctor_id,
            Self::timestamp_filter(scheduled_at),
            exclude_status
        );
        debug!("Slot lookup: {}", path);
        Ok(self.get_rows(&path).await?.into_iter().next())
    }

    async fn list_by_patient(&self, patient_id: Uuid) -> Result<Vec<Appointment>, StoreError> {
        let path = format!(
            "/rest/v1/appointments?patient_id=eq.{}&order=scheduled_at.asc",
            patient_id
        );
        self.get_rows(&path).await
    }

    async fn list_by_doctor(&self, doctor_id: Uuid) -> Result<Vec<Appointment>, StoreError> {
        let path = format!(
            "/rest/v1/appointments?doctor_id=eq.{}&order=scheduled_at.asc",
            doctor_id
        );
        self.get_rows(&path).await
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, StoreError> {
        let path = format!("/rest/v1/appointments?id=eq.{}", id);
        let body = json!({
            "status": status.to_string(),
            "updated_at": Utc::now().to_rfc3339(),
        });

        let rows: Vec<Appointment> = self
            .supabase
            .request_with_headers(
                Method::PATCH,
                &path,
                None,
                Some(body),
                Some(Self::representation_headers()),
            )
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        rows.into_iter().next().ok_or(StoreError::NotFound)
    }
}
