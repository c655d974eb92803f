#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use uuid::Uuid;

use scheduling_cell::clients::{InMemoryMediaStore, InMemoryUserDirectory};
use scheduling_cell::services::locks::DoctorSlotLocks;
use scheduling_cell::store::InMemoryAppointmentStore;

pub struct TestBackends {
    pub store: Arc<InMemoryAppointmentStore>,
    pub directory: Arc<InMemoryUserDirectory>,
    pub media: Arc<InMemoryMediaStore>,
    pub slot_locks: DoctorSlotLocks,
}

impl TestBackends {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryAppointmentStore::new()),
            directory: Arc::new(InMemoryUserDirectory::new()),
            media: Arc::new(InMemoryMediaStore::new()),
            slot_locks: DoctorSlotLocks::new(),
        }
    }
}

/// Backends seeded with one doctor and one patient.
pub async fn clinic_with_one_doctor() -> (TestBackends, Uuid, Uuid) {
    let backends = TestBackends::new();
    let doctor_id = Uuid::new_v4();
    let patient_id = Uuid::new_v4();
    backends
        .directory
        .add_doctor(doctor_id, "Dr. Sara Haddad", "Cardiology")
        .await;
    backends.directory.add_patient(patient_id, "Omar Khalil").await;
    (backends, doctor_id, patient_id)
}

/// A future timestamp on the next clinic working day (Sunday through
/// Thursday), at the given time of day. Always strictly in the future.
pub fn future_slot(hour: u32, minute: u32) -> DateTime<Utc> {
    let mut day = Utc::now().date_naive() + Duration::days(1);
    while matches!(day.weekday(), Weekday::Fri | Weekday::Sat) {
        day += Duration::days(1);
    }
    day.and_hms_opt(hour, minute, 0)
        .expect("valid time of day")
        .and_utc()
}
