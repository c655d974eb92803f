// libs/scheduling-cell/src/services/locks.rs
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

/// Per-doctor serialization point for booking. Holding a doctor's lock across
/// the availability check and the insert makes check-then-insert atomic for
/// that doctor, which is what upholds slot exclusivity under concurrency.
///
/// Lock entries are created on first use and kept for the process lifetime;
/// the registry grows with the number of doctors, not with traffic.
#[derive(Clone, Default)]
pub struct DoctorSlotLocks {
    locks: Arc<Mutex<HashMap<Uuid, Arc<Mutex<()>>>>>,
}

impl DoctorSlotLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock_for(&self, doctor_id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(doctor_id).or_default().clone()
    }
}
