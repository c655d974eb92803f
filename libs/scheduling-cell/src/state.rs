// libs/scheduling-cell/src/state.rs
use std::sync::Arc;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::clients::{
    InMemoryMediaStore, InMemoryUserDirectory, MediaStore, SupabaseMediaStore,
    SupabaseUserDirectory, UserDirectory,
};
use crate::services::locks::DoctorSlotLocks;
use crate::store::{AppointmentStore, InMemoryAppointmentStore, SupabaseAppointmentStore};

/// Shared state behind the appointment routes: the store, the external
/// collaborators and the slot-lock registry. Built once at startup; the lock
/// registry must be shared across requests for its guarantee to hold.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn AppointmentStore>,
    pub directory: Arc<dyn UserDirectory>,
    pub media: Arc<dyn MediaStore>,
    pub slot_locks: DoctorSlotLocks,
}

impl AppState {
    /// Production profile: everything backed by Supabase REST.
    pub fn supabase(config: Arc<AppConfig>) -> Self {
        let supabase = Arc::new(SupabaseClient::new(&config));
        Self {
            config,
            store: Arc::new(SupabaseAppointmentStore::new(Arc::clone(&supabase))),
            directory: Arc::new(SupabaseUserDirectory::new(Arc::clone(&supabase))),
            media: Arc::new(SupabaseMediaStore::new(supabase)),
            slot_locks: DoctorSlotLocks::new(),
        }
    }

    /// Dev/test profile: in-memory backends, nothing leaves the process.
    pub fn in_memory(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            store: Arc::new(InMemoryAppointmentStore::new()),
            directory: Arc::new(InMemoryUserDirectory::new()),
            media: Arc::new(InMemoryMediaStore::new()),
            slot_locks: DoctorSlotLocks::new(),
        }
    }

    /// Custom backends (tests wire fakes through this).
    pub fn with_backends(
        config: Arc<AppConfig>,
        store: Arc<dyn AppointmentStore>,
        directory: Arc<dyn UserDirectory>,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        Self {
            config,
            store,
            directory,
            media,
            slot_locks: DoctorSlotLocks::new(),
        }
    }
}
