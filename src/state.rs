use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::config::{Config, StorageBackend};
use crate::services::{BookingStore, EventCatalog, QrService};
use crate::storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to open booking storage: {0}")]
    Storage(#[from] StorageError),

    #[error("failed to load event catalog: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("invalid QR service URL: {0}")]
    QrService(#[from] url::ParseError),
}

/// Shared handler state. The booking store is synchronous, so every request
/// takes the same lock and store calls never interleave.
#[derive(Clone)]
pub struct AppState {
    bookings: Arc<Mutex<BookingStore>>,
    pub catalog: Arc<EventCatalog>,
    pub qr: Arc<QrService>,
}

impl AppState {
    pub fn new(storage: Box<dyn KeyValueStorage>, catalog: EventCatalog, qr: QrService) -> Self {
        Self {
            bookings: Arc::new(Mutex::new(BookingStore::new(storage))),
            catalog: Arc::new(catalog),
            qr: Arc::new(qr),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, StartupError> {
        let storage: Box<dyn KeyValueStorage> = match config.storage {
            StorageBackend::File => {
                tracing::info!(data_dir = %config.data_dir.display(), "Using file storage");
                Box::new(FileStorage::open(&config.data_dir)?)
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage, bookings will not survive a restart");
                Box::new(MemoryStorage::new())
            }
        };
        let catalog = EventCatalog::builtin()?;
        let qr = QrService::new(&config.qr_service_url, config.qr_size.clone())?;

        Ok(Self::new(storage, catalog, qr))
    }

    /// Locks the booking store. The store holds no in-memory state between
    /// calls, so a lock poisoned by a panicking request is recovered.
    pub fn bookings(&self) -> MutexGuard<'_, BookingStore> {
        self.bookings.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewBooking;
    use crate::services::qr::{DEFAULT_QR_SERVICE_URL, DEFAULT_QR_SIZE};

    fn state() -> AppState {
        AppState::new(
            Box::new(MemoryStorage::new()),
            EventCatalog::builtin().unwrap(),
            QrService::new(DEFAULT_QR_SERVICE_URL, DEFAULT_QR_SIZE).unwrap(),
        )
    }

    #[test]
    fn test_store_usable_after_panic_while_locked() {
        let state = state();
        state
            .bookings()
            .create(NewBooking {
                event_id: 1,
                user_id: "u1".to_string(),
                qr_code: "https://host/create?data=ABC".to_string(),
            })
            .unwrap();

        let shared = state.clone();
        let handle = std::thread::spawn(move || {
            let _guard = shared.bookings();
            panic!("request handler panicked");
        });
        assert!(handle.join().is_err());
        assert!(state.bookings.is_poisoned());

        let store = state.bookings();
        assert_eq!(store.list_by_user("u1").len(), 1);
    }
}
