//! Booking persistence.
//!
//! The whole collection lives in a single storage slot as a JSON array. Every
//! write replaces the slot wholesale, so after a successful `create` or
//! `delete` the slot holds exactly the collection computed by that call.
//!
//! Reads are fail-soft: a missing, unreadable or unparseable slot yields an
//! empty collection and a warning instead of an error. Writes are not: a
//! failed write is returned to the caller as [`StoreError::Write`].

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{Booking, NewBooking};
use crate::services::validation::{self, TicketValidation};
use crate::storage::{KeyValueStorage, StorageError};

/// Storage slot holding the serialized booking collection.
pub const BOOKINGS_KEY: &str = "eventify_bookings";

const ID_PREFIX: &str = "booking";
const ID_SUFFIX_LEN: usize = 9;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write `{key}` to storage")]
    Write {
        key: &'static str,
        #[source]
        source: StorageError,
    },

    #[error("failed to encode bookings")]
    Encode(#[from] serde_json::Error),
}

pub struct BookingStore<S = Box<dyn KeyValueStorage>> {
    storage: S,
}

impl<S: KeyValueStorage> BookingStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Assigns an id and timestamp, appends, and persists the full collection.
    pub fn create(&mut self, new_booking: NewBooking) -> Result<Booking, StoreError> {
        let mut bookings = self.list_all();
        let created_at = Utc::now();
        let booking = Booking {
            id: generate_booking_id(created_at),
            event_id: new_booking.event_id,
            user_id: new_booking.user_id,
            qr_code: new_booking.qr_code,
            created_at,
        };

        bookings.push(booking.clone());
        self.persist(&bookings)?;

        debug!(
            booking_id = %booking.id,
            event_id = booking.event_id,
            total = bookings.len(),
            "Booking saved"
        );
        Ok(booking)
    }

    pub fn list_all(&self) -> Vec<Booking> {
        match self.storage.get(BOOKINGS_KEY) {
            Ok(Some(raw)) => decode_bookings(&raw),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "Error loading bookings, returning none");
                Vec::new()
            }
        }
    }

    pub fn list_by_user(&self, user_id: &str) -> Vec<Booking> {
        self.list_all()
            .into_iter()
            .filter(|booking| booking.user_id == user_id)
            .collect()
    }

    pub fn get(&self, booking_id: &str) -> Option<Booking> {
        self.list_all()
            .into_iter()
            .find(|booking| booking.id == booking_id)
    }

    /// Returns whether the stored collection changed. An unknown id leaves the
    /// slot untouched.
    pub fn delete(&mut self, booking_id: &str) -> Result<bool, StoreError> {
        let bookings = self.list_all();
        let before = bookings.len();
        let remaining: Vec<Booking> = bookings
            .into_iter()
            .filter(|booking| booking.id != booking_id)
            .collect();

        if remaining.len() == before {
            debug!(booking_id, "Booking not found, nothing deleted");
            return Ok(false);
        }

        self.persist(&remaining)?;
        debug!(booking_id, total = remaining.len(), "Booking deleted");
        Ok(true)
    }

    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        self.storage
            .remove(BOOKINGS_KEY)
            .map_err(|source| StoreError::Write {
                key: BOOKINGS_KEY,
                source,
            })
    }

    pub fn validate(&self, code: &str) -> TicketValidation {
        validation::validate_code(&self.list_all(), code)
    }

    fn persist(&mut self, bookings: &[Booking]) -> Result<(), StoreError> {
        let encoded = encode_bookings(bookings)?;
        self.storage
            .set(BOOKINGS_KEY, &encoded)
            .map_err(|source| StoreError::Write {
                key: BOOKINGS_KEY,
                source,
            })
    }
}

pub fn encode_bookings(bookings: &[Booking]) -> Result<String, serde_json::Error> {
    serde_json::to_string(bookings)
}

/// Decodes a stored collection record by record. A document that is not a
/// JSON array decodes to nothing; individual records that do not fit the
/// booking schema are dropped.
pub fn decode_bookings(raw: &str) -> Vec<Booking> {
    let records: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(records) => records,
        Err(err) => {
            warn!(error = %err, "Stored bookings are not a JSON array, returning none");
            return Vec::new();
        }
    };

    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(booking) => Some(booking),
            Err(err) => {
                warn!(index, error = %err, "Dropping malformed booking record");
                None
            }
        })
        .collect()
}

/// `booking_<unix millis>_<9 random alphanumerics>`. Collisions are not checked.
fn generate_booking_id(at: DateTime<Utc>) -> String {
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(ID_SUFFIX_LEN)
        .collect();
    format!("{ID_PREFIX}_{}_{suffix}", at.timestamp_millis())
}
