use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::event::EventId;

/// A persisted ticket purchase.
///
/// Serialized as `{ id, eventId, userId, qrCode, createdAt }` with `createdAt`
/// as an ISO-8601 string, the layout existing saved collections use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub event_id: EventId,
    pub user_id: String,
    pub qr_code: String,
    pub created_at: DateTime<Utc>,
}

/// A booking before the store has assigned its id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub event_id: EventId,
    pub user_id: String,
    pub qr_code: String,
}
