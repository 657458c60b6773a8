use serde::{Deserialize, Serialize};

use crate::models::event::EventId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendeeStatus {
    CheckedIn,
    Pending,
}

/// Dashboard-only attendee row. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub id: String,
    pub event_id: EventId,
    pub user_id: String,
    pub user_name: String,
    pub status: AttendeeStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_as_kebab_case() {
        assert_eq!(
            serde_json::to_string(&AttendeeStatus::CheckedIn).unwrap(),
            "\"checked-in\""
        );
        assert_eq!(
            serde_json::to_string(&AttendeeStatus::Pending).unwrap(),
            "\"pending\""
        );
    }
}
