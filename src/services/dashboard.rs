//! Organizer dashboard.
//!
//! Organizer ownership and attendee check-in are not modelled anywhere, so
//! the organizer's events are the head of the catalog and the attendee list
//! is fixed demonstration data. Ticket counts come from real bookings.

use serde::Serialize;

use crate::models::{Attendee, AttendeeStatus, Booking, Event, EventId};
use crate::services::catalog::EventCatalog;

const ORGANIZER_EVENT_COUNT: usize = 2;
const FEATURED_EVENT_ID: EventId = 1;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizerEvent {
    pub event: Event,
    pub tickets_sold: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_events: usize,
    pub events: Vec<OrganizerEvent>,
    pub featured_event_id: EventId,
    pub attendees: Vec<Attendee>,
    pub checked_in: usize,
    pub pending: usize,
}

pub fn mock_attendees() -> Vec<Attendee> {
    [
        ("att1", "user1", "Alice", AttendeeStatus::CheckedIn),
        ("att2", "user2", "Bob", AttendeeStatus::Pending),
        ("att3", "user3", "Charlie", AttendeeStatus::Pending),
    ]
    .into_iter()
    .map(|(id, user_id, user_name, status)| Attendee {
        id: id.to_string(),
        event_id: FEATURED_EVENT_ID,
        user_id: user_id.to_string(),
        user_name: user_name.to_string(),
        status,
    })
    .collect()
}

pub fn summarize(catalog: &EventCatalog, bookings: &[Booking]) -> DashboardSummary {
    let events: Vec<OrganizerEvent> = catalog
        .all()
        .iter()
        .take(ORGANIZER_EVENT_COUNT)
        .map(|event| OrganizerEvent {
            tickets_sold: bookings.iter().filter(|b| b.event_id == event.id).count(),
            event: event.clone(),
        })
        .collect();

    let attendees = mock_attendees();
    let checked_in = attendees
        .iter()
        .filter(|a| a.status == AttendeeStatus::CheckedIn)
        .count();

    DashboardSummary {
        total_events: events.len(),
        events,
        featured_event_id: FEATURED_EVENT_ID,
        pending: attendees.len() - checked_in,
        checked_in,
        attendees,
    }
}
