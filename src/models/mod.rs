pub mod attendee;
pub mod booking;
pub mod event;

pub use attendee::{Attendee, AttendeeStatus};
pub use booking::{Booking, NewBooking};
pub use event::{Category, Event, EventId};
