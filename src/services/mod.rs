pub mod booking_store;
pub mod catalog;
pub mod dashboard;
pub mod qr;
pub mod validation;

pub use booking_store::{BookingStore, StoreError, BOOKINGS_KEY};
pub use catalog::EventCatalog;
pub use qr::QrService;
pub use validation::TicketValidation;
