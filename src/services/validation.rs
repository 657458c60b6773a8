//! Ticket code validation.
//!
//! A presented code matches a booking when the booking's QR string contains
//! the code, or the code contains the booking id. The first match in
//! collection order wins. This is a loose containment check, not an
//! authenticity check.

use serde::Serialize;

use crate::models::Booking;

pub const VALID_MESSAGE: &str = "Ticket is valid! Entry granted.";
pub const INVALID_MESSAGE: &str = "Invalid ticket. Entry denied.";
pub const ERROR_MESSAGE: &str = "Error validating ticket. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TicketValidation {
    Valid { booking: Booking, message: String },
    Invalid { message: String },
    Error { message: String },
}

impl TicketValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, TicketValidation::Valid { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            TicketValidation::Valid { message, .. }
            | TicketValidation::Invalid { message }
            | TicketValidation::Error { message } => message,
        }
    }

    pub fn booking(&self) -> Option<&Booking> {
        match self {
            TicketValidation::Valid { booking, .. } => Some(booking),
            _ => None,
        }
    }
}

pub fn find_matching_booking<'a>(bookings: &'a [Booking], code: &str) -> Option<&'a Booking> {
    bookings
        .iter()
        .find(|booking| booking.qr_code.contains(code) || code.contains(booking.id.as_str()))
}

/// Validates a manually entered or pre-decoded code.
///
/// The code is matched verbatim. An empty code is a substring of every QR
/// string, so it admits the first booking on file.
pub fn validate_code(bookings: &[Booking], code: &str) -> TicketValidation {
    match find_matching_booking(bookings, code) {
        Some(booking) => TicketValidation::Valid {
            booking: booking.clone(),
            message: VALID_MESSAGE.to_string(),
        },
        None => TicketValidation::Invalid {
            message: INVALID_MESSAGE.to_string(),
        },
    }
}

/// Validates an uploaded payload. Only UTF-8 text is accepted; no image
/// decoding is attempted. Undecodable bytes are the only input that yields
/// `TicketValidation::Error`.
pub fn validate_payload(bookings: &[Booking], payload: &[u8]) -> TicketValidation {
    match std::str::from_utf8(payload) {
        Ok(code) => validate_code(bookings, code),
        Err(err) => {
            tracing::debug!(error = %err, "Uploaded ticket payload is not text");
            TicketValidation::Error {
                message: ERROR_MESSAGE.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn booking(id: &str, qr_code: &str) -> Booking {
        Booking {
            id: id.to_string(),
            event_id: 1,
            user_id: "u1".to_string(),
            qr_code: qr_code.to_string(),
            created_at: Utc::now(),
        }
    }

    fn sample() -> Vec<Booking> {
        vec![
            booking("booking_7", "https://host/create?data=ABC999"),
            booking("booking_42", "https://host/create?size=200x200&data=XYZ123&x=1"),
        ]
    }

    #[test]
    fn test_qr_substring_matches() {
        let bookings = sample();
        let outcome = validate_code(&bookings, "XYZ123");

        assert!(outcome.is_valid());
        assert_eq!(outcome.booking().map(|b| b.id.as_str()), Some("booking_42"));
        assert_eq!(outcome.message(), VALID_MESSAGE);
    }

    #[test]
    fn test_code_containing_booking_id_matches() {
        let bookings = sample();

        let outcome = validate_code(&bookings, "booking_42");
        assert_eq!(outcome.booking().map(|b| b.id.as_str()), Some("booking_42"));

        let outcome = validate_code(&bookings, "scanned: booking_42\n");
        assert_eq!(outcome.booking().map(|b| b.id.as_str()), Some("booking_42"));
    }

    #[test]
    fn test_unrelated_code_is_invalid() {
        let outcome = validate_code(&sample(), "nonsense");

        assert_eq!(
            outcome,
            TicketValidation::Invalid {
                message: INVALID_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_first_match_wins() {
        let bookings = vec![
            booking("booking_1", "https://host/create?data=SHARED"),
            booking("booking_2", "https://host/create?data=SHARED"),
        ];

        let outcome = validate_code(&bookings, "SHARED");
        assert_eq!(outcome.booking().map(|b| b.id.as_str()), Some("booking_1"));
    }

    #[test]
    fn test_empty_code_matches_first_booking() {
        let bookings = sample();

        let outcome = validate_code(&bookings, "");
        assert_eq!(outcome.booking().map(|b| b.id.as_str()), Some("booking_7"));

        let only = vec![booking("booking_42", "https://host/create?data=XYZ123")];
        let outcome = validate_payload(&only, b"");
        assert!(outcome.is_valid());
        assert_eq!(outcome.booking().map(|b| b.id.as_str()), Some("booking_42"));
    }

    #[test]
    fn test_whitespace_code_is_invalid_not_an_error() {
        let outcome = validate_code(&sample(), "   ");

        assert_eq!(
            outcome,
            TicketValidation::Invalid {
                message: INVALID_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_empty_store_never_matches() {
        assert!(!validate_code(&[], "booking_42").is_valid());
    }

    #[test]
    fn test_binary_payload_is_an_error() {
        let outcome = validate_payload(&sample(), &[0x89, 0x50, 0x4e, 0x47, 0xff, 0xfe]);
        assert!(matches!(outcome, TicketValidation::Error { .. }));
        assert_eq!(outcome.message(), ERROR_MESSAGE);
    }

    #[test]
    fn test_text_payload_is_validated() {
        let outcome = validate_payload(&sample(), b"XYZ123");
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_outcome_serializes_with_tag() {
        let json = serde_json::to_value(validate_code(&sample(), "nonsense")).unwrap();
        assert_eq!(json["outcome"], "invalid");
        assert_eq!(json["message"], INVALID_MESSAGE);
    }
}
