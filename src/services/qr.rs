//! QR image URLs.
//!
//! No QR codes are rendered here. Tickets point at an external image service
//! with the ticket payload percent-encoded into the `data` query parameter.
//! Values are encoded like `encodeURIComponent`, so a space is `%20`, never
//! `+`, and stored QR strings match the ones browsers produced.

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::json;
use url::Url;

use crate::models::{Booking, EventId};

pub const DEFAULT_QR_SERVICE_URL: &str = "https://api.qrserver.com/v1/create-qr-code/";
pub const DEFAULT_QR_SIZE: &str = "200x200";

const TICKET_PREFIX: &str = "Eventify-Ticket";
const CARD_BACKGROUND: &str = "ffffff";
const CARD_FOREGROUND: &str = "0d1117";

/// Everything except the characters `encodeURIComponent` leaves alone.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

#[derive(Debug, Clone)]
pub struct QrService {
    base_url: Url,
    size: String,
}

impl QrService {
    pub fn new(base_url: &str, size: impl Into<String>) -> Result<Self, url::ParseError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            size: size.into(),
        })
    }

    pub fn image_url(&self, payload: &str) -> String {
        self.build(payload, &[])
    }

    /// Same as [`QrService::image_url`] with the ticket card's colour scheme.
    pub fn styled_image_url(&self, payload: &str) -> String {
        self.build(
            payload,
            &[("bgcolor", CARD_BACKGROUND), ("color", CARD_FOREGROUND)],
        )
    }

    fn build(&self, payload: &str, extra: &[(&str, &str)]) -> String {
        let mut pairs = vec![
            format!("size={}", encode_component(&self.size)),
            format!("data={}", encode_component(payload)),
        ];
        pairs.extend(
            extra
                .iter()
                .map(|(key, value)| format!("{key}={}", encode_component(value))),
        );

        // Appended as text: `Url::set_query` would re-escape `'`.
        let mut url = self.base_url.to_string();
        url.push(if self.base_url.query().is_some() { '&' } else { '?' });
        url.push_str(&pairs.join("&"));
        url
    }
}

/// Payload encoded at booking confirmation time.
pub fn ticket_payload(event_id: EventId, user_id: &str, at: DateTime<Utc>) -> String {
    format!(
        "{TICKET_PREFIX}-{event_id}-{user_id}-{}",
        at.timestamp_millis()
    )
}

/// Payload shown on a ticket card.
pub fn ticket_card_payload(booking: &Booking) -> String {
    json!({
        "eventId": booking.event_id,
        "userId": booking.user_id,
        "bookingId": booking.id,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn service() -> QrService {
        QrService::new(DEFAULT_QR_SERVICE_URL, DEFAULT_QR_SIZE).unwrap()
    }

    fn query_value(url: &str, key: &str) -> Option<String> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn test_ticket_payload_format() {
        let at = Utc.timestamp_millis_opt(1_718_000_000_000).unwrap();
        assert_eq!(
            ticket_payload(3, "user_2abc", at),
            "Eventify-Ticket-3-user_2abc-1718000000000"
        );
    }

    #[test]
    fn test_image_url_encodes_payload() {
        let payload = "Eventify-Ticket-1-user 1&x=2-1718000000000";
        let url = service().image_url(payload);

        assert!(url.starts_with(DEFAULT_QR_SERVICE_URL));
        assert!(!url.contains("user 1&x=2"));
        assert_eq!(query_value(&url, "data").as_deref(), Some(payload));
        assert_eq!(query_value(&url, "size").as_deref(), Some("200x200"));
    }

    #[test]
    fn test_space_and_plus_are_percent_encoded() {
        let url = service().image_url("user 1+vip");

        assert!(url.ends_with("?size=200x200&data=user%201%2Bvip"));
        assert_eq!(query_value(&url, "data").as_deref(), Some("user 1+vip"));
    }

    #[test]
    fn test_card_payload_encoding_matches_browser() {
        let url = service().styled_image_url(r#"{"userId":"o'neil (1)!"}"#);

        assert!(url.contains("data=%7B%22userId%22%3A%22o'neil%20(1)!%22%7D&bgcolor=ffffff"));
    }

    #[test]
    fn test_existing_base_query_is_kept() {
        let service = QrService::new("https://qr.example/render?format=png", "100x100").unwrap();
        let url = service.image_url("abc");

        assert_eq!(url, "https://qr.example/render?format=png&size=100x100&data=abc");
    }

    #[test]
    fn test_plain_payload_stays_readable_in_url() {
        let payload = "Eventify-Ticket-1-user_2abc-1718000000000";
        let url = service().image_url(payload);
        assert!(url.contains(payload));
    }

    #[test]
    fn test_styled_url_adds_colours() {
        let url = service().styled_image_url("x");
        assert_eq!(query_value(&url, "bgcolor").as_deref(), Some("ffffff"));
        assert_eq!(query_value(&url, "color").as_deref(), Some("0d1117"));
    }

    #[test]
    fn test_card_payload_carries_booking_id() {
        let booking = Booking {
            id: "booking_42".to_string(),
            event_id: 2,
            user_id: "u1".to_string(),
            qr_code: String::new(),
            created_at: Utc::now(),
        };

        let payload: serde_json::Value =
            serde_json::from_str(&ticket_card_payload(&booking)).unwrap();
        assert_eq!(payload["bookingId"], "booking_42");
        assert_eq!(payload["eventId"], 2);
        assert_eq!(payload["userId"], "u1");
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(QrService::new("not a url", DEFAULT_QR_SIZE).is_err());
    }
}
