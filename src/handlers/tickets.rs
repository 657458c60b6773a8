use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::services::validation::{self, TicketValidation};
use crate::state::AppState;
use crate::utils::extract::ApiJson;
use crate::utils::response::success;

#[derive(Debug, Deserialize)]
pub struct ValidateTicketRequest {
    pub code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    #[serde(flatten)]
    pub result: TicketValidation,
    pub event_title: Option<String>,
}

impl ValidationReport {
    fn new(state: &AppState, result: TicketValidation) -> Self {
        let event_title = result
            .booking()
            .and_then(|booking| state.catalog.find(booking.event_id))
            .map(|event| event.title.clone());
        Self {
            result,
            event_title,
        }
    }
}

/// Manual entry.
pub async fn validate_ticket(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ValidateTicketRequest>,
) -> Response {
    let result = state.bookings().validate(&request.code);
    respond(&state, result)
}

/// Uploaded scan payload. The body is read as text; images are not decoded.
pub async fn validate_upload(State(state): State<AppState>, body: Bytes) -> Response {
    let bookings = state.bookings().list_all();
    let result = validation::validate_payload(&bookings, &body);
    respond(&state, result)
}

fn respond(state: &AppState, result: TicketValidation) -> Response {
    tracing::debug!(valid = result.is_valid(), "Ticket validated");
    let message = result.message().to_string();
    success(ValidationReport::new(state, result), message).into_response()
}
