//! Booking endpoints:
//! - POST /bookings - confirm a purchase for the signed-in user
//! - GET /bookings/me - the signed-in user's tickets
//! - GET /bookings/:id - a single ticket
//! - DELETE /bookings/:id - cancel a booking

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::identity::CurrentUser;
use crate::models::{Booking, Event, EventId, NewBooking};
use crate::services::qr;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::{ApiJson, ApiPath};
use crate::utils::response::{created, empty_success, success};

const MIN_QUANTITY: u32 = 1;
const MAX_QUANTITY: u32 = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub event_id: EventId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    MIN_QUANTITY
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub booking: Booking,
    pub event_title: String,
    pub quantity: u32,
    pub total: Decimal,
}

/// A booking as shown on the tickets page. `event` is `None` when the booking
/// points at an event the catalog no longer has.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketView {
    pub booking: Booking,
    pub event: Option<Event>,
    pub card_qr_code: String,
}

impl TicketView {
    fn build(state: &AppState, booking: Booking) -> Self {
        let card_qr_code = state
            .qr
            .styled_image_url(&qr::ticket_card_payload(&booking));
        Self {
            event: state.catalog.find(booking.event_id).cloned(),
            card_qr_code,
            booking,
        }
    }
}

pub async fn create_booking(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ApiJson(request): ApiJson<CreateBookingRequest>,
) -> Result<Response, AppError> {
    let event = state.catalog.find(request.event_id).ok_or_else(|| {
        AppError::NotFound(format!("Event with id '{}' was not found", request.event_id))
    })?;

    // One record per confirmation; quantity only affects the quoted total.
    let quantity = request.quantity.clamp(MIN_QUANTITY, MAX_QUANTITY);
    let payload = qr::ticket_payload(event.id, &user_id, Utc::now());
    let new_booking = NewBooking {
        event_id: event.id,
        user_id,
        qr_code: state.qr.image_url(&payload),
    };

    let booking = state.bookings().create(new_booking)?;
    tracing::info!(booking_id = %booking.id, event_id = event.id, "Booking confirmed");

    let confirmation = BookingConfirmation {
        booking,
        event_title: event.title.clone(),
        quantity,
        total: event.price * Decimal::from(quantity),
    };

    Ok(created(confirmation, "Your ticket has been booked successfully!").into_response())
}

pub async fn list_my_bookings(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Response {
    let bookings = state.bookings().list_by_user(&user_id);
    let tickets: Vec<TicketView> = bookings
        .into_iter()
        .map(|booking| TicketView::build(&state, booking))
        .collect();

    success(tickets, "Tickets retrieved").into_response()
}

pub async fn get_booking(
    State(state): State<AppState>,
    ApiPath(booking_id): ApiPath<String>,
) -> Result<Response, AppError> {
    let booking = state
        .bookings()
        .get(&booking_id)
        .ok_or_else(|| AppError::NotFound(format!("Booking with id '{}' was not found", booking_id)))?;

    Ok(success(TicketView::build(&state, booking), "Ticket retrieved").into_response())
}

pub async fn delete_booking(
    State(state): State<AppState>,
    ApiPath(booking_id): ApiPath<String>,
) -> Result<Response, AppError> {
    let deleted = state
        .bookings()
        .delete(&booking_id)
        .map_err(AppError::CancellationError)?;
    if !deleted {
        return Err(AppError::NotFound(format!(
            "Booking with id '{}' was not found",
            booking_id
        )));
    }

    tracing::info!(booking_id = %booking_id, "Booking cancelled");
    Ok(empty_success("Booking cancelled").into_response())
}
