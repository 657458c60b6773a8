use axum::extract::State;
use axum::response::{IntoResponse, Response};

use crate::services::dashboard;
use crate::state::AppState;
use crate::utils::response::success;

pub async fn organizer_dashboard(State(state): State<AppState>) -> Response {
    let bookings = state.bookings().list_all();
    let summary = dashboard::summarize(&state.catalog, &bookings);

    success(summary, "Dashboard retrieved").into_response()
}
