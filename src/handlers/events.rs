use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::models::{Category, EventId};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::{ApiPath, ApiQuery};
use crate::utils::response::success;

#[derive(Debug, Default, Deserialize)]
pub struct EventQuery {
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub search: String,
}

pub async fn list_events(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<EventQuery>,
) -> Response {
    let events = state.catalog.search(query.category, &query.search);
    let message = if events.is_empty() {
        "No events found. Try adjusting your search or filters!"
    } else {
        "Events retrieved"
    };

    success(events, message).into_response()
}

pub async fn get_event(
    State(state): State<AppState>,
    ApiPath(event_id): ApiPath<EventId>,
) -> Result<Response, AppError> {
    let event = state
        .catalog
        .find(event_id)
        .ok_or_else(|| AppError::NotFound(format!("Event with id '{}' was not found", event_id)))?;

    Ok(success(event, "Event retrieved").into_response())
}
