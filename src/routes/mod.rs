use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::{apply_security_headers, create_cors_layer, Config};
use crate::handlers::{bookings, dashboard, events, health_check, tickets};
use crate::state::AppState;

pub fn create_routes(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/events", get(events::list_events))
        .route("/events/:id", get(events::get_event))
        .route("/bookings", post(bookings::create_booking))
        .route("/bookings/me", get(bookings::list_my_bookings))
        .route(
            "/bookings/:id",
            get(bookings::get_booking).delete(bookings::delete_booking),
        )
        .route("/tickets/validate", post(tickets::validate_ticket))
        .route("/tickets/validate/upload", post(tickets::validate_upload))
        .route("/dashboard", get(dashboard::organizer_dashboard))
        .with_state(state);

    apply_security_headers(router, config.production)
        .layer(create_cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
}
