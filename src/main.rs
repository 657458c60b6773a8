use axum::Router;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use eventify_server::config::Config;
use eventify_server::routes::create_routes;
use eventify_server::state::AppState;

const DEFAULT_LOG_FILTER: &str = "eventify_server=info,tower_http=info";

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env();
    let state = AppState::from_config(&config).expect("Failed to initialise application state");

    tracing::info!(
        events = state.catalog.all().len(),
        bookings = state.bookings().list_all().len(),
        "Booking store ready"
    );

    let app: Router = create_routes(state, &config);

    tracing::info!("🚀 Server running at http://{}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
