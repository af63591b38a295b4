mod api;
mod auth;
mod config;
mod error;
mod models;
mod routes;
mod state;
mod views;

use std::net::SocketAddr;

use api::ApiClient;
use axum::http::{header, HeaderValue, Method};
use config::Config;
use routes::{create_router, AppState};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env file (from repo root)
    dotenvy::from_filename("../../.env").ok();
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("parkdesk_web=debug,tower_http=debug")),
        )
        .init();

    let config = Config::from_env();
    let port = config.server_port;

    let api = ApiClient::new(&config.api_base_url).expect("Failed to build backend client");
    tracing::info!("Backend API at {}/api", config.api_base_url);

    let state = AppState::new(api, config.clone());

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .cors_origin
                .parse::<HeaderValue>()
                .expect("CORS_ORIGIN must be a valid header value"),
        )
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::COOKIE])
        .allow_credentials(true);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!("parkdesk-web listening on {addr} (public URL {})", config.app_url);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    // The auth rate limiter keys on the peer address
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server failed");
}
