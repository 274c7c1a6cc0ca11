pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::CorsConfig;
use crate::routes::{chat, coaching, devices, health};
use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    let user_routes = Router::new()
        .route("/chat", post(chat::chat))
        .route("/chat/stream", post(handlers::stream::chat_stream))
        .route("/history", get(chat::history).delete(chat::clear_history))
        .route("/workout-plan", post(coaching::workout_plan))
        .route("/meal-plan", post(coaching::meal_plan))
        .route("/motivation", post(coaching::motivation))
        .route("/progress", post(coaching::progress))
        .route("/plateau", post(coaching::plateau))
        .route("/form-analysis", post(coaching::form_analysis))
        .route("/devices", get(devices::list_devices))
        // matchit needs one parameter name per segment; device ids are kind names
        .route("/devices/:device_id/connect", post(devices::connect_device))
        .route("/devices/:device_id/sync", post(devices::sync_device))
        .route("/devices/:device_id", axum::routing::delete(devices::disconnect_device));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/users/:user_id", user_routes)
        .layer(axum_middleware::from_fn(middleware::logging::log_request))
        .layer(TimeoutLayer::new(Duration::from_secs(120))) // streaming replies included
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&state.config.cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    if !config.enabled {
        return CorsLayer::permissive();
    }

    let cors = CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers(Any);

    if config.origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<axum::http::HeaderValue> = config
        .origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    cors.allow_origin(origins)
}
