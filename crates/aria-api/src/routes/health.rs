use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: HashMap<String, String>,
    /// Named configuration values that are not set
    pub missing_config: Vec<String>,
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let mut services = HashMap::new();

    let data_store = if state.config.supabase().is_some() { "supabase" } else { "in_memory" };
    services.insert("data_store".to_string(), data_store.to_string());
    services.insert("chat_model".to_string(), state.coach.settings().chat.model.clone());
    services.insert(
        "active_sessions".to_string(),
        state.coach.sessions().active_users().await.to_string(),
    );

    let missing: Vec<String> = state
        .config
        .missing_required()
        .into_iter()
        .map(String::from)
        .collect();
    let status = if missing.is_empty() { "healthy" } else { "degraded" };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services,
        missing_config: missing,
    })
}
