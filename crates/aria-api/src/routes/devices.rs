use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use aria_types::{Device, DeviceKind};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub async fn list_devices(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Json<Vec<Device>> {
    Json(state.devices.list(&user_id).await)
}

pub async fn connect_device(
    State(state): State<Arc<AppState>>,
    Path((user_id, kind)): Path<(String, String)>,
) -> ApiResult<Json<Device>> {
    let kind: DeviceKind = kind.parse().map_err(ApiError::BadRequest)?;
    Ok(Json(state.devices.connect(&user_id, kind).await?))
}

pub async fn sync_device(
    State(state): State<Arc<AppState>>,
    Path((user_id, device_id)): Path<(String, String)>,
) -> ApiResult<Json<Device>> {
    Ok(Json(state.devices.sync(&user_id, &device_id).await?))
}

pub async fn disconnect_device(
    State(state): State<Arc<AppState>>,
    Path((user_id, device_id)): Path<(String, String)>,
) -> ApiResult<Json<Device>> {
    Ok(Json(state.devices.disconnect(&user_id, &device_id).await?))
}
