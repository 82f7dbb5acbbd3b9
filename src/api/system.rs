//! System API endpoints.
//!
//! Status and root folder answers are delegated to [`SystemService`]; both
//! turn an unreachable Watcher3 into a 405 with its error message.
//!
//! [`SystemService`]: crate::services::SystemService

use axum::{extract::State, http::StatusCode};
use std::sync::Arc;

use super::types::RadarrJson;
use super::{ApiError, AppState};
use crate::models::RootFolderRecord;
use crate::services::SystemStatus;

/// `GET /api/v3/system/status`
pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<RadarrJson<SystemStatus>, ApiError> {
    let status = state.system_service().get_status().await?;
    Ok(RadarrJson(StatusCode::OK, status))
}

/// `GET /api/v3/rootfolder`
pub async fn get_root_folders(
    State(state): State<Arc<AppState>>,
) -> Result<RadarrJson<Vec<RootFolderRecord>>, ApiError> {
    let folders = state.system_service().get_root_folders().await?;
    Ok(RadarrJson(StatusCode::OK, folders))
}
