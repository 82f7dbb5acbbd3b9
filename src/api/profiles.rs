use axum::{extract::State, http::StatusCode};
use std::sync::Arc;

use super::AppState;
use super::types::RadarrJson;
use crate::quality::{QualityProfileRecord, build_profiles};

/// `GET /api/v3/qualityProfile`
///
/// Profiles come from the Watcher3 configuration read at startup.
pub async fn list_profiles(
    State(state): State<Arc<AppState>>,
) -> RadarrJson<Vec<QualityProfileRecord>> {
    RadarrJson(
        StatusCode::OK,
        build_profiles(&state.watcher_config().quality),
    )
}
