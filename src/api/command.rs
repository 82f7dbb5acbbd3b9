use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, error};

use super::types::{CommandRequest, RadarrJson, empty_response};
use super::{ApiError, AppState};

const MOVIES_SEARCH: &str = "MoviesSearch";

/// `POST /api/v3/Command/`
///
/// Only `MoviesSearch` is understood; it runs a Watcher3 release search for
/// the first listed movie and returns Watcher3's reply unchanged.
pub async fn run_command(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: CommandRequest = serde_json::from_slice(&body).unwrap_or_else(|e| {
        debug!("Unreadable command body: {}", e);
        CommandRequest::default()
    });

    if request.name != MOVIES_SEARCH {
        error!("Unknown command: {}", request.name);
        return Ok(empty_response(StatusCode::NOT_FOUND));
    }

    let id = request
        .first_movie_id()
        .ok_or_else(|| ApiError::bad_request("MoviesSearch requires at least one movie id"))?;

    let results = state.movie_service().search(&id).await?;
    Ok(RadarrJson(StatusCode::OK, results).into_response())
}
