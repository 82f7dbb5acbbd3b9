//! Radarr movie endpoints backed by Watcher3's catalog.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, error, info};

use super::movie_id::MovieSelector;
use super::types::{AddMovieRequest, RadarrJson, ValidationFailure, Validator, empty_response};
use super::{ApiError, AppState};
use crate::domain::MovieId;
use crate::models::MovieRecord;

/// `GET /api/v3/movie[/{id}]`
///
/// Without an id the whole catalog is returned as an array; with one, the
/// first matching movie is returned as an object.
pub async fn get_movies(
    State(state): State<Arc<AppState>>,
    selector: MovieSelector,
) -> Result<Response, ApiError> {
    match selector.id() {
        Some(id) => {
            let movie = state.movie_service().get(id).await?;
            Ok(RadarrJson(StatusCode::OK, movie).into_response())
        }
        None => {
            let movies = state.movie_service().list(None).await?;
            Ok(RadarrJson(StatusCode::OK, movies).into_response())
        }
    }
}

/// `PUT /api/v3/movie[/{id}]`
///
/// Watcher3 has nothing to edit, so the request is acknowledged and dropped.
pub async fn put_movie(selector: MovieSelector) -> Response {
    info!(
        "PUT movie request: {}",
        selector.id().map_or("", MovieId::as_str)
    );
    info!("Doing nothing.");
    empty_response(StatusCode::OK)
}

/// `POST /api/v3/movie`
pub async fn add_movie(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<RadarrJson<MovieRecord>, ApiError> {
    let request: AddMovieRequest = serde_json::from_slice(&body).unwrap_or_else(|e| {
        debug!("Unreadable add movie body: {}", e);
        AddMovieRequest::default()
    });

    let Some(id) = request.movie_id() else {
        error!("No imdb or tmdb id provided for add_movie");
        return Err(ApiError::validation(ValidationFailure::tmdb_id(
            Validator::NotEmpty,
            0,
        )));
    };

    let movies = state.movie_service();
    let response = movies.add(&id).await?;

    if !response.is_success() {
        let message = response.error_message().unwrap_or_default();

        if message.contains("already exists") {
            let tmdb_id = match movies.get(&id).await {
                Ok(movie) => movie.tmdb_id,
                Err(e) => {
                    debug!("Could not look up existing movie {}: {}", id, e);
                    id.tmdb_number().unwrap_or_default()
                }
            };
            return Err(ApiError::validation(ValidationFailure::tmdb_id(
                Validator::MovieExists,
                tmdb_id,
            )));
        }

        return Err(ApiError::SourceRejected(message.to_string()));
    }

    let mut movie = movies.get(&id).await?;
    movie.add_options = request.add_options;

    Ok(RadarrJson(StatusCode::CREATED, movie))
}
