use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::types::{ErrorBody, MessageBody, RadarrJson, ValidationFailure, empty_response};
use crate::clients::watcher3::SourceError;
use crate::services::{MovieError, SystemError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    UnknownRoute(String),

    Validation(Vec<ValidationFailure>),

    SourceRejected(String),

    SourceUnavailable(String),

    BadRequest(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::UnknownRoute(path) => write!(f, "Unknown request: {}", path),
            ApiError::Validation(failures) => {
                write!(f, "Validation failed: {} error(s)", failures.len())
            }
            ApiError::SourceRejected(msg) => write!(f, "Watcher3 rejected request: {}", msg),
            ApiError::SourceUnavailable(msg) => write!(f, "Watcher3 unavailable: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) => {
                tracing::debug!("Not found: {}", msg);
                RadarrJson(StatusCode::NOT_FOUND, MessageBody { message: "NotFound" })
                    .into_response()
            }
            ApiError::UnknownRoute(_) => empty_response(StatusCode::NOT_FOUND),
            ApiError::Validation(failures) => {
                RadarrJson(StatusCode::BAD_REQUEST, failures).into_response()
            }
            ApiError::SourceRejected(error) | ApiError::BadRequest(error) => {
                RadarrJson(StatusCode::BAD_REQUEST, ErrorBody { error }).into_response()
            }
            ApiError::SourceUnavailable(error) => {
                tracing::warn!("Watcher3 unavailable: {}", error);
                RadarrJson(StatusCode::METHOD_NOT_ALLOWED, ErrorBody { error }).into_response()
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                RadarrJson(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "An internal error occurred".to_string(),
                    },
                )
                .into_response()
            }
        }
    }
}

impl From<SourceError> for ApiError {
    fn from(err: SourceError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<MovieError> for ApiError {
    fn from(err: MovieError) -> Self {
        match err {
            MovieError::NotFound(id) => ApiError::NotFound(format!("Movie {}", id)),
            MovieError::Source(e) => e.into(),
            MovieError::Internal(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<SystemError> for ApiError {
    fn from(err: SystemError) -> Self {
        match err {
            SystemError::Unavailable(msg) => ApiError::SourceUnavailable(msg),
            SystemError::Source(e) => e.into(),
            SystemError::Internal(msg) => ApiError::InternalError(msg),
        }
    }
}

impl ApiError {
    pub fn unknown_route(path: impl Into<String>) -> Self {
        let path = path.into();
        tracing::info!("Unknown request: {}", path);
        ApiError::UnknownRoute(path)
    }

    pub fn validation(failure: ValidationFailure) -> Self {
        ApiError::Validation(vec![failure])
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }
}
