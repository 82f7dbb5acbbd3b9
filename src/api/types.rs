use axum::{
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::http::JSON_CONTENT_TYPE;
use crate::domain::MovieId;

/// JSON body rendered the way Radarr clients expect: indented with two
/// spaces and labelled `application/json; charset=utf-8`.
#[derive(Debug)]
pub struct RadarrJson<T>(pub StatusCode, pub T);

impl<T: Serialize> IntoResponse for RadarrJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_string_pretty(&self.1) {
            Ok(body) => (self.0, [(CONTENT_TYPE, JSON_CONTENT_TYPE)], body).into_response(),
            Err(e) => {
                tracing::error!("Failed to serialize response: {}", e);
                empty_response(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

#[must_use]
pub fn empty_response(status: StatusCode) -> Response {
    (status, [(CONTENT_TYPE, JSON_CONTENT_TYPE)]).into_response()
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    NotEmpty,
    MovieExists,
}

impl Validator {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotEmpty => "NotEmptyValidator",
            Self::MovieExists => "MovieExistsValidator",
        }
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotEmpty => "'Tmdb Id' must not be empty.",
            Self::MovieExists => "This movie has already been added",
        }
    }
}

/// One entry of Radarr's validation error array.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    pub property_name: &'static str,
    pub error_message: &'static str,
    pub attempted_value: i64,
    pub severity: &'static str,
    pub error_code: &'static str,
    pub formatted_message_arguments: Vec<Value>,
    pub formatted_message_placeholder_values: PlaceholderValues,
    pub resource_name: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderValues {
    pub property_name: &'static str,
    pub property_value: i64,
}

impl ValidationFailure {
    #[must_use]
    pub fn tmdb_id(validator: Validator, attempted_value: i64) -> Self {
        Self {
            property_name: "TmdbId",
            error_message: validator.message(),
            attempted_value,
            severity: "error",
            error_code: validator.code(),
            formatted_message_arguments: Vec::new(),
            formatted_message_placeholder_values: PlaceholderValues {
                property_name: "Tmdb Id",
                property_value: attempted_value,
            },
            resource_name: validator.code(),
        }
    }
}

/// Body of `POST /api/v3/movie`. Radarr clients send many more fields; only
/// the ids and `addOptions` are read.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddMovieRequest {
    pub tmdb_id: Option<Value>,
    pub imdb_id: Option<String>,
    pub add_options: Option<Value>,
}

impl AddMovieRequest {
    /// `tmdbId` wins over `imdbId`; zero and empty values count as missing.
    #[must_use]
    pub fn movie_id(&self) -> Option<MovieId> {
        let tmdb_id = match &self.tmdb_id {
            Some(Value::Number(n)) if n.as_i64() != Some(0) => Some(n.to_string()),
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        };

        tmdb_id.map(MovieId::Tmdb).or_else(|| {
            self.imdb_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(|id| MovieId::Imdb(id.to_string()))
        })
    }
}

/// Body of `POST /api/v3/Command/`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommandRequest {
    pub name: String,
    pub movie_ids: Vec<Value>,
}

impl CommandRequest {
    #[must_use]
    pub fn first_movie_id(&self) -> Option<MovieId> {
        let raw = match self.movie_ids.first()? {
            Value::String(id) => id.clone(),
            Value::Number(id) => id.to_string(),
            _ => return None,
        };
        Some(MovieId::new(raw))
    }
}
