use std::sync::OnceLock;

use axum::extract::rejection::RawPathParamsRejection;
use axum::extract::{FromRequestParts, RawPathParams};
use axum::http::request::Parts;
use regex::Regex;

use super::ApiError;
use crate::domain::MovieId;

const PATH_PARAM: &str = "movie_id";

/// Which movies a `/api/v3/movie[/{id}]` request is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieSelector {
    All,
    One(MovieId),
}

impl MovieSelector {
    /// `""` selects the whole catalog, `tt…` an IMDb id and digits a TMDb id.
    /// Any other segment is not a movie path.
    #[must_use]
    pub fn from_segment(segment: &str) -> Option<Self> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| Regex::new(r"^(tt)?[0-9]*$").expect("Invalid regex"));

        if !re.is_match(segment) {
            return None;
        }

        Some(if segment.is_empty() {
            Self::All
        } else {
            Self::One(MovieId::new(segment))
        })
    }

    #[must_use]
    pub const fn id(&self) -> Option<&MovieId> {
        match self {
            Self::All => None,
            Self::One(id) => Some(id),
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for MovieSelector {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = match RawPathParams::from_request_parts(parts, state).await {
            Ok(params) => params,
            Err(RawPathParamsRejection::MissingPathParams(_)) => return Ok(Self::All),
            Err(_) => return Err(ApiError::unknown_route(parts.uri.path())),
        };

        let segment = params
            .iter()
            .find(|(name, _)| *name == PATH_PARAM)
            .map_or("", |(_, value)| value);

        Self::from_segment(segment).ok_or_else(|| ApiError::unknown_route(parts.uri.path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_routing() {
        assert_eq!(MovieSelector::from_segment(""), Some(MovieSelector::All));
        assert_eq!(
            MovieSelector::from_segment("123"),
            Some(MovieSelector::One(MovieId::Tmdb("123".to_string())))
        );
        assert_eq!(
            MovieSelector::from_segment("tt123"),
            Some(MovieSelector::One(MovieId::Imdb("tt123".to_string())))
        );
        assert_eq!(MovieSelector::from_segment("abc"), None);
        assert_eq!(MovieSelector::from_segment("123tt"), None);
        assert_eq!(MovieSelector::from_segment("tt12a"), None);
    }

    #[test]
    fn test_bare_imdb_prefix_is_an_id() {
        assert_eq!(
            MovieSelector::from_segment("tt"),
            Some(MovieSelector::One(MovieId::Imdb("tt".to_string())))
        );
    }
}
