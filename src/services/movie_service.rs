//! Domain service for the movie catalog.
//!
//! Translates Watcher3's movie listings into Radarr movie records and
//! forwards add and search requests.

use thiserror::Error;

use crate::clients::watcher3::{SourceError, SourceResponse};
use crate::domain::MovieId;
use crate::models::MovieRecord;

#[derive(Debug, Error)]
pub enum MovieError {
    #[error("Movie not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    /// Lists the whole catalog, or the entries matching `id`.
    ///
    /// The whole catalog is built from the listing alone; a filtered lookup is
    /// also enriched with Watcher3's movie metadata.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] when Watcher3 has no matching movies
    /// or cannot be reached.
    async fn list(&self, id: Option<&MovieId>) -> Result<Vec<MovieRecord>, MovieError>;

    /// Looks up a single movie, taking the first match.
    async fn get(&self, id: &MovieId) -> Result<MovieRecord, MovieError> {
        self.list(Some(id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| MovieError::NotFound(id.to_string()))
    }

    /// Asks Watcher3 to add a movie and returns its raw reply.
    async fn add(&self, id: &MovieId) -> Result<SourceResponse, MovieError>;

    /// Runs Watcher3's release search for a movie and returns its raw reply.
    ///
    /// TMDb ids are resolved to the IMDb id first.
    async fn search(&self, id: &MovieId) -> Result<SourceResponse, MovieError>;
}
