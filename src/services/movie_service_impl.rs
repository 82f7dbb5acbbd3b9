//! Watcher3-backed implementation of the `MovieService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::clients::watcher3::{SourceApi, SourceResponse};
use crate::domain::MovieId;
use crate::models::MovieRecord;
use crate::models::watcher3::{ListStatus, MovieMetadata};
use crate::services::movie_service::{MovieError, MovieService};

pub struct WatcherMovieService {
    source: Arc<dyn SourceApi>,
    release_country: Option<String>,
}

impl WatcherMovieService {
    #[must_use]
    pub fn new(source: Arc<dyn SourceApi>, release_country: Option<String>) -> Self {
        Self {
            source,
            release_country,
        }
    }

    async fn listings(&self, id: Option<&MovieId>) -> Result<Vec<ListStatus>, MovieError> {
        let params: Vec<(&str, &str)> = id
            .map(|id| vec![(id.query_key(), id.as_str())])
            .unwrap_or_default();

        let response = self.source.get_data("liststatus", &params).await?;
        let listings: Vec<ListStatus> = match response.payload("movies") {
            Ok(listings) => listings,
            Err(e) => {
                warn!(
                    id = id.map(MovieId::as_str),
                    error = response.error_message(),
                    "Could not fetch movie data: {e}"
                );
                Vec::new()
            }
        };

        if listings.is_empty() {
            return Err(MovieError::NotFound(
                id.map_or_else(|| "catalog".to_string(), ToString::to_string),
            ));
        }

        Ok(listings)
    }

    /// `tmdb_data` of `movie_metadata`, or `None` when Watcher3 has none.
    async fn metadata(&self, imdb_id: &str) -> Result<Option<MovieMetadata>, MovieError> {
        let response = self
            .source
            .get_data("movie_metadata", &[("imdbid", imdb_id)])
            .await?;

        match response.payload("tmdb_data") {
            Ok(metadata) => Ok(Some(metadata)),
            Err(e) => {
                debug!(imdb_id, "Skipping metadata enrichment: {e}");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl MovieService for WatcherMovieService {
    async fn list(&self, id: Option<&MovieId>) -> Result<Vec<MovieRecord>, MovieError> {
        match id {
            Some(id) => debug!("Getting movie with id: {id}"),
            None => debug!("Getting all movies"),
        }

        let listings = self.listings(id).await?;

        // Listing records stat the finished file on disk.
        let mut movies = tokio::task::spawn_blocking(move || {
            listings
                .iter()
                .map(MovieRecord::from_listing)
                .collect::<Vec<_>>()
        })
        .await
        .map_err(|e| MovieError::Internal(e.to_string()))?;

        if id.is_some() {
            for movie in &mut movies {
                if let Some(metadata) = self.metadata(&movie.imdb_id).await? {
                    movie.enrich(&metadata, self.release_country.as_deref());
                }
            }
        }

        Ok(movies)
    }

    async fn add(&self, id: &MovieId) -> Result<SourceResponse, MovieError> {
        info!("Adding movie with id string: {}={id}", id.query_key());
        Ok(self
            .source
            .get_data("addmovie", &[(id.query_key(), id.as_str())])
            .await?)
    }

    async fn search(&self, id: &MovieId) -> Result<SourceResponse, MovieError> {
        let imdb_id = match id {
            MovieId::Imdb(imdb_id) => imdb_id.clone(),
            MovieId::Tmdb(_) => self.get(id).await?.imdb_id,
        };

        info!("Searching movie: {imdb_id}");
        Ok(self
            .source
            .get_data("search_results", &[("imdbid", &imdb_id)])
            .await?)
    }
}
