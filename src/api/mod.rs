use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::clients::watcher3::SourceApi;
use crate::config::Config;
use crate::models::watcher3::WatcherConfig;
use crate::services::{MovieService, SystemService, WatcherMovieService, WatcherSystemService};

mod command;
mod error;
pub mod movie_id;
mod movies;
mod observability;
mod profiles;
mod system;
pub mod types;

pub use error::ApiError;
pub use movie_id::MovieSelector;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub watcher_config: Arc<WatcherConfig>,

    pub movie_service: Arc<dyn MovieService>,

    pub system_service: Arc<dyn SystemService>,
}

impl AppState {
    #[must_use]
    pub fn watcher_config(&self) -> &WatcherConfig {
        &self.watcher_config
    }

    #[must_use]
    pub fn movie_service(&self) -> &Arc<dyn MovieService> {
        &self.movie_service
    }

    #[must_use]
    pub fn system_service(&self) -> &Arc<dyn SystemService> {
        &self.system_service
    }
}

#[must_use]
pub fn create_app_state(
    source: Arc<dyn SourceApi>,
    watcher_config: WatcherConfig,
    config: &Config,
) -> Arc<AppState> {
    let movie_service = Arc::new(WatcherMovieService::new(
        source.clone(),
        config.watcher3.release_country.clone(),
    ));

    let system_service = Arc::new(WatcherSystemService::new(
        source,
        watcher_config.root_folder(),
    ));

    Arc::new(AppState {
        watcher_config: Arc::new(watcher_config),
        movie_service,
        system_service,
    })
}

pub fn router(state: Arc<AppState>) -> Router {
    let unknown = observability::unknown_route;

    Router::new()
        .route(
            "/api/v3/movie",
            get(movies::get_movies)
                .put(movies::put_movie)
                .post(movies::add_movie)
                .fallback(unknown),
        )
        .route(
            "/api/v3/movie/",
            get(movies::get_movies)
                .put(movies::put_movie)
                .fallback(unknown),
        )
        .route(
            "/api/v3/movie/{movie_id}",
            get(movies::get_movies)
                .put(movies::put_movie)
                .fallback(unknown),
        )
        .route(
            "/api/v3/qualityProfile",
            get(profiles::list_profiles).fallback(unknown),
        )
        .route(
            "/api/v3/rootfolder",
            get(system::get_root_folders).fallback(unknown),
        )
        .route(
            "/api/v3/system/status",
            get(system::get_status).fallback(unknown),
        )
        .route("/api/v3/Command/", post(command::run_command).fallback(unknown))
        .fallback(unknown)
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
