pub mod movie_service;
pub use movie_service::{MovieError, MovieService};

pub mod movie_service_impl;
pub use movie_service_impl::WatcherMovieService;

pub mod system_service;
pub use system_service::{SystemError, SystemService, SystemStatus};

pub mod system_service_impl;
pub use system_service_impl::WatcherSystemService;
