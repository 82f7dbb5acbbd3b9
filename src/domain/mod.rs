//! Domain types shared by the services and the API layer.

use std::fmt;

/// A movie identifier as Radarr clients send it.
///
/// Watcher3 accepts either id on `liststatus`; only IMDb ids work for
/// `movie_metadata` and `search_results`.
///
/// # Examples
///
/// ```rust
/// use watcharr::domain::MovieId;
///
/// assert_eq!(MovieId::new("tt0133093"), MovieId::Imdb("tt0133093".to_string()));
/// assert_eq!(MovieId::new("603").query_key(), "tmdbid");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MovieId {
    Tmdb(String),
    Imdb(String),
}

impl MovieId {
    /// Ids starting with `tt` are IMDb ids, everything else is a TMDb id.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw.starts_with("tt") {
            Self::Imdb(raw)
        } else {
            Self::Tmdb(raw)
        }
    }

    /// Query parameter Watcher3 expects for this kind of id.
    #[must_use]
    pub const fn query_key(&self) -> &'static str {
        match self {
            Self::Tmdb(_) => "tmdbid",
            Self::Imdb(_) => "imdbid",
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Tmdb(id) | Self::Imdb(id) => id,
        }
    }

    /// Numeric TMDb id, if this is one.
    #[must_use]
    pub fn tmdb_number(&self) -> Option<i64> {
        match self {
            Self::Tmdb(id) => id.parse().ok(),
            Self::Imdb(_) => None,
        }
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
