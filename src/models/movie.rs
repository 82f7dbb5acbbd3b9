//! Radarr-shaped movie records built from Watcher3 data.
//!
//! A record starts from a `liststatus` entry ([`MovieRecord::from_listing`])
//! and can be enriched with the per-title `movie_metadata` payload
//! ([`MovieRecord::enrich`]). Enrichment only overwrites the fields it has
//! data for; anything missing in the metadata leaves the listing value alone.

use std::path::Path;

use chrono::{DateTime, NaiveDate};
use serde::{Serialize, Serializer};

use crate::constants::movie::{ALTERNATE_TITLE_FIRST_ID, MIDNIGHT_UTC_SUFFIX, TMDB_IMAGE_BASE_URL};
use crate::models::watcher3::{ListStatus, MovieMetadata, ReleaseDate, release_type};

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub tmdb_id: i64,
    pub imdb_id: String,
    pub title: String,
    pub original_title: String,
    pub sort_title: String,
    pub size_on_disk: u64,
    pub overview: String,
    pub images: Vec<MovieImage>,
    pub website: String,
    /// Serialized as an empty string when Watcher3 has no numeric year.
    #[serde(serialize_with = "year_or_empty")]
    pub year: Option<i32>,
    pub you_tube_trailer_id: String,
    pub studio: String,
    pub clean_title: String,
    pub title_slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added: Option<String>,
    pub ratings: Ratings,
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_cinemas: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_release: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digital_release: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certification: Option<String>,
    pub alternate_titles: Vec<AlternateTitle>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_options: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MovieImage {
    pub cover_type: CoverType,
    #[serde(rename = "remoteURL")]
    pub remote_url: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CoverType {
    Poster,
    Fanart,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Ratings {
    pub votes: i64,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlternateTitle {
    pub source_type: &'static str,
    pub movie_id: i64,
    pub title: String,
    pub source_id: i64,
    pub votes: i64,
    pub vote_count: i64,
    pub language: Language,
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Language {
    pub id: i32,
    pub name: &'static str,
}

impl Language {
    // Watcher3 carries no language for alternate titles.
    pub const ENGLISH: Self = Self {
        id: 1,
        name: "English",
    };
}

impl AlternateTitle {
    fn tmdb(movie_id: i64, title: impl Into<String>, id: i64) -> Self {
        Self {
            source_type: "tmdb",
            movie_id,
            title: title.into(),
            source_id: movie_id,
            votes: 0,
            vote_count: 0,
            language: Language::ENGLISH,
            id,
        }
    }
}

fn year_or_empty<S: Serializer>(year: &Option<i32>, serializer: S) -> Result<S::Ok, S::Error> {
    match year {
        Some(year) => serializer.serialize_i32(*year),
        None => serializer.serialize_str(""),
    }
}

/// Appends the UTC midnight suffix to a Watcher3 `YYYY-MM-DD` date, or drops an empty one.
fn listing_date(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| format!("{value}{MIDNIGHT_UTC_SUFFIX}"))
}

/// TMDb release dates arrive as full timestamps; Radarr wants the date at UTC midnight.
fn metadata_date(value: &str) -> Option<String> {
    let date = DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(value.get(..10)?, "%Y-%m-%d").ok())?;
    Some(format!("{}{MIDNIGHT_UTC_SUFFIX}", date.format("%Y-%m-%d")))
}

/// Size of the file at `path`, or 0 when it is not a regular file.
fn file_size(path: &str) -> u64 {
    std::fs::metadata(Path::new(path))
        .ok()
        .filter(std::fs::Metadata::is_file)
        .map_or(0, |meta| meta.len())
}

/// Movie folder for a finished file: its first three `/` segments.
///
/// This assumes the library layout `/<root>/<movie folder>/<file>`, so for an
/// absolute path the result is `/<root>/<movie folder>`.
fn movie_folder(finished_file: &str) -> String {
    finished_file
        .split('/')
        .take(3)
        .collect::<Vec<_>>()
        .join("/")
}

impl MovieRecord {
    #[must_use]
    pub fn from_listing(listing: &ListStatus) -> Self {
        let tmdb_id = listing.tmdbid;

        let mut record = Self {
            tmdb_id,
            imdb_id: listing.imdbid.clone(),
            title: listing.title.clone(),
            original_title: listing.title.clone(),
            sort_title: listing.sort_title.to_lowercase(),
            overview: listing.plot.clone(),
            year: listing.year.trim().parse().ok(),
            clean_title: listing.title.replace(' ', "").to_lowercase(),
            title_slug: tmdb_id.to_string(),
            added: listing_date(&listing.added_date),
            ratings: Ratings {
                votes: 0,
                value: listing.score,
            },
            id: tmdb_id,
            in_cinemas: listing_date(&listing.release_date),
            physical_release: listing_date(&listing.media_release_date),
            certification: (!listing.rated.is_empty()).then(|| listing.rated.clone()),
            ..Self::default()
        };

        if !listing.finished_file.is_empty() {
            record.size_on_disk = file_size(&listing.finished_file);
            let folder = movie_folder(&listing.finished_file);
            record.folder_name = Some(folder.clone());
            record.path = Some(folder);
        }

        if !listing.alternative_titles.is_empty() {
            record.alternate_titles = listing
                .alternative_titles
                .split(',')
                .zip(ALTERNATE_TITLE_FIRST_ID..)
                .map(|(title, id)| AlternateTitle::tmdb(tmdb_id, title, id))
                .collect();
        }

        record
    }

    /// Overlays metadata onto the record.
    ///
    /// `release_country` overrides the country whose release dates are used;
    /// without it the first production country is taken, and with neither no
    /// country-scoped dates are applied.
    pub fn enrich(&mut self, metadata: &MovieMetadata, release_country: Option<&str>) {
        if let Some(status) = &metadata.status {
            self.status = Some(status.to_lowercase());
        }
        if let Some(homepage) = &metadata.homepage {
            self.website.clone_from(homepage);
        }
        if metadata.runtime.is_some() {
            self.runtime = metadata.runtime;
        }
        if metadata.vote_count.is_some() || metadata.vote_average.is_some() {
            self.ratings = Ratings {
                votes: metadata.vote_count.unwrap_or_default(),
                value: metadata.vote_average.unwrap_or_default(),
            };
        }

        if let Some(company) = metadata.production_companies.first() {
            self.studio.clone_from(&company.name);
        }

        let country = release_country.or_else(|| {
            metadata
                .production_countries
                .first()
                .map(|c| c.iso_3166_1.as_str())
        });

        if let Some(releases) = country.and_then(|country| {
            metadata
                .release_dates
                .results
                .iter()
                .find(|r| r.iso_3166_1.eq_ignore_ascii_case(country))
        }) {
            self.apply_release_dates(&releases.release_dates);
        }

        self.images = [
            (CoverType::Poster, &metadata.poster_path),
            (CoverType::Fanart, &metadata.backdrop_path),
        ]
        .into_iter()
        .filter_map(|(cover_type, path)| {
            path.as_deref()
                .filter(|p| !p.is_empty())
                .map(|p| MovieImage {
                    cover_type,
                    remote_url: format!("{TMDB_IMAGE_BASE_URL}{p}"),
                })
        })
        .collect();

        self.genres = metadata.genres.iter().map(|g| g.name.clone()).collect();

        let movie_id = metadata.id.unwrap_or(self.tmdb_id);
        self.alternate_titles = metadata
            .alternative_titles
            .titles
            .iter()
            .zip(ALTERNATE_TITLE_FIRST_ID..)
            .map(|(alt, id)| AlternateTitle::tmdb(movie_id, alt.title.clone(), id))
            .collect();
    }

    fn apply_release_dates(&mut self, releases: &[ReleaseDate]) {
        let first_of = |kind: i32| releases.iter().find(|r| r.release_type == kind);

        if let Some(cinema) = first_of(release_type::THEATRICAL) {
            if let Some(date) = metadata_date(&cinema.release_date) {
                self.in_cinemas = Some(date);
            }
            self.certification = Some(cinema.certification.clone());
        }

        if let Some(date) =
            first_of(release_type::PHYSICAL).and_then(|r| metadata_date(&r.release_date))
        {
            self.physical_release = Some(date);
        }

        if let Some(date) =
            first_of(release_type::DIGITAL).and_then(|r| metadata_date(&r.release_date))
        {
            self.digital_release = Some(date);
        }
    }
}
