//! Wire types returned by the Watcher3 API.
//!
//! Watcher3 is loose about scalar types (ids and years arrive as strings or
//! numbers, empty fields as `null` or `""`), so most fields go through the
//! lenient helpers in [`lenient`].

use serde::{Deserialize, Deserializer};

/// One entry of `mode=liststatus`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListStatus {
    #[serde(deserialize_with = "lenient::int")]
    pub tmdbid: i64,

    #[serde(deserialize_with = "lenient::string")]
    pub imdbid: String,

    #[serde(deserialize_with = "lenient::string")]
    pub title: String,

    #[serde(deserialize_with = "lenient::string")]
    pub sort_title: String,

    #[serde(deserialize_with = "lenient::string")]
    pub plot: String,

    #[serde(deserialize_with = "lenient::string")]
    pub added_date: String,

    #[serde(deserialize_with = "lenient::float")]
    pub score: f64,

    #[serde(deserialize_with = "lenient::string")]
    pub finished_file: String,

    #[serde(deserialize_with = "lenient::string")]
    pub year: String,

    #[serde(deserialize_with = "lenient::string")]
    pub media_release_date: String,

    #[serde(deserialize_with = "lenient::string")]
    pub release_date: String,

    #[serde(deserialize_with = "lenient::string")]
    pub rated: String,

    /// Comma separated.
    #[serde(deserialize_with = "lenient::string")]
    pub alternative_titles: String,
}

/// The `tmdb_data` payload of `mode=movie_metadata`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MovieMetadata {
    #[serde(deserialize_with = "lenient::opt_int")]
    pub id: Option<i64>,

    pub status: Option<String>,

    pub homepage: Option<String>,

    #[serde(deserialize_with = "lenient::opt_int")]
    pub runtime: Option<i64>,

    #[serde(deserialize_with = "lenient::opt_int")]
    pub vote_count: Option<i64>,

    #[serde(deserialize_with = "lenient::opt_float")]
    pub vote_average: Option<f64>,

    #[serde(deserialize_with = "lenient::or_default")]
    pub production_companies: Vec<ProductionCompany>,

    #[serde(deserialize_with = "lenient::or_default")]
    pub production_countries: Vec<ProductionCountry>,

    #[serde(deserialize_with = "lenient::or_default")]
    pub release_dates: ReleaseDateResults,

    pub poster_path: Option<String>,

    pub backdrop_path: Option<String>,

    #[serde(deserialize_with = "lenient::or_default")]
    pub genres: Vec<Genre>,

    #[serde(deserialize_with = "lenient::or_default")]
    pub alternative_titles: AlternativeTitles,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductionCompany {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductionCountry {
    pub iso_3166_1: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReleaseDateResults {
    #[serde(deserialize_with = "lenient::or_default")]
    pub results: Vec<CountryReleaseDates>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CountryReleaseDates {
    pub iso_3166_1: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub release_dates: Vec<ReleaseDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReleaseDate {
    #[serde(rename = "type")]
    pub release_type: i32,
    #[serde(deserialize_with = "lenient::string")]
    pub release_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub certification: String,
}

/// TMDb release types that map onto Radarr fields.
pub mod release_type {
    pub const THEATRICAL: i32 = 3;
    pub const DIGITAL: i32 = 4;
    pub const PHYSICAL: i32 = 5;
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Genre {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AlternativeTitles {
    #[serde(deserialize_with = "lenient::or_default")]
    pub titles: Vec<AlternativeTitle>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AlternativeTitle {
    pub title: String,
}

/// The `config` payload of `mode=getconfig`, reduced to what the adapter reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    #[serde(rename = "Postprocessing")]
    pub postprocessing: PostprocessingConfig,

    #[serde(rename = "Quality")]
    pub quality: QualityConfig,
}

impl WatcherConfig {
    /// Directory holding the per-movie folders: the mover path template with
    /// its final segment removed.
    #[must_use]
    pub fn root_folder(&self) -> &str {
        let template = self.postprocessing.moverpath.as_str();
        template
            .rsplit_once('/')
            .map_or(template, |(parent, _)| parent)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostprocessingConfig {
    pub moverpath: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Profiles keyed by name, in the order Watcher3 lists them.
    #[serde(rename = "Profiles", deserialize_with = "lenient::ordered_entries")]
    pub profiles: Vec<(String, QualityProfileSource)>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QualityProfileSource {
    /// Source labels mapped to their `[enabled, id]` pair.
    #[serde(rename = "Sources", deserialize_with = "lenient::ordered_entries")]
    pub sources: Vec<(String, (bool, i64))>,
}

pub(crate) mod lenient {
    use super::{Deserialize, Deserializer};
    use serde::de::{DeserializeOwned, MapAccess, Visitor};
    use serde_json::Value;
    use std::fmt;
    use std::marker::PhantomData;

    /// Strings pass through, numbers and booleans are stringified, `null` is empty.
    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => String::new(),
        })
    }

    pub fn int<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let parsed = match &value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| serde::de::Error::custom(format!("expected an integer, got {value}")))
    }

    /// Unparseable scores read as zero.
    pub fn float<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_f64().unwrap_or_default(),
            Value::String(s) => s.trim().parse().unwrap_or_default(),
            _ => 0.0,
        })
    }

    /// Like [`int`], but a value that is not an integer reads as `None`.
    pub fn opt_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn opt_float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    /// Reads a JSON object into a list of entries, keeping document order.
    pub fn ordered_entries<'de, D, T>(deserializer: D) -> Result<Vec<(String, T)>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        struct EntriesVisitor<T>(PhantomData<T>);

        impl<'de, T: DeserializeOwned> Visitor<'de> for EntriesVisitor<T> {
            type Value = Vec<(String, T)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, T>()? {
                    entries.push((key, value));
                }
                Ok(entries)
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(Vec::new())
            }
        }

        deserializer.deserialize_any(EntriesVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_status_accepts_mixed_scalars() {
        let status: ListStatus = serde_json::from_value(json!({
            "tmdbid": "603",
            "imdbid": "tt0133093",
            "title": "The Matrix",
            "year": 1999,
            "score": "8.7",
            "finished_file": null,
            "rated": null
        }))
        .unwrap();

        assert_eq!(status.tmdbid, 603);
        assert_eq!(status.year, "1999");
        assert!((status.score - 8.7).abs() < f64::EPSILON);
        assert!(status.finished_file.is_empty());
        assert!(status.rated.is_empty());
        assert!(status.plot.is_empty());
    }

    #[test]
    fn test_list_status_requires_numeric_tmdbid() {
        let result = serde_json::from_value::<ListStatus>(json!({ "tmdbid": "abc" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_metadata_tolerates_nulls() {
        let metadata: MovieMetadata = serde_json::from_value(json!({
            "id": 603,
            "genres": null,
            "production_countries": null,
            "release_dates": null,
            "alternative_titles": { "titles": null }
        }))
        .unwrap();

        assert_eq!(metadata.id, Some(603));
        assert!(metadata.genres.is_empty());
        assert!(metadata.release_dates.results.is_empty());
        assert!(metadata.alternative_titles.titles.is_empty());
    }

    #[test]
    fn test_metadata_bad_scalar_only_loses_itself() {
        let metadata: MovieMetadata = serde_json::from_value(json!({
            "id": "603",
            "runtime": "136",
            "vote_count": "many",
            "vote_average": "7.9",
            "genres": [{ "name": "Action" }],
            "poster_path": "/p.jpg"
        }))
        .unwrap();

        assert_eq!(metadata.id, Some(603));
        assert_eq!(metadata.runtime, Some(136));
        assert_eq!(metadata.vote_count, None);
        assert_eq!(metadata.vote_average, Some(7.9));
        assert_eq!(metadata.genres[0].name, "Action");
        assert_eq!(metadata.poster_path.as_deref(), Some("/p.jpg"));
    }

    #[test]
    fn test_config_keeps_profile_order() {
        let config: WatcherConfig = serde_json::from_str(
            r#"{
                "Postprocessing": { "moverpath": "/movies/{title} ({year})" },
                "Quality": { "Profiles": {
                    "Zeta": { "Sources": { "BluRay-4K": [true, 0], "CAM-SD": [false, 9] } },
                    "Alpha": { "Sources": {} }
                } }
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = config
            .quality
            .profiles
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(names, ["Zeta", "Alpha"]);

        let sources = &config.quality.profiles[0].1.sources;
        assert_eq!(sources[0], ("BluRay-4K".to_string(), (true, 0)));
        assert_eq!(sources[1], ("CAM-SD".to_string(), (false, 9)));
    }

    #[test]
    fn test_root_folder_strips_last_segment() {
        let mut config = WatcherConfig::default();
        config.postprocessing.moverpath = "/mnt/media/movies/{title} ({year})".to_string();
        assert_eq!(config.root_folder(), "/mnt/media/movies");

        config.postprocessing.moverpath = "movies".to_string();
        assert_eq!(config.root_folder(), "movies");
    }
}
