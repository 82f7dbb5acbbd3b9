pub const USER_AGENT: &str = concat!("Watcharr/", env!("CARGO_PKG_VERSION"));

pub mod movie {

    pub const TMDB_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/original";

    pub const MIDNIGHT_UTC_SUFFIX: &str = "T00:00:00Z";

    /// Id 1 belongs to the primary title.
    pub const ALTERNATE_TITLE_FIRST_ID: i64 = 2;
}

pub mod root_folder {

    /// Reported free space when the root folder cannot be inspected (1 TB).
    pub const FREE_SPACE_FALLBACK: u64 = 1_000_000_000_000;
}

pub mod http {

    pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

    pub const MAX_LOGGED_BODY_BYTES: usize = 1024 * 1024;
}
