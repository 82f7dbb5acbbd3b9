pub mod definition;
pub mod profile;

pub use definition::{QualityLabel, RESOLUTIONS, resolution_for};
pub use profile::{Quality, QualityProfileItem, QualityProfileRecord, build_profiles};
