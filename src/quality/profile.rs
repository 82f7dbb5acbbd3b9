use serde::Serialize;

use super::definition::QualityLabel;
use crate::models::watcher3::{QualityConfig, QualityProfileSource};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QualityProfileRecord {
    pub name: String,
    pub items: Vec<QualityProfileItem>,
    /// Watcher3 has no custom formats, so both scores stay at zero.
    pub min_format_score: i32,
    pub cutoff_format_score: i32,
    pub id: i32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QualityProfileItem {
    pub quality: Quality,
    pub items: Vec<QualityProfileItem>,
    pub allowed: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Quality {
    pub id: i64,
    pub name: String,
    pub source: String,
    pub resolution: u16,
    pub modifier: &'static str,
}

impl QualityProfileItem {
    fn from_source(label: &str, (enabled, id): (bool, i64)) -> Self {
        let parsed = QualityLabel::parse(label);
        Self {
            quality: Quality {
                id,
                name: label.to_string(),
                resolution: parsed.resolution(),
                source: parsed.source,
                modifier: "none",
            },
            items: Vec::new(),
            allowed: enabled,
        }
    }
}

impl QualityProfileRecord {
    fn from_source(name: &str, source: &QualityProfileSource, id: i32) -> Self {
        Self {
            name: name.to_string(),
            items: source
                .sources
                .iter()
                .map(|(label, pair)| QualityProfileItem::from_source(label, *pair))
                .collect(),
            min_format_score: 0,
            cutoff_format_score: 0,
            id,
        }
    }
}

/// Flattens Watcher3's quality profiles, numbering them from 1 in listed order.
#[must_use]
pub fn build_profiles(config: &QualityConfig) -> Vec<QualityProfileRecord> {
    config
        .profiles
        .iter()
        .zip(1..)
        .map(|((name, source), id)| QualityProfileRecord::from_source(name, source, id))
        .collect()
}
