/// Resolution token used when a label has no `-resolution` part.
pub const UNKNOWN_RESOLUTION_TOKEN: &str = "0";

/// Watcher3 resolution tokens and their vertical resolution.
pub const RESOLUTIONS: &[(&str, u16)] = &[("sd", 480), ("720p", 720), ("1080p", 1080), ("4k", 2160)];

/// A Watcher3 source label such as `WEBDL-1080P`, split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityLabel {
    pub source: String,
    pub resolution_token: String,
}

impl QualityLabel {
    /// Lowercases the label and splits it on the first `-`.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        let lower = label.to_lowercase();
        match lower.split_once('-') {
            Some((source, token)) => Self {
                source: source.to_string(),
                resolution_token: token.to_string(),
            },
            None => Self {
                source: lower,
                resolution_token: UNKNOWN_RESOLUTION_TOKEN.to_string(),
            },
        }
    }

    #[must_use]
    pub fn resolution(&self) -> u16 {
        resolution_for(&self.resolution_token)
    }
}

/// Unrecognized tokens resolve to 0.
#[must_use]
pub fn resolution_for(token: &str) -> u16 {
    RESOLUTIONS
        .iter()
        .find(|(name, _)| *name == token)
        .map_or(0, |(_, resolution)| *resolution)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_splits_on_first_dash() {
        let label = QualityLabel::parse("WEBDL-1080P");
        assert_eq!(label.source, "webdl");
        assert_eq!(label.resolution_token, "1080p");
        assert_eq!(label.resolution(), 1080);

        let label = QualityLabel::parse("BluRay-4K-Remux");
        assert_eq!(label.source, "bluray");
        assert_eq!(label.resolution_token, "4k-remux");
        assert_eq!(label.resolution(), 0);
    }

    #[test]
    fn test_parse_label_without_dash() {
        let label = QualityLabel::parse("Telesync");
        assert_eq!(label.source, "telesync");
        assert_eq!(label.resolution_token, UNKNOWN_RESOLUTION_TOKEN);
        assert_eq!(label.resolution(), 0);
    }

    #[test]
    fn test_resolution_table() {
        assert_eq!(resolution_for("sd"), 480);
        assert_eq!(resolution_for("720p"), 720);
        assert_eq!(resolution_for("1080p"), 1080);
        assert_eq!(resolution_for("4k"), 2160);
        assert_eq!(resolution_for("2160p"), 0);
        assert_eq!(resolution_for(""), 0);
    }
}
