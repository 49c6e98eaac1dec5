use serde::{Deserialize, Serialize};

/// Per-job ingest options, threaded explicitly into every call that needs
/// them. Two module instances running with different settings never interfere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    /// Skip files the host's hash database has flagged as known.
    pub skip_known_files: bool,
    /// Trust the host's thumbnail-capability check as a fast path before
    /// reading any bytes.
    pub use_thumbnail: bool,
    /// Files smaller than this are never sniffed.
    pub min_size_bytes: u64,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            skip_known_files: true,
            use_thumbnail: true,
            min_size_bytes: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = IngestSettings::default();
        assert!(settings.skip_known_files);
        assert!(settings.use_thumbnail);
        assert_eq!(settings.min_size_bytes, 100);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let settings: IngestSettings = serde_json::from_str(r#"{"min_size_bytes": 512}"#).unwrap();
        assert_eq!(settings.min_size_bytes, 512);
        assert!(settings.skip_known_files);
        assert!(settings.use_thumbnail);
    }

    #[test]
    fn round_trips_through_json() {
        let settings = IngestSettings {
            skip_known_files: false,
            use_thumbnail: false,
            min_size_bytes: 4096,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: IngestSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
