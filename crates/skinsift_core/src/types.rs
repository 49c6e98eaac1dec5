use serde::Serialize;

/// Identifies one processing job. Many worker threads share the same `JobId`.
pub type JobId = u64;

/// Host-assigned identifier for a candidate file.
pub type FileId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpeg,
    Jpeg2000,
    Png,
    Gif,
    Bmp,
    Tiff,
    BigTiff,
}

impl ImageFormat {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG",
            Self::Jpeg2000 => "JPEG 2000",
            Self::Png => "PNG",
            Self::Gif => "GIF",
            Self::Bmp => "BMP",
            Self::Tiff => "TIFF",
            Self::BigTiff => "BigTIFF",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Verdict of the host's hash database for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownStatus {
    Known,
    Unknown,
}

/// What kind of entry the host handed us. Only regular file-system files are
/// worth scanning; unallocated and unused block runs are skipped outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    FileSystem,
    UnallocatedBlocks,
    UnusedBlocks,
}

/// What the external analyzer reported for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub summary: String,
    /// 0..=100.
    pub score: u8,
}

/// A single posted finding. Built here, owned by the result store afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub job_id: JobId,
    pub file_id: FileId,
    pub summary: String,
    pub bucket: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names() {
        assert_eq!(ImageFormat::Jpeg.name(), "JPEG");
        assert_eq!(ImageFormat::BigTiff.name(), "BigTIFF");
        assert_eq!(format!("{}", ImageFormat::Png), "PNG");
    }
}
