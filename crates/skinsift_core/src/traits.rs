//! Ports to the host pipeline and its collaborators.
//!
//! These traits follow the Ports & Adapters pattern: the ingest core only
//! ever talks to the host's file handles, the content analyzer, the result
//! store, and the notification channel through the contracts below, so tests
//! and alternative hosts can plug in their own implementations.

use std::io;

use crate::error::StoreError;
use crate::types::{ClassificationResult, FileId, FileKind, Finding, KnownStatus};

/// A candidate file as handed over by the host pipeline.
///
/// Reads are positional so a handle can be shared within a worker without
/// seek state. A short read is not an error; callers that need an exact
/// number of bytes must check the returned count.
pub trait IngestFile {
    /// Host-assigned identifier, stable for the lifetime of the job.
    fn id(&self) -> FileId;

    /// Total size in bytes.
    fn size(&self) -> u64;

    /// Reads up to `buf.len()` bytes starting at `offset`.
    ///
    /// # Returns
    ///
    /// The number of bytes actually read, which may be less than requested
    /// near the end of the file.
    fn read(&self, buf: &mut [u8], offset: u64) -> io::Result<usize>;

    /// Whether the host's hash database already knows this file.
    fn known_status(&self) -> KnownStatus;

    /// What kind of entry this is (regular file, unallocated blocks, ...).
    fn kind(&self) -> FileKind;

    /// Whether the host's media-type layer already classified this file as
    /// thumbnail-renderable. Used as a sniffing fast path when enabled.
    fn thumbnail_capable(&self) -> bool;
}

/// The external content analyzer. Opaque to this crate: it either produces
/// a scored classification or nothing, and handles its own failures.
pub trait ImageAnalyzer: Send + Sync {
    fn scan(&self, file: &dyn IngestFile) -> Option<ClassificationResult>;
}

/// Destination for posted findings. The only fallible collaborator; a write
/// failure is reported back to the host as a per-file error.
pub trait FindingStore: Send + Sync {
    fn post_finding(&self, finding: &Finding) -> Result<(), StoreError>;
}

/// Best-effort, fire-and-forget notifications to whoever is watching the job.
pub trait NotificationSink: Send + Sync {
    fn post_info(&self, text: &str);

    fn post_finding_notice(&self, summary: &str);
}
