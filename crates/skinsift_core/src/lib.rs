mod error;
pub mod ingest;
mod settings;
pub mod sniff;
pub mod tracker;
mod traits;
mod types;

pub use error::{IngestError, Result, StoreError};
pub use ingest::{IngestModule, MODULE_NAME, bucket_label};
pub use settings::IngestSettings;
pub use tracker::JobFindingTracker;
pub use traits::{FindingStore, ImageAnalyzer, IngestFile, NotificationSink};
pub use types::{ClassificationResult, FileId, FileKind, Finding, ImageFormat, JobId, KnownStatus};
