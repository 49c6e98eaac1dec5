//! Host-facing ingest lifecycle: one `start_job`/`process_file`/`end_job`
//! triple per worker per job.

use std::sync::Arc;

use tracing::{debug, error};

use crate::error::{IngestError, Result};
use crate::settings::IngestSettings;
use crate::sniff;
use crate::tracker::JobFindingTracker;
use crate::traits::{FindingStore, ImageAnalyzer, IngestFile, NotificationSink};
use crate::types::{FileKind, Finding, JobId, KnownStatus};

pub const MODULE_NAME: &str = "SkinSift";

/// Formats the persisted bucket tag for an analyzer score.
///
/// The score is floored to the nearest multiple of ten and zero-padded to
/// three digits: 0 becomes `SkinSift|000s`, 67 becomes `SkinSift|060s`, 100
/// becomes `SkinSift|100s`. Downstream tooling groups findings by this exact
/// string, so the format must not drift.
#[must_use]
pub fn bucket_label(score: u8) -> String {
    let floored = (u32::from(score).min(100) / 10) * 10;
    format!("{MODULE_NAME}|{floored:03}s")
}

/// One worker's handle on the ingest pipeline.
///
/// Cheap to clone: every worker thread carries its own `IngestModule`, all of
/// them sharing the same tracker and collaborators. There is no process-wide
/// state; two modules built from different trackers are fully isolated.
#[derive(Clone)]
pub struct IngestModule {
    settings: IngestSettings,
    tracker: Arc<JobFindingTracker>,
    analyzer: Arc<dyn ImageAnalyzer>,
    store: Arc<dyn FindingStore>,
    notifier: Arc<dyn NotificationSink>,
}

impl IngestModule {
    #[must_use]
    pub fn new(
        settings: IngestSettings,
        tracker: Arc<JobFindingTracker>,
        analyzer: Arc<dyn ImageAnalyzer>,
        store: Arc<dyn FindingStore>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            settings,
            tracker,
            analyzer,
            store,
            notifier,
        }
    }

    /// Registers this worker with `job`. Must precede any `process_file` or
    /// `end_job` call for the same job on this worker.
    pub fn start_job(&self, job: JobId) {
        self.tracker.register_worker(job);
        debug!(job, "worker registered");
    }

    /// Runs one candidate file through sniffing and, if eligible, analysis.
    ///
    /// Sniffing and counting problems never fail a file; the only `Err` this
    /// returns is a result-store write failure, which is logged with the
    /// file's identifier and affects that file alone.
    pub fn process_file(&self, job: JobId, file: &dyn IngestFile) -> Result<()> {
        match file.kind() {
            FileKind::UnallocatedBlocks | FileKind::UnusedBlocks => return Ok(()),
            FileKind::FileSystem => {}
        }

        if self.settings.skip_known_files && file.known_status() == KnownStatus::Known {
            return Ok(());
        }

        if !sniff::is_eligible(file, &self.settings) {
            return Ok(());
        }

        let Some(result) = self.analyzer.scan(file) else {
            return Ok(());
        };

        let finding = Finding {
            job_id: job,
            file_id: file.id(),
            summary: result.summary,
            bucket: bucket_label(result.score),
        };

        if let Err(source) = self.store.post_finding(&finding) {
            error!(file_id = finding.file_id, %source, "result store rejected finding");
            return Err(IngestError::ResultStore {
                file_id: finding.file_id,
                source,
            });
        }

        self.tracker.record_finding(job, 1);
        self.notifier.post_finding_notice(&finding.summary);
        Ok(())
    }

    /// Deregisters this worker from `job`.
    ///
    /// The worker whose deregistration drives the job's count to zero emits
    /// the single end-of-job summary. Always call this, cancellation paths
    /// included; skipping it leaks the job's registry entry.
    pub fn end_job(&self, job: JobId) {
        if let Some(tally) = self.tracker.deregister_worker(job) {
            self.notifier
                .post_info(&format!("Posted {tally} findings for job {job}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_labels_floor_to_tens() {
        assert_eq!(bucket_label(0), "SkinSift|000s");
        assert_eq!(bucket_label(9), "SkinSift|000s");
        assert_eq!(bucket_label(45), "SkinSift|040s");
        assert_eq!(bucket_label(67), "SkinSift|060s");
        assert_eq!(bucket_label(99), "SkinSift|090s");
        assert_eq!(bucket_label(100), "SkinSift|100s");
    }

    #[test]
    fn bucket_labels_clamp_out_of_range_scores() {
        assert_eq!(bucket_label(101), "SkinSift|100s");
        assert_eq!(bucket_label(u8::MAX), "SkinSift|100s");
    }
}
