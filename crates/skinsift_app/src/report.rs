use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use serde::Serialize;
use skinsift_core::{Finding, FindingStore, MODULE_NAME, NotificationSink, StoreError};

#[derive(Serialize)]
struct FindingRecord<'a> {
    recorded_at: String,
    job_id: u64,
    file_id: u64,
    summary: &'a str,
    bucket: &'a str,
}

/// Appends one JSON object per finding to a `.jsonl` file, flushed per line
/// so a crashed run still leaves an auditable trail.
pub struct JsonlFindingStore {
    writer: Mutex<BufWriter<File>>,
}

impl JsonlFindingStore {
    pub fn create(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }
}

impl FindingStore for JsonlFindingStore {
    fn post_finding(&self, finding: &Finding) -> Result<(), StoreError> {
        let record = FindingRecord {
            recorded_at: Utc::now().to_rfc3339(),
            job_id: finding.job_id,
            file_id: finding.file_id,
            summary: &finding.summary,
            bucket: &finding.bucket,
        };
        let line = serde_json::to_string(&record).map_err(|err| StoreError(err.to_string()))?;

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| StoreError("finding store writer poisoned".into()))?;
        writeln!(writer, "{line}").map_err(|err| StoreError(err.to_string()))?;
        writer.flush().map_err(|err| StoreError(err.to_string()))?;
        Ok(())
    }
}

/// Prints notifications in the same bracketed-prefix style as the rest of
/// the CLI output.
pub struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn post_info(&self, text: &str) {
        println!("[{MODULE_NAME}] {text}");
    }

    fn post_finding_notice(&self, summary: &str) {
        println!("[{MODULE_NAME}] interesting file: {summary}");
    }
}
