//! SkinSift - forensic image triage over a directory tree.
//!
//! Sniffs every file for a supported raster-image signature, hands eligible
//! files to the analyzer, and tallies posted findings per job across a pool
//! of worker threads.

mod analyzer;
mod fs_file;
mod report;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::{Receiver, bounded};
use skinsift_core::{
    IngestModule, IngestSettings, JobFindingTracker, JobId, MODULE_NAME,
};
use tracing::{error, warn};

use analyzer::EntropyAnalyzer;
use fs_file::DiskFile;
use report::{ConsoleNotifier, JsonlFindingStore};

const WORK_QUEUE_CAPACITY: usize = 256;

#[derive(Parser, Debug)]
#[command(name = "skinsift")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory (or single file) to examine.
    path: PathBuf,

    /// Number of worker threads; defaults to the CPU count.
    #[arg(short, long)]
    workers: Option<usize>,

    /// JSON file overriding the default ingest settings.
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Where findings are appended, one JSON object per line.
    #[arg(short, long, default_value = "findings.jsonl")]
    output: PathBuf,

    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let settings = load_settings(args.settings.as_deref())?;
    let num_workers = args.workers.unwrap_or_else(num_cpus::get).max(1);

    let start_time = Instant::now();
    let files = collect_files(&args.path)?;
    println!(
        "[{MODULE_NAME}] {} files queued, {} worker threads",
        files.len(),
        num_workers
    );

    let tracker = Arc::new(JobFindingTracker::new());
    let store = Arc::new(
        JsonlFindingStore::create(&args.output)
            .with_context(|| format!("cannot open output file {}", args.output.display()))?,
    );
    let module = IngestModule::new(
        settings,
        Arc::clone(&tracker),
        Arc::new(EntropyAnalyzer::default()),
        store,
        Arc::new(ConsoleNotifier),
    );

    // One job per run; the process id keeps concurrent runs distinguishable
    // in shared output.
    let job_id = JobId::from(std::process::id());

    let (path_tx, path_rx) = bounded::<(u64, PathBuf)>(WORK_QUEUE_CAPACITY);

    let mut handles = Vec::with_capacity(num_workers);
    for _ in 0..num_workers {
        let rx = path_rx.clone();
        let module = module.clone();
        handles.push(thread::spawn(move || worker_loop(&module, job_id, &rx)));
    }
    drop(path_rx);

    for (file_id, path) in files.into_iter().enumerate() {
        if path_tx.send((file_id as u64, path)).is_err() {
            break;
        }
    }
    drop(path_tx);

    let mut processed = 0u64;
    let mut errors = 0u64;
    for (i, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok((p, e)) => {
                processed += p;
                errors += e;
            }
            Err(e) => eprintln!("[FATAL] Worker thread {} panicked: {:?}", i, e),
        }
    }

    println!(
        "[{MODULE_NAME}] {} files processed, {} errors in {:.1}s",
        processed,
        errors,
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

fn worker_loop(module: &IngestModule, job_id: JobId, rx: &Receiver<(u64, PathBuf)>) -> (u64, u64) {
    module.start_job(job_id);

    let mut processed = 0u64;
    let mut errors = 0u64;
    for (file_id, path) in rx {
        processed += 1;
        match DiskFile::open(file_id, &path) {
            Ok(file) => {
                if let Err(err) = module.process_file(job_id, &file) {
                    error!(%err, path = %path.display(), "processing failed");
                    errors += 1;
                }
            }
            Err(err) => {
                warn!(%err, path = %path.display(), "cannot open file");
                errors += 1;
            }
        }
    }

    // Bookkeeping always runs, even when this worker saw nothing but errors.
    module.end_job(job_id);
    (processed, errors)
}

fn collect_files(root: &Path) -> Result<Vec<PathBuf>> {
    let metadata = fs::metadata(root)
        .with_context(|| format!("cannot access {}", root.display()))?;
    if metadata.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let entries = fs::read_dir(&dir)
            .with_context(|| format!("cannot read directory {}", dir.display()))?;
        for entry in entries {
            let entry = entry?;
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                stack.push(entry.path());
            } else if file_type.is_file() {
                files.push(entry.path());
            }
        }
    }
    files.sort();
    Ok(files)
}

fn load_settings(path: Option<&Path>) -> Result<IngestSettings> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("cannot read settings file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid settings in {}", path.display()))
        }
        None => Ok(IngestSettings::default()),
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn collect_files_walks_subdirectories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::File::create(dir.path().join("a.bin")).unwrap();
        fs::File::create(dir.path().join("nested/b.bin")).unwrap();

        let files = collect_files(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn collect_files_accepts_a_single_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("only.bin");
        fs::File::create(&path).unwrap();

        let files = collect_files(&path).unwrap();
        assert_eq!(files, vec![path]);
    }

    #[test]
    fn settings_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(br#"{"min_size_bytes": 2048, "use_thumbnail": false}"#)
            .unwrap();

        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings.min_size_bytes, 2048);
        assert!(!settings.use_thumbnail);
        assert!(settings.skip_known_files);
    }

    #[test]
    fn missing_settings_file_is_an_error() {
        assert!(load_settings(Some(Path::new("/no/such/settings.json"))).is_err());
    }
}
