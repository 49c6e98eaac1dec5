//! Job-scoped finding tallies with reference-counted worker lifecycle.
//!
//! One tracker instance is shared (by `Arc`) between all worker threads of a
//! host process. Each operation takes the registry lock once, briefly, and
//! never touches I/O, so the three operations are linearizable per job: no
//! lost increments, no double finalization.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::{error, warn};

use crate::types::JobId;

#[derive(Debug, Default)]
struct JobState {
    active_workers: u64,
    findings_posted: u64,
}

/// Registry of per-job worker counts and finding tallies.
///
/// A job's entry is created by the first [`register_worker`] call and removed
/// by the [`deregister_worker`] call that drops the worker count to zero.
/// That final call, and only that one, receives the job's tally.
///
/// [`register_worker`]: Self::register_worker
/// [`deregister_worker`]: Self::deregister_worker
#[derive(Debug, Default)]
pub struct JobFindingTracker {
    jobs: Mutex<HashMap<JobId, JobState>>,
}

impl JobFindingTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one worker for `job`, creating the job's entry on first use.
    pub fn register_worker(&self, job: JobId) {
        let mut jobs = self.jobs.lock();
        jobs.entry(job)
            .and_modify(|state| state.active_workers += 1)
            .or_insert(JobState {
                active_workers: 1,
                findings_posted: 0,
            });
    }

    /// Adds `count` to the finding tally of `job`.
    ///
    /// The host guarantees registration precedes any finding. If that
    /// guarantee is broken we keep the count anyway in a zero-worker entry
    /// instead of panicking, and log the misuse.
    pub fn record_finding(&self, job: JobId, count: u64) {
        let mut jobs = self.jobs.lock();
        let state = jobs.entry(job).or_insert_with(|| {
            warn!(job, "finding recorded for a job with no registered workers");
            JobState::default()
        });
        state.findings_posted += count;
    }

    /// Removes one worker from `job`.
    ///
    /// Returns the final finding tally if this call drove the worker count to
    /// zero; the job's entry is removed in the same critical section, so the
    /// tally is delivered exactly once no matter how many workers deregister
    /// concurrently. Must be called once per [`register_worker`] call, on
    /// cancellation paths included.
    ///
    /// [`register_worker`]: Self::register_worker
    pub fn deregister_worker(&self, job: JobId) -> Option<u64> {
        let mut jobs = self.jobs.lock();
        let finished = match jobs.get_mut(&job) {
            Some(state) => {
                state.active_workers = state.active_workers.saturating_sub(1);
                state.active_workers == 0
            }
            None => {
                // A deregistration without a matching registration means the
                // host's bookkeeping is broken; say so instead of hiding it.
                error!(job, "deregistration for a job with no registered workers");
                return None;
            }
        };
        if finished {
            jobs.remove(&job).map(|state| state.findings_posted)
        } else {
            None
        }
    }

    /// Whether `job` currently has a registry entry.
    #[must_use]
    pub fn is_tracked(&self, job: JobId) -> bool {
        self.jobs.lock().contains_key(&job)
    }

    /// Number of jobs currently tracked.
    #[must_use]
    pub fn tracked_jobs(&self) -> usize {
        self.jobs.lock().len()
    }
}
