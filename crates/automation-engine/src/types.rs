use serde::{Deserialize, Serialize};

/// Parameters travel through the scheduler unchanged — the executor is the
/// only consumer that interprets them.
pub type JobParams = serde_json::Map<String, serde_json::Value>;

/// Kind of automation work a job carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    ProductResearch,
    ListingCreation,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::ProductResearch => "product_research",
            JobType::ListingCreation => "listing_creation",
        }
    }
}

/// Lifecycle state. `Scheduled` is the only initial state; `Completed`
/// and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Scheduled,
    Completed,
    Cancelled,
}

/// Fixed-shape result payload attached when a job completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResults {
    pub success: bool,
    pub message: String,
    pub data: serde_json::Value,
}

/// A unit of scheduled work. Owned exclusively by [`crate::JobScheduler`];
/// created on schedule, mutated only by drain/cancel, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub parameters: JobParams,
    pub status: JobStatus,
    pub results: Option<JobResults>,
}

impl Job {
    /// Convenience accessor for a string parameter.
    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).and_then(|v| v.as_str())
    }
}
