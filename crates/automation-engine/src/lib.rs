//! Job scheduling and lifecycle for the automation workflows.

pub mod scheduler;
pub mod types;

pub use scheduler::{JobExecutor, JobScheduler};
pub use types::*;
