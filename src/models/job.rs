//! Completed job (cloudlet) record.
//!
//! Jobs are executed by the simulation collaborator before optimization
//! starts. The optimizer only reads `length`, addressed by position: gene
//! `i` of an individual looks up job `i`.

use serde::{Deserialize, Serialize};

/// Final status reported by the simulation for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JobStatus {
    /// Finished normally.
    #[default]
    Success,
    /// Failed during execution.
    Failed,
    /// Cancelled before completion.
    Canceled,
}

/// A job returned by the simulation after execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedJob {
    /// Job identifier.
    pub id: u64,
    /// Work units (million instructions).
    pub length: u64,
    /// Index of the resource that ran the job, if known.
    pub resource_id: Option<usize>,
    /// Execution outcome.
    pub status: JobStatus,
    /// Start of execution (simulation seconds).
    pub start_time: f64,
    /// End of execution (simulation seconds).
    pub finish_time: f64,
    /// CPU time actually consumed (simulation seconds).
    pub cpu_time: f64,
}

impl CompletedJob {
    /// Creates a successful job with the given length and no timing data.
    pub fn new(id: u64, length: u64) -> Self {
        Self {
            id,
            length,
            resource_id: None,
            status: JobStatus::Success,
            start_time: 0.0,
            finish_time: 0.0,
            cpu_time: 0.0,
        }
    }

    /// Sets the resource that executed the job.
    pub fn with_resource(mut self, resource_id: usize) -> Self {
        self.resource_id = Some(resource_id);
        self
    }

    /// Sets the execution status.
    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets start and finish times; CPU time becomes their difference.
    pub fn with_times(mut self, start_time: f64, finish_time: f64) -> Self {
        self.start_time = start_time;
        self.finish_time = finish_time;
        self.cpu_time = (finish_time - start_time).max(0.0);
        self
    }

    /// Length in thousands of work units, the optimizer's time unit.
    pub fn scaled_length(&self) -> f64 {
        self.length as f64 / 1000.0
    }

    /// Whether the job finished successfully.
    pub fn is_success(&self) -> bool {
        self.status == JobStatus::Success
    }
}

/// Builds successful jobs with sequential IDs from a list of lengths.
pub fn jobs_from_lengths(lengths: &[u64]) -> Vec<CompletedJob> {
    lengths
        .iter()
        .enumerate()
        .map(|(i, &len)| CompletedJob::new(i as u64, len))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_builder() {
        let job = CompletedJob::new(7, 52_000)
            .with_resource(3)
            .with_times(0.1, 52.1);

        assert_eq!(job.id, 7);
        assert_eq!(job.length, 52_000);
        assert_eq!(job.resource_id, Some(3));
        assert!(job.is_success());
        assert!((job.cpu_time - 52.0).abs() < 1e-10);
        assert!((job.scaled_length() - 52.0).abs() < 1e-10);
    }

    #[test]
    fn test_job_status() {
        let job = CompletedJob::new(1, 100).with_status(JobStatus::Failed);
        assert!(!job.is_success());
    }

    #[test]
    fn test_jobs_from_lengths() {
        let jobs = jobs_from_lengths(&[1000, 2000, 3000]);
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[2].id, 2);
        assert_eq!(jobs[2].length, 3000);
    }

    #[test]
    fn test_job_serde_roundtrip() {
        let job = CompletedJob::new(1, 1500).with_resource(0);
        let json = serde_json::to_string(&job).unwrap();
        let back: CompletedJob = serde_json::from_str(&json).unwrap();
        assert_eq!(back, job);
    }
}
