//! Workload and selection metrics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total finish time | Sum of finish times of successful jobs |
//! | Makespan | Latest finish time |
//! | Avg finish time | Total finish time / all jobs |
//! | Selected share | Selected resources / pool size |
//! | Scaled time | Σ length/1000 over selected slots (the fitness) |
//!
//! `WorkloadSummary` reports on the simulation output the optimizer
//! consumes; `SelectionKpi` describes the solution it applied.

use std::fmt;

use crate::de::{FitnessEvaluator, Individual};
use crate::error::{CdeError, Result};
use crate::models::{CompletedJob, ResourcePool};

/// Figures for a completed-job list.
///
/// Times are in simulation seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadSummary {
    /// Jobs in the list.
    pub job_count: usize,
    /// Jobs that finished successfully.
    pub succeeded: usize,
    /// Sum of successful jobs' finish times.
    pub total_finish_time: f64,
    /// Latest finish time of any successful job.
    pub makespan: f64,
    /// `total_finish_time / job_count` (0.0 for an empty list).
    pub avg_finish_time: f64,
    /// Sum of all job lengths.
    pub total_length: u64,
}

impl WorkloadSummary {
    /// Computes the summary; only successful jobs contribute times.
    pub fn from_jobs(jobs: &[CompletedJob]) -> Self {
        let mut succeeded = 0;
        let mut total_finish_time = 0.0;
        let mut makespan: f64 = 0.0;

        for job in jobs.iter().filter(|j| j.is_success()) {
            succeeded += 1;
            total_finish_time += job.finish_time;
            makespan = makespan.max(job.finish_time);
        }

        let avg_finish_time = if jobs.is_empty() {
            0.0
        } else {
            total_finish_time / jobs.len() as f64
        };

        Self {
            job_count: jobs.len(),
            succeeded,
            total_finish_time,
            makespan,
            avg_finish_time,
            total_length: jobs.iter().map(|j| j.length).sum(),
        }
    }
}

impl fmt::Display for WorkloadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Jobs: {} ({} succeeded)", self.job_count, self.succeeded)?;
        writeln!(f, "Total finish time: {:.2}", self.total_finish_time)?;
        writeln!(f, "Makespan: {:.2}", self.makespan)?;
        write!(f, "Average finish time: {:.2}", self.avg_finish_time)
    }
}

/// Quality figures for a solution against its pool and jobs.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionKpi {
    /// Resources selected (genes equal to 1).
    pub selected_count: usize,
    /// `selected_count / pool size` (0.0 for an empty pool).
    pub selected_share: f64,
    /// Scaled processing time of the selected slots.
    pub scaled_time: f64,
    /// Total MIPS of the selected resources.
    pub selected_mips: u64,
}

impl SelectionKpi {
    /// Computes the KPIs of `solution`.
    ///
    /// # Errors
    /// - [`CdeError::SizeMismatch`] if the solution length differs from the pool.
    /// - [`CdeError::IndexOutOfRange`] if there are fewer jobs than genes.
    pub fn calculate(
        solution: &Individual,
        jobs: &[CompletedJob],
        pool: &ResourcePool,
    ) -> Result<Self> {
        if solution.len() != pool.len() {
            return Err(CdeError::SizeMismatch {
                expected: pool.len(),
                actual: solution.len(),
            });
        }
        let scaled_time = FitnessEvaluator::new(jobs).evaluate(solution)?;
        let selected = solution.selected_indices();
        let selected_mips = selected
            .iter()
            .filter_map(|&i| pool.get(i))
            .map(|r| r.total_mips())
            .sum();
        let selected_share = if pool.is_empty() {
            0.0
        } else {
            selected.len() as f64 / pool.len() as f64
        };

        Ok(Self {
            selected_count: selected.len(),
            selected_share,
            scaled_time,
            selected_mips,
        })
    }
}
