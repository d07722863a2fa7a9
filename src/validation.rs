//! Input validation for an optimization run.
//!
//! Checks the completed-job list and resource pool before any generation
//! runs. Detects:
//! - Duplicate job or resource IDs
//! - An empty resource pool
//! - Fewer completed jobs than resources (a gene would address no job)
//! - Jobs that did not finish successfully

use crate::models::{CompletedJob, ResourcePool};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two jobs or two resources share the same ID.
    DuplicateId,
    /// The resource pool has no resources.
    EmptyPool,
    /// Fewer completed jobs than resources.
    InsufficientJobs,
    /// A job's status is not `Success`.
    UnfinishedJob,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the inputs of an optimization run.
///
/// Checks:
/// 1. No duplicate job IDs
/// 2. No duplicate resource IDs
/// 3. The pool has at least one resource
/// 4. There is a completed job for every resource slot
/// 5. Every job finished successfully
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(jobs: &[CompletedJob], pool: &ResourcePool) -> ValidationResult {
    let mut errors = Vec::new();

    let mut job_ids = HashSet::new();
    for job in jobs {
        if !job_ids.insert(job.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate job ID: {}", job.id),
            ));
        }
        if !job.is_success() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnfinishedJob,
                format!("Job {} finished with status {:?}", job.id, job.status),
            ));
        }
    }

    let mut resource_ids = HashSet::new();
    for r in pool.iter() {
        if !resource_ids.insert(r.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate resource ID: {}", r.id),
            ));
        }
    }

    if pool.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyPool,
            "Resource pool is empty",
        ));
    }

    if jobs.len() < pool.len() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InsufficientJobs,
            format!(
                "{} resources but only {} completed jobs",
                pool.len(),
                jobs.len()
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{jobs_from_lengths, CompletedJob, JobStatus, Resource};

    #[test]
    fn test_valid_input() {
        let jobs = jobs_from_lengths(&[1000, 2000, 3000, 4000]);
        let pool = ResourcePool::with_default_resources(3);
        assert!(validate_input(&jobs, &pool).is_ok());
    }

    #[test]
    fn test_duplicate_job_id() {
        let jobs = vec![CompletedJob::new(1, 100), CompletedJob::new(1, 200)];
        let pool = ResourcePool::with_default_resources(2);

        let errors = validate_input(&jobs, &pool).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("job")));
    }

    #[test]
    fn test_duplicate_resource_id() {
        let jobs = jobs_from_lengths(&[100, 200]);
        let pool = ResourcePool::new(vec![Resource::new(0), Resource::new(0)]);

        let errors = validate_input(&jobs, &pool).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("resource")));
    }

    #[test]
    fn test_empty_pool() {
        let jobs = jobs_from_lengths(&[100]);
        let errors = validate_input(&jobs, &ResourcePool::default()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyPool));
    }

    #[test]
    fn test_insufficient_jobs() {
        let jobs = jobs_from_lengths(&[100, 200]);
        let pool = ResourcePool::with_default_resources(3);

        let errors = validate_input(&jobs, &pool).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InsufficientJobs));
    }

    #[test]
    fn test_unfinished_job() {
        let jobs = vec![
            CompletedJob::new(0, 100),
            CompletedJob::new(1, 100).with_status(JobStatus::Failed),
        ];
        let pool = ResourcePool::with_default_resources(2);

        let errors = validate_input(&jobs, &pool).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::UnfinishedJob);
    }

    #[test]
    fn test_multiple_errors() {
        let jobs = vec![
            CompletedJob::new(5, 100).with_status(JobStatus::Canceled),
            CompletedJob::new(5, 100),
        ];
        let errors = validate_input(&jobs, &ResourcePool::default()).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
