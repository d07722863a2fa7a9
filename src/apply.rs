//! Projecting a solution onto the resource pool.
//!
//! [`apply_solution`] enables every resource whose gene is 1.
//! [`optimize_and_apply`] is the whole post-simulation step: validate the
//! inputs, evolve, pick the best individual, and apply it.

use log::info;

use crate::de::{CdeConfig, CdeOptimizer, CdeResult, Individual};
use crate::error::{CdeError, Result};
use crate::models::{CompletedJob, ResourcePool};
use crate::validation::validate_input;

/// Result of [`optimize_and_apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct Optimization {
    /// Final state of the evolution.
    pub result: CdeResult,
    /// Gene indices that were enabled on the pool.
    pub applied: Vec<usize>,
}

/// Enables the resources selected by `solution`.
///
/// Each resource whose gene equals 1 gets a fresh time-shared scheduler and
/// is marked selected. Other resources are left as they are.
///
/// # Errors
/// [`CdeError::SizeMismatch`] if the solution length differs from the pool
/// size; the pool is untouched in that case.
pub fn apply_solution(solution: &Individual, pool: &mut ResourcePool) -> Result<Vec<usize>> {
    if solution.len() != pool.len() {
        return Err(CdeError::SizeMismatch {
            expected: pool.len(),
            actual: solution.len(),
        });
    }

    let applied = solution.selected_indices();
    for &index in &applied {
        if let Some(resource) = pool.get_mut(index) {
            resource.enable();
            info!("Applying best solution: enabling resource at index {index}");
        }
    }
    Ok(applied)
}

/// Validates inputs, runs the optimizer, and applies the best individual.
///
/// # Example
///
/// ```
/// use u_cde::apply::optimize_and_apply;
/// use u_cde::de::CdeConfig;
/// use u_cde::models::{jobs_from_lengths, ResourcePool};
///
/// let jobs = jobs_from_lengths(&[1000, 2000, 3000]);
/// let mut pool = ResourcePool::with_default_resources(3);
/// let config = CdeConfig::default()
///     .with_population_size(4)
///     .with_generations(1)
///     .with_mutation_factor(0.5)
///     .with_seed(0.37);
///
/// let outcome = optimize_and_apply(&config, &jobs, &mut pool).unwrap();
/// assert_eq!(outcome.applied, vec![0, 2]);
/// assert_eq!(pool.selected_indices(), vec![0, 2]);
/// ```
pub fn optimize_and_apply(
    config: &CdeConfig,
    jobs: &[CompletedJob],
    pool: &mut ResourcePool,
) -> Result<Optimization> {
    validate_input(jobs, pool)?;
    let result = CdeOptimizer::new(config.clone(), jobs, pool.len())?.run()?;
    let applied = apply_solution(&result.best, pool)?;
    Ok(Optimization { result, applied })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{jobs_from_lengths, CloudletScheduler, JobStatus, Resource};
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_apply_marks_selected() {
        let mut pool = ResourcePool::new(vec![
            Resource::new(0),
            Resource::new(1).with_scheduler(CloudletScheduler::SpaceShared),
            Resource::new(2).with_scheduler(CloudletScheduler::SpaceShared),
        ]);
        let applied = apply_solution(&Individual::new(vec![0, 1, 0]), &mut pool).unwrap();

        assert_eq!(applied, vec![1]);
        assert_eq!(pool.selected_indices(), vec![1]);
        let r1 = pool.get(1).unwrap();
        assert_eq!(r1.scheduler, Some(CloudletScheduler::TimeShared));
        let r2 = pool.get(2).unwrap();
        assert_eq!(r2.scheduler, Some(CloudletScheduler::SpaceShared));
        assert!(!r2.selected);
    }

    #[test]
    fn test_apply_ignores_non_binary_genes() {
        let mut pool = ResourcePool::with_default_resources(3);
        let applied = apply_solution(&Individual::new(vec![2, -1, 1]), &mut pool).unwrap();
        assert_eq!(applied, vec![2]);
    }

    #[test]
    fn test_apply_size_mismatch() {
        let mut pool = ResourcePool::with_default_resources(3);
        let err = apply_solution(&Individual::new(vec![1, 1]), &mut pool).unwrap_err();
        assert_eq!(
            err,
            CdeError::SizeMismatch {
                expected: 3,
                actual: 2
            }
        );
        assert!(pool.selected_indices().is_empty());
    }

    #[test]
    fn test_optimize_and_apply_reference() {
        let jobs = jobs_from_lengths(&[1000, 2000, 3000]);
        let mut pool = ResourcePool::with_default_resources(3);
        let config = CdeConfig::default()
            .with_population_size(4)
            .with_generations(1)
            .with_mutation_factor(0.5)
            .with_crossover_rate(0.8)
            .with_seed(0.37);

        let outcome = optimize_and_apply(&config, &jobs, &mut pool).unwrap();
        assert_eq!(outcome.result.best.genes, vec![1, 0, 1]);
        assert!((outcome.result.best_fitness - 4.0).abs() < 1e-10);
        assert_eq!(outcome.applied, vec![0, 2]);
        assert_eq!(pool.selected_indices(), vec![0, 2]);
    }

    #[test]
    fn test_optimize_and_apply_rejects_invalid_input() {
        let jobs = vec![
            CompletedJob::new(0, 1000),
            CompletedJob::new(1, 1000).with_status(JobStatus::Failed),
        ];
        let mut pool = ResourcePool::with_default_resources(2);
        let err = optimize_and_apply(&CdeConfig::default(), &jobs, &mut pool).unwrap_err();
        match err {
            CdeError::InvalidInput(errors) => {
                assert_eq!(errors[0].kind, ValidationErrorKind::UnfinishedJob)
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(pool.selected_indices().is_empty());
    }
}
