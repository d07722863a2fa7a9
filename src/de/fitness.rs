//! Fitness evaluation against completed jobs.
//!
//! Fitness is the scaled processing time of the jobs whose slot is
//! selected: `Σ length[i] / 1000` over genes equal to 1. Lower is better.

use super::Individual;
use crate::error::{CdeError, Result};
use crate::models::CompletedJob;

/// Scores individuals against a fixed job list.
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessEvaluator {
    scaled_lengths: Vec<f64>,
}

impl FitnessEvaluator {
    /// Captures the scaled lengths of `jobs`, in job order.
    pub fn new(jobs: &[CompletedJob]) -> Self {
        Self {
            scaled_lengths: jobs.iter().map(CompletedJob::scaled_length).collect(),
        }
    }

    /// Number of jobs gene indices can address.
    pub fn job_count(&self) -> usize {
        self.scaled_lengths.len()
    }

    /// Fitness of a gene vector.
    ///
    /// # Errors
    /// [`CdeError::IndexOutOfRange`] if there are more genes than jobs.
    pub fn evaluate_genes(&self, genes: &[i32]) -> Result<f64> {
        if genes.len() > self.scaled_lengths.len() {
            return Err(CdeError::IndexOutOfRange {
                index: self.scaled_lengths.len(),
                len: self.scaled_lengths.len(),
            });
        }
        Ok(genes
            .iter()
            .zip(&self.scaled_lengths)
            .filter(|(&g, _)| g == 1)
            .map(|(_, &len)| len)
            .sum())
    }

    /// Fitness of an individual.
    pub fn evaluate(&self, individual: &Individual) -> Result<f64> {
        self.evaluate_genes(&individual.genes)
    }

    /// Evaluates and caches the fitness on the individual.
    pub fn evaluate_in_place(&self, individual: &mut Individual) -> Result<f64> {
        let fitness = self.evaluate(individual)?;
        individual.fitness = fitness;
        Ok(fitness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::jobs_from_lengths;

    fn evaluator() -> FitnessEvaluator {
        FitnessEvaluator::new(&jobs_from_lengths(&[1000, 2000, 3000]))
    }

    #[test]
    fn test_fitness_sum_of_selected() {
        let e = evaluator();
        assert!((e.evaluate_genes(&[1, 0, 1]).unwrap() - 4.0).abs() < 1e-10);
        assert!((e.evaluate_genes(&[1, 1, 1]).unwrap() - 6.0).abs() < 1e-10);
        assert!((e.evaluate_genes(&[0, 1, 1]).unwrap() - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_all_zero_is_zero() {
        let e = evaluator();
        assert_eq!(e.evaluate(&Individual::zeros(3)).unwrap(), 0.0);
    }

    #[test]
    fn test_non_binary_genes_ignored() {
        let e = evaluator();
        assert!((e.evaluate_genes(&[2, -1, 1]).unwrap() - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_shorter_individual_allowed() {
        let e = evaluator();
        assert!((e.evaluate_genes(&[0, 1]).unwrap() - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_too_many_genes() {
        let e = evaluator();
        let err = e.evaluate_genes(&[0, 0, 0, 1]).unwrap_err();
        assert_eq!(err, CdeError::IndexOutOfRange { index: 3, len: 3 });
    }

    #[test]
    fn test_evaluate_in_place_caches() {
        let e = evaluator();
        let mut ind = Individual::new(vec![0, 0, 1]);
        let f = e.evaluate_in_place(&mut ind).unwrap();
        assert!((f - 3.0).abs() < 1e-10);
        assert_eq!(ind.fitness, f);
        assert!(ind.is_evaluated());
    }

    #[test]
    fn test_fitness_non_negative() {
        let e = FitnessEvaluator::new(&jobs_from_lengths(&[0, 50_000, 99_999, 7]));
        for mask in 0..16i32 {
            let genes: Vec<i32> = (0..4).map(|b| (mask >> b) & 1).collect();
            assert!(e.evaluate_genes(&genes).unwrap() >= 0.0);
        }
    }
}
