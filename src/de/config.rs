//! Optimizer configuration.
//!
//! Defaults reproduce the reference run: 50 individuals, 800 generations,
//! `CR = 0.8`, `F = 0.75`, and a seed drawn at random.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{DifferentialOperators, GeneRepair};
use crate::chaos::ChaosSeed;
use crate::error::{CdeError, Result};

/// Parameters of a chaos differential evolution run.
///
/// # Example
///
/// ```
/// use u_cde::de::CdeConfig;
///
/// let config = CdeConfig::default()
///     .with_population_size(20)
///     .with_generations(100)
///     .with_seed(0.37);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CdeConfig {
    /// Individuals per generation (≥ 1).
    pub population_size: usize,
    /// Generations to run. 0 returns the initial population.
    pub generations: usize,
    /// Crossover threshold `CR` in [0, 1].
    pub crossover_rate: f64,
    /// Mutation scale `F` (≥ 0).
    pub mutation_factor: f64,
    /// Chaos seed in (0, 1). `None` draws one at random.
    pub seed: Option<f64>,
    /// Mapping from raw mutant values to genes.
    pub gene_repair: GeneRepair,
    /// Run each generation's trials on the rayon pool.
    pub parallel: bool,
}

impl Default for CdeConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 800,
            crossover_rate: 0.8,
            mutation_factor: 0.75,
            seed: None,
            gene_repair: GeneRepair::RoundClamp,
            parallel: false,
        }
    }
}

impl CdeConfig {
    /// Parses a JSON configuration; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CdeError::InvalidConfig(e.to_string()))
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, crossover_rate: f64) -> Self {
        self.crossover_rate = crossover_rate;
        self
    }

    /// Sets the mutation factor.
    pub fn with_mutation_factor(mut self, mutation_factor: f64) -> Self {
        self.mutation_factor = mutation_factor;
        self
    }

    /// Fixes the chaos seed.
    pub fn with_seed(mut self, seed: f64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the gene repair strategy.
    pub fn with_gene_repair(mut self, gene_repair: GeneRepair) -> Self {
        self.gene_repair = gene_repair;
        self
    }

    /// Enables or disables parallel trials.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks every parameter range, including an explicit seed.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(CdeError::InvalidConfig(
                "population_size must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(CdeError::InvalidConfig(format!(
                "crossover_rate must be in [0, 1], got {}",
                self.crossover_rate
            )));
        }
        if !self.mutation_factor.is_finite() || self.mutation_factor < 0.0 {
            return Err(CdeError::InvalidConfig(format!(
                "mutation_factor must be finite and non-negative, got {}",
                self.mutation_factor
            )));
        }
        if let Some(seed) = self.seed {
            ChaosSeed::new(seed)?;
        }
        Ok(())
    }

    /// The configured seed, or a fresh one drawn from `rng`.
    pub fn resolve_seed<R: Rng>(&self, rng: &mut R) -> Result<ChaosSeed> {
        match self.seed {
            Some(seed) => ChaosSeed::new(seed),
            None => Ok(ChaosSeed::random(rng)),
        }
    }

    /// Operator parameters for the generation loop.
    pub fn operators(&self) -> DifferentialOperators {
        DifferentialOperators {
            mutation_factor: self.mutation_factor,
            crossover_rate: self.crossover_rate,
            gene_repair: self.gene_repair,
        }
    }
}
