//! Generation controller.
//!
//! # Algorithm
//!
//! 1. Seed a chaos stream and build the initial population from it.
//! 2. Each generation, every slot gets a trial: mutate from three donors,
//!    cross the mutant with the slot's individual, evaluate. The trial
//!    replaces its own parent only if its fitness is strictly lower.
//! 3. After the last generation, the individual with the lowest fitness is
//!    the result.
//!
//! Trials within a generation are independent. Slot `k` reads the chaos
//! values at offset `k · (3 + genes)` of the generation's stream, so the
//! sequential and rayon paths produce identical populations.

use log::{debug, info, trace, warn};
use rayon::prelude::*;

use super::{
    init_population, CdeConfig, DifferentialOperators, FitnessEvaluator, Individual, Population,
};
use crate::chaos::{ChaosSeed, ChaosStream};
use crate::error::{CdeError, Result};
use crate::models::CompletedJob;

/// Outcome of one slot's trial in a generation.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialRecord {
    /// Population slot.
    pub index: usize,
    /// Donor slots `(p1, p2, p3)`.
    pub donors: [usize; 3],
    /// Mutant produced from the donors.
    pub mutant: Individual,
    /// Trial after crossover, with its fitness set.
    pub trial: Individual,
    /// Fitness of the slot's individual before selection.
    pub parent_fitness: f64,
    /// Fitness of the trial.
    pub trial_fitness: f64,
    /// Whether the trial replaced the parent.
    pub accepted: bool,
}

/// Summary figures for one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// Generation number, starting at 1.
    pub generation: usize,
    /// Lowest fitness after selection.
    pub best_fitness: f64,
    /// Mean fitness after selection.
    pub mean_fitness: f64,
    /// Trials that replaced their parent.
    pub accepted: usize,
}

/// Full detail of one generation, returned by [`CdeOptimizer::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// Per-slot trial outcomes, in slot order.
    pub records: Vec<TrialRecord>,
    /// Summary after selection.
    pub stats: GenerationStats,
}

/// Final state of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct CdeResult {
    /// Seed the run started from.
    pub seed: ChaosSeed,
    /// Generations executed.
    pub generations: usize,
    /// Population after the last generation.
    pub population: Population,
    /// Slot of the best individual.
    pub best_index: usize,
    /// Best individual (lowest fitness, lowest slot on ties).
    pub best: Individual,
    /// Its fitness.
    pub best_fitness: f64,
    /// Per-generation summaries.
    pub history: Vec<GenerationStats>,
}

/// Chaos differential evolution over resource-inclusion vectors.
///
/// # Example
///
/// ```
/// use u_cde::de::{CdeConfig, CdeOptimizer};
/// use u_cde::models::jobs_from_lengths;
///
/// let jobs = jobs_from_lengths(&[1000, 2000, 3000]);
/// let config = CdeConfig::default()
///     .with_population_size(4)
///     .with_generations(1)
///     .with_mutation_factor(0.5)
///     .with_seed(0.37);
/// let result = CdeOptimizer::new(config, &jobs, 3).unwrap().run().unwrap();
/// assert_eq!(result.best.genes, vec![1, 0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct CdeOptimizer {
    config: CdeConfig,
    seed: ChaosSeed,
    evaluator: FitnessEvaluator,
    operators: DifferentialOperators,
    stream: ChaosStream,
    population: Population,
    generation: usize,
    history: Vec<GenerationStats>,
}

impl CdeOptimizer {
    /// Validates inputs, seeds the chaos stream, and builds and evaluates
    /// the initial population.
    ///
    /// # Errors
    /// - [`CdeError::InvalidConfig`] / [`CdeError::DegenerateSeed`] from
    ///   [`CdeConfig::validate`].
    /// - [`CdeError::InvalidConfig`] if `resource_count` is 0.
    /// - [`CdeError::IndexOutOfRange`] if there are fewer jobs than resources.
    pub fn new(config: CdeConfig, jobs: &[CompletedJob], resource_count: usize) -> Result<Self> {
        config.validate()?;
        if resource_count == 0 {
            return Err(CdeError::InvalidConfig(
                "resource pool must contain at least one resource".into(),
            ));
        }
        if jobs.len() < resource_count {
            return Err(CdeError::IndexOutOfRange {
                index: jobs.len(),
                len: jobs.len(),
            });
        }

        let seed = config.resolve_seed(&mut rand::rng())?;
        let mut stream = ChaosStream::new(seed);
        let evaluator = FitnessEvaluator::new(jobs);
        let mut population = init_population(config.population_size, resource_count, &mut stream);
        for individual in population.individuals_mut() {
            evaluator.evaluate_in_place(individual)?;
        }
        debug!(
            "initialized {} individuals x {} genes from seed {}",
            population.len(),
            resource_count,
            seed.value()
        );

        Ok(Self {
            operators: config.operators(),
            config,
            seed,
            evaluator,
            stream,
            population,
            generation: 0,
            history: Vec::new(),
        })
    }

    /// The seed the run started from.
    pub fn seed(&self) -> ChaosSeed {
        self.seed
    }

    /// Current population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Generations executed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Summaries of executed generations.
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    /// Current chaos state (the next trial forks from here).
    pub fn stream(&self) -> &ChaosStream {
        &self.stream
    }

    /// Runs one generation and replaces the population.
    pub fn step(&mut self) -> Result<GenerationReport> {
        let draws = DifferentialOperators::draws_per_trial(self.population.gene_count());
        let streams: Vec<ChaosStream> = (0..self.population.len())
            .map(|_| {
                let fork = self.stream.clone();
                self.stream.discard(draws);
                fork
            })
            .collect();

        let population = &self.population;
        let evaluator = &self.evaluator;
        let operators = &self.operators;
        let records: Vec<TrialRecord> = if self.config.parallel {
            population
                .individuals()
                .par_iter()
                .zip(streams.into_par_iter())
                .enumerate()
                .map(|(index, (parent, mut stream))| {
                    evolve_slot(index, parent, population, evaluator, operators, &mut stream)
                })
                .collect::<Result<_>>()?
        } else {
            population
                .iter()
                .zip(streams)
                .enumerate()
                .map(|(index, (parent, mut stream))| {
                    evolve_slot(index, parent, population, evaluator, operators, &mut stream)
                })
                .collect::<Result<_>>()?
        };

        let next: Vec<Individual> = records
            .iter()
            .zip(self.population.iter())
            .map(|(record, parent)| {
                if record.accepted {
                    record.trial.clone()
                } else {
                    parent.clone()
                }
            })
            .collect();
        self.population = Population::new(next);
        self.generation += 1;

        let stats = GenerationStats {
            generation: self.generation,
            best_fitness: self
                .population
                .best()
                .map_or(f64::INFINITY, |(_, b)| b.fitness),
            mean_fitness: self.population.mean_fitness(),
            accepted: records.iter().filter(|r| r.accepted).count(),
        };
        debug!(
            "generation {}: best {:.3}, mean {:.3}, {} accepted",
            stats.generation, stats.best_fitness, stats.mean_fitness, stats.accepted
        );
        self.history.push(stats);

        Ok(GenerationReport { records, stats })
    }

    /// Runs the remaining configured generations and returns the result.
    pub fn run(mut self) -> Result<CdeResult> {
        while self.generation < self.config.generations {
            self.step()?;
        }
        self.finish()
    }

    /// Picks the best individual of the current population.
    pub fn finish(self) -> Result<CdeResult> {
        let (best_index, best) = self.population.best().ok_or(CdeError::EmptyPopulation)?;
        let best = best.clone();
        let best_fitness = best.fitness;

        let off_domain = self.population.iter().filter(|i| !i.is_binary()).count();
        if off_domain > 0 {
            warn!("{off_domain} individuals carry genes outside {{0, 1}}");
        }
        info!("Best solution found has fitness value: {best_fitness}");

        Ok(CdeResult {
            seed: self.seed,
            generations: self.generation,
            population: self.population,
            best_index,
            best,
            best_fitness,
            history: self.history,
        })
    }
}

/// Mutate, cross over, evaluate, and select for one slot.
fn evolve_slot(
    index: usize,
    parent: &Individual,
    population: &Population,
    evaluator: &FitnessEvaluator,
    operators: &DifferentialOperators,
    stream: &mut ChaosStream,
) -> Result<TrialRecord> {
    let mutation = operators.mutate(parent, population, stream)?;
    let mut trial = operators.crossover(parent, &mutation.mutant, stream)?;
    let trial_fitness = evaluator.evaluate_in_place(&mut trial)?;
    let accepted = trial_fitness < parent.fitness;
    trace!(
        "slot {index}: donors {:?}, parent {:.3}, trial {:.3}, {}",
        mutation.donors,
        parent.fitness,
        trial_fitness,
        if accepted { "accepted" } else { "kept parent" }
    );
    Ok(TrialRecord {
        index,
        donors: mutation.donors,
        mutant: mutation.mutant,
        trial,
        parent_fitness: parent.fitness,
        trial_fitness,
        accepted,
    })
}
