//! Chaos-driven differential operators.
//!
//! Both operators read their decisions from a [`ChaosStream`] passed in by
//! the caller. The stream is advanced, never restarted, so consecutive
//! calls see fresh values.
//!
//! # Mutation (DE/rand/1)
//!
//! Three donor slots are drawn as `min(P − 1, ⌊v·P⌋)`, then
//! `mutant[i] = repair(p1[i] + F·(p2[i] − p3[i]))`. Donors may coincide
//! with each other and with the target.
//!
//! # Crossover
//!
//! Start from the base individual; for each gene draw `v` and take the
//! mutant's gene when `v > CR`.
//!
//! # Reference
//! Storn & Price (1997), "Differential Evolution – A Simple and Efficient
//! Heuristic for Global Optimization over Continuous Spaces"

use log::debug;

use super::{CdeConfig, GeneRepair, Individual, Population};
use crate::chaos::ChaosStream;
use crate::error::{CdeError, Result};

/// Chaos values one mutation consumes to pick its donors.
pub const DONOR_DRAWS: usize = 3;

/// Result of a mutation: the donor slots and the mutant vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    /// Slots `(p1, p2, p3)` used as base and difference vectors.
    pub donors: [usize; 3],
    /// The mutant (unevaluated).
    pub mutant: Individual,
}

/// Maps a chaos value in (0, 1) to a population slot.
pub fn donor_index(value: f64, population_size: usize) -> usize {
    let idx = (value * population_size as f64).floor().max(0.0) as usize;
    idx.min(population_size.saturating_sub(1))
}

/// Builds a mutant for `target` from three chaos-selected donors.
///
/// # Errors
/// - [`CdeError::EmptyPopulation`] if `population` is empty.
/// - [`CdeError::SizeMismatch`] if a donor's length differs from the target's.
pub fn mutate(
    target: &Individual,
    population: &Population,
    mutation_factor: f64,
    repair: GeneRepair,
    stream: &mut ChaosStream,
) -> Result<Mutation> {
    if population.is_empty() {
        return Err(CdeError::EmptyPopulation);
    }
    let size = population.len();
    let donors = [
        donor_index(stream.next_value(), size),
        donor_index(stream.next_value(), size),
        donor_index(stream.next_value(), size),
    ];

    let mut parents = [target; 3];
    for (slot, &d) in parents.iter_mut().zip(&donors) {
        let donor = population.get(d).ok_or(CdeError::EmptyPopulation)?;
        if donor.len() != target.len() {
            return Err(CdeError::SizeMismatch {
                expected: target.len(),
                actual: donor.len(),
            });
        }
        *slot = donor;
    }
    let [p1, p2, p3] = parents;

    let genes: Vec<i32> = (0..target.len())
        .map(|i| {
            let diff = p2.genes[i] as f64 - p3.genes[i] as f64;
            repair.apply(p1.genes[i], mutation_factor * diff)
        })
        .collect();

    let mutant = Individual::new(genes);
    if !mutant.is_binary() {
        debug!("mutant from donors {donors:?} left the binary domain: {:?}", mutant.genes);
    }
    Ok(Mutation { donors, mutant })
}

/// Chaos-driven binomial crossover.
///
/// # Errors
/// [`CdeError::SizeMismatch`] if `base` and `mutant` differ in length.
pub fn crossover(
    base: &Individual,
    mutant: &Individual,
    crossover_rate: f64,
    stream: &mut ChaosStream,
) -> Result<Individual> {
    if base.len() != mutant.len() {
        return Err(CdeError::SizeMismatch {
            expected: base.len(),
            actual: mutant.len(),
        });
    }
    let genes = base
        .genes
        .iter()
        .zip(&mutant.genes)
        .map(|(&b, &m)| if stream.next_value() > crossover_rate { m } else { b })
        .collect();
    Ok(Individual::new(genes))
}

/// Mutation and crossover parameters bundled for the generation loop.
///
/// # Example
///
/// ```
/// use u_cde::de::{DifferentialOperators, GeneRepair};
///
/// let ops = DifferentialOperators::default();
/// assert_eq!(ops.gene_repair, GeneRepair::RoundClamp);
/// assert!((ops.crossover_rate - 0.8).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferentialOperators {
    /// Scale `F` applied to the difference vector.
    pub mutation_factor: f64,
    /// Threshold `CR`; a gene comes from the mutant when its draw exceeds it.
    pub crossover_rate: f64,
    /// Mapping from raw mutant values to genes.
    pub gene_repair: GeneRepair,
}

impl Default for DifferentialOperators {
    /// The operators of [`CdeConfig::default`].
    fn default() -> Self {
        CdeConfig::default().operators()
    }
}

impl DifferentialOperators {
    /// Performs mutation with the configured factor and repair.
    pub fn mutate(
        &self,
        target: &Individual,
        population: &Population,
        stream: &mut ChaosStream,
    ) -> Result<Mutation> {
        mutate(
            target,
            population,
            self.mutation_factor,
            self.gene_repair,
            stream,
        )
    }

    /// Performs crossover with the configured rate.
    pub fn crossover(
        &self,
        base: &Individual,
        mutant: &Individual,
        stream: &mut ChaosStream,
    ) -> Result<Individual> {
        crossover(base, mutant, self.crossover_rate, stream)
    }

    /// Chaos values consumed by one mutate-then-crossover on `genes` genes.
    pub fn draws_per_trial(genes: usize) -> usize {
        DONOR_DRAWS + genes
    }
}
