//! Population container and chaotic initialization.

use super::Individual;
use crate::chaos::ChaosStream;

/// Fixed-size, ordered set of individuals evolved together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Wraps individuals in their current order.
    pub fn new(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Whether the population is empty.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Individual at a slot.
    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index)
    }

    /// Iterates individuals in slot order.
    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.individuals.iter()
    }

    /// All individuals in slot order.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Mutable access, used to store evaluated fitness.
    pub(crate) fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    /// Gene count of the first individual (0 when empty).
    pub fn gene_count(&self) -> usize {
        self.individuals.first().map_or(0, Individual::len)
    }

    /// Cached fitness of every slot.
    pub fn fitness_values(&self) -> Vec<f64> {
        self.individuals.iter().map(|i| i.fitness).collect()
    }

    /// Mean cached fitness (0.0 when empty).
    pub fn mean_fitness(&self) -> f64 {
        if self.individuals.is_empty() {
            return 0.0;
        }
        self.individuals.iter().map(|i| i.fitness).sum::<f64>() / self.individuals.len() as f64
    }

    /// Slot and individual with the lowest cached fitness.
    ///
    /// Ties resolve to the lowest slot.
    pub fn best(&self) -> Option<(usize, &Individual)> {
        self.individuals
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.fitness.total_cmp(&b.1.fitness))
    }
}

/// Builds the initial population from one continuous chaos stream.
///
/// Each gene advances the stream once and becomes 1 when the value is
/// above 0.5. The stream carries over from gene to gene and from individual
/// to individual, so no two genes share a chaos value.
pub fn init_population(
    population_size: usize,
    resource_count: usize,
    stream: &mut ChaosStream,
) -> Population {
    let individuals = (0..population_size)
        .map(|_| {
            let genes = (0..resource_count)
                .map(|_| i32::from(stream.next_value() > 0.5))
                .collect();
            Individual::new(genes)
        })
        .collect();
    Population::new(individuals)
}
