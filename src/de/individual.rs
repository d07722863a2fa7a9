//! Inclusion-vector individual and gene repair.
//!
//! # Encoding
//!
//! One integer gene per resource slot. `1` selects the resource, `0`
//! leaves it out. Differential mutation is arithmetic, so a raw mutant gene
//! can land anywhere in `p1 ± F`; [`GeneRepair`] decides how it is mapped
//! back to an integer.

use serde::{Deserialize, Serialize};

/// How a mutant gene is formed from the base gene `p1` and the scaled
/// difference `F·(p2 − p3)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneRepair {
    /// Round `p1 + F·(p2 − p3)` to the nearest integer (halves away from
    /// zero), then clamp to {0, 1}. Genes always stay binary.
    #[default]
    RoundClamp,
    /// Truncate the scaled difference toward zero and add it to `p1`,
    /// without clamping. With `F < 1` the mutant equals `p1`; with `F ≥ 1`
    /// genes can leave {0, 1}, and such genes never count as selected.
    Truncate,
}

impl GeneRepair {
    /// Combines a base gene with a scaled difference.
    pub fn apply(self, base: i32, scaled_diff: f64) -> i32 {
        match self {
            GeneRepair::RoundClamp => (base as f64 + scaled_diff).round().clamp(0.0, 1.0) as i32,
            GeneRepair::Truncate => (base as f64 + scaled_diff.trunc()) as i32,
        }
    }
}

/// A candidate resource-inclusion vector.
///
/// Lower fitness = better (minimization convention). Fitness is
/// `f64::INFINITY` until the individual has been evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    /// One gene per resource slot.
    pub genes: Vec<i32>,
    /// Cached fitness value.
    pub fitness: f64,
}

impl Individual {
    /// Creates an unevaluated individual.
    pub fn new(genes: Vec<i32>) -> Self {
        Self {
            genes,
            fitness: f64::INFINITY,
        }
    }

    /// An individual that selects nothing.
    pub fn zeros(len: usize) -> Self {
        Self::new(vec![0; len])
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the individual has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Whether every gene is 0 or 1.
    pub fn is_binary(&self) -> bool {
        self.genes.iter().all(|&g| g == 0 || g == 1)
    }

    /// Whether the cached fitness is set.
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_finite()
    }

    /// Gene indices equal to 1.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.genes
            .iter()
            .enumerate()
            .filter(|(_, &g)| g == 1)
            .map(|(i, _)| i)
            .collect()
    }
}

impl From<Vec<i32>> for Individual {
    fn from(genes: Vec<i32>) -> Self {
        Self::new(genes)
    }
}
