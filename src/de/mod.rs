//! Chaos differential evolution for resource selection.
//!
//! Evolves binary inclusion vectors (one gene per resource) to minimize the
//! scaled processing time of the jobs on selected slots. All stochastic
//! decisions come from a logistic-map [`ChaosStream`](crate::chaos::ChaosStream).
//!
//! # Submodules
//!
//! - [`operators`]: donor selection, mutation, and crossover
//!
//! # Reference
//! - Storn & Price (1997), "Differential Evolution"
//! - Coelho & Mariani (2006), "Combining of chaotic differential evolution
//!   and quadratic programming for economic dispatch optimization"

mod config;
mod fitness;
mod individual;
pub mod operators;
mod population;
mod runner;

pub use config::CdeConfig;
pub use fitness::FitnessEvaluator;
pub use individual::{GeneRepair, Individual};
pub use operators::{crossover, mutate, DifferentialOperators, Mutation};
pub use population::{init_population, Population};
pub use runner::{CdeOptimizer, CdeResult, GenerationReport, GenerationStats, TrialRecord};
