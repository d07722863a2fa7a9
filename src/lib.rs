//! Chaos-seeded differential evolution for cloud resource selection.
//!
//! Given the completed jobs of a simulation run and the resource pool they
//! ran on, chooses which resources to enable so that the scaled processing
//! time of the jobs on selected slots is minimal. The simulation itself
//! (datacenters, brokers, job generation) lives outside this crate.
//!
//! # Modules
//!
//! - **`chaos`**: Logistic-map seed validation and the threaded chaos stream
//! - **`de`**: Population, fitness, mutation/crossover, generation controller
//! - **`apply`**: Projecting the best individual onto the resource pool
//! - **`models`**: `CompletedJob`, `Resource`, `ResourcePool`
//! - **`kpi`**: Workload and selection metrics
//! - **`validation`**: Input integrity checks (duplicate IDs, job coverage)
//!
//! # Logging
//!
//! Emits records through the `log` facade; install any backend to see them.
//!
//! # References
//!
//! - Storn & Price (1997), "Differential Evolution"
//! - May (1976), "Simple mathematical models with very complicated dynamics"

pub mod apply;
pub mod chaos;
pub mod de;
pub mod error;
pub mod kpi;
pub mod models;
pub mod validation;

pub use error::{CdeError, Result};
