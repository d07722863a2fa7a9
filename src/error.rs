//! Error type for the optimizer.
//!
//! Every failure is surfaced at the point it is detected: bad seeds and
//! configuration when the optimizer is built, size problems before any
//! generation runs, and out-of-range gene lookups during evaluation.

use thiserror::Error;

use crate::validation::ValidationError;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CdeError>;

/// Errors produced by chaos seeding, evolution, and solution application.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CdeError {
    /// A gene index has no matching completed job.
    #[error("gene index {index} is out of range for {len} completed jobs")]
    IndexOutOfRange {
        /// First gene index without a job.
        index: usize,
        /// Number of completed jobs available.
        len: usize,
    },

    /// The chaos seed is a fixed point, a short cycle, or collapses onto one.
    #[error("chaos seed {seed} is degenerate: {reason}")]
    DegenerateSeed {
        /// The rejected seed.
        seed: f64,
        /// Why the seed was rejected.
        reason: &'static str,
    },

    /// An individual's length differs from the resource pool size.
    #[error("individual has {actual} genes but the resource pool has {expected} resources")]
    SizeMismatch {
        /// Resource pool size.
        expected: usize,
        /// Gene count found.
        actual: usize,
    },

    /// A configuration value is outside its allowed range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Input validation found one or more problems.
    #[error("invalid input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    /// A best-solution query was made on an empty population.
    #[error("population is empty")]
    EmptyPopulation,
}

fn summarize(errors: &[ValidationError]) -> String {
    match errors.first() {
        Some(first) if errors.len() > 1 => {
            format!("{} (and {} more)", first.message, errors.len() - 1)
        }
        Some(first) => first.message.clone(),
        None => "no details".to_string(),
    }
}

impl From<Vec<ValidationError>> for CdeError {
    fn from(errors: Vec<ValidationError>) -> Self {
        CdeError::InvalidInput(errors)
    }
}
