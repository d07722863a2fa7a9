//! Domain models exchanged with the simulation.
//!
//! | u-cde | Simulation |
//! |-------|-----------|
//! | CompletedJob | Finished cloudlet |
//! | Resource | Virtual machine |
//! | ResourcePool | Broker's VM list |

mod job;
mod resource;

pub use job::{jobs_from_lengths, CompletedJob, JobStatus};
pub use resource::{CloudletScheduler, Resource, ResourcePool};
