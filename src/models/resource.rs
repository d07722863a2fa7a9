//! Resource (VM) model and the resource pool.
//!
//! A resource is a compute unit that jobs run on. Its position in the
//! [`ResourcePool`] is its gene index: gene `i` of an individual decides
//! whether resource `i` is selected.

use serde::{Deserialize, Serialize};

/// Policy a resource uses to share its processors among jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloudletScheduler {
    /// All jobs progress concurrently on a shared processor.
    TimeShared,
    /// Each job holds its processors until it finishes.
    SpaceShared,
}

/// A virtual machine in the pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource identifier.
    pub id: usize,
    /// Processing speed per processing element (MIPS).
    pub mips: u32,
    /// Number of processing elements.
    pub pes: u32,
    /// Memory (MB).
    pub ram_mb: u32,
    /// Bandwidth.
    pub bandwidth: u64,
    /// Image size (MB).
    pub image_size_mb: u64,
    /// Virtual machine monitor.
    pub vmm: String,
    /// Job scheduling policy. `None` until one is installed.
    pub scheduler: Option<CloudletScheduler>,
    /// Whether the optimizer selected this resource.
    pub selected: bool,
}

impl Resource {
    /// Creates a resource with the default VM template: 1000 MIPS, one
    /// processing element, 512 MB RAM, 1000 bandwidth, 10000 MB image, Xen.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            mips: 1000,
            pes: 1,
            ram_mb: 512,
            bandwidth: 1000,
            image_size_mb: 10_000,
            vmm: "Xen".to_string(),
            scheduler: None,
            selected: false,
        }
    }

    /// Sets the MIPS rating.
    pub fn with_mips(mut self, mips: u32) -> Self {
        self.mips = mips;
        self
    }

    /// Sets the number of processing elements.
    pub fn with_pes(mut self, pes: u32) -> Self {
        self.pes = pes;
        self
    }

    /// Sets memory in MB.
    pub fn with_ram(mut self, ram_mb: u32) -> Self {
        self.ram_mb = ram_mb;
        self
    }

    /// Sets the bandwidth.
    pub fn with_bandwidth(mut self, bandwidth: u64) -> Self {
        self.bandwidth = bandwidth;
        self
    }

    /// Sets the job scheduling policy.
    pub fn with_scheduler(mut self, scheduler: CloudletScheduler) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Total MIPS across all processing elements.
    pub fn total_mips(&self) -> u64 {
        self.mips as u64 * self.pes as u64
    }

    /// Marks the resource as selected and installs a fresh time-shared
    /// scheduler, replacing whatever policy it had.
    pub fn enable(&mut self) {
        self.scheduler = Some(CloudletScheduler::TimeShared);
        self.selected = true;
    }
}

/// Ordered collection of resources. Index `i` is gene `i`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourcePool {
    resources: Vec<Resource>,
}

impl ResourcePool {
    /// Creates a pool from resources in gene order.
    pub fn new(resources: Vec<Resource>) -> Self {
        Self { resources }
    }

    /// Creates `count` default resources with IDs `0..count`.
    pub fn with_default_resources(count: usize) -> Self {
        Self::new((0..count).map(Resource::new).collect())
    }

    /// Number of resources (the gene count).
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the pool has no resources.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Resource at a gene index.
    pub fn get(&self, index: usize) -> Option<&Resource> {
        self.resources.get(index)
    }

    /// Mutable resource at a gene index.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Resource> {
        self.resources.get_mut(index)
    }

    /// Iterates resources in gene order.
    pub fn iter(&self) -> std::slice::Iter<'_, Resource> {
        self.resources.iter()
    }

    /// All resources in gene order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Gene indices of resources marked selected.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.resources
            .iter()
            .enumerate()
            .filter(|(_, r)| r.selected)
            .map(|(i, _)| i)
            .collect()
    }
}

impl From<Vec<Resource>> for ResourcePool {
    fn from(resources: Vec<Resource>) -> Self {
        Self::new(resources)
    }
}
