//! Allocation result model.
//!
//! Snapshot produced by one distribution run: which processor received
//! which processes, the simulated waiting/turnaround time of each process,
//! and the aggregate utilization of the pool.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Process;

/// Result of distributing processes over a processor pool.
///
/// Every processor index `0..num_processors` has an entry in
/// `processor_allocations`, possibly with an empty queue. Queues keep
/// assignment order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// Processor index → processes in assignment order.
    pub processor_allocations: BTreeMap<usize, Vec<Process>>,
    /// Process ID → time between arrival and start.
    pub waiting_times: BTreeMap<i64, f64>,
    /// Process ID → time between arrival and completion.
    pub turnaround_times: BTreeMap<i64, f64>,
    /// Useful work over available processor-time, in percent (0..=100).
    pub utilization: f64,
}

impl AllocationResult {
    /// Number of processors in the pool.
    pub fn processor_count(&self) -> usize {
        self.processor_allocations.len()
    }

    /// Number of allocated processes.
    pub fn process_count(&self) -> usize {
        self.processor_allocations.values().map(Vec::len).sum()
    }

    /// Queue of the given processor, in assignment order.
    pub fn queue(&self, processor: usize) -> Option<&[Process]> {
        self.processor_allocations
            .get(&processor)
            .map(Vec::as_slice)
    }

    /// Index of the processor a process was assigned to.
    pub fn processor_of(&self, process_id: i64) -> Option<usize> {
        self.processor_allocations
            .iter()
            .find(|(_, queue)| queue.iter().any(|p| p.id == process_id))
            .map(|(&idx, _)| idx)
    }

    /// Simulated waiting time of a process.
    pub fn waiting_time(&self, process_id: i64) -> Option<f64> {
        self.waiting_times.get(&process_id).copied()
    }

    /// Simulated turnaround time of a process.
    pub fn turnaround_time(&self, process_id: i64) -> Option<f64> {
        self.turnaround_times.get(&process_id).copied()
    }

    /// Iterates over all allocated processes, processor by processor.
    pub fn processes(&self) -> impl Iterator<Item = &Process> {
        self.processor_allocations.values().flatten()
    }
}
