//! Priority-ordered, least-loaded greedy distributor.
//!
//! # Algorithm
//!
//! 1. Stable-sort processes by priority, descending.
//! 2. Assign each process to the processor with the smallest accumulated
//!    burst time (lowest index on ties).
//! 3. Simulate each processor's queue sequentially and non-preemptively
//!    to obtain waiting and turnaround times.
//! 4. Utilization = total work / (processors × latest completion).
//!
//! The assignment is list scheduling driven by priority rather than by
//! processing time (compare LPT). It balances load but does not minimize
//! makespan.
//!
//! # Complexity
//! O(n log n + n * m) where n=processes, m=processors.
//!
//! # Reference
//! Graham (1969), "Bounds on Multiprocessing Timing Anomalies"

use std::collections::BTreeMap;

use crate::error::{DistributeError, Result};
use crate::models::{AllocationResult, Process};
use crate::validation::{duplicate_ids, validate_input};

/// Per-processor bookkeeping for one run.
#[derive(Debug, Clone, Default)]
struct ProcessorState {
    /// Assigned processes, in assignment order.
    queue: Vec<Process>,
    /// Sum of assigned burst times. Drives least-loaded selection only.
    accumulated_burst: f64,
    /// Simulated completion of the last queued process.
    completion_time: f64,
}

impl ProcessorState {
    fn push(&mut self, process: &Process) {
        self.accumulated_burst += process.burst_time;
        self.queue.push(process.clone());
    }
}

/// Greedy workload distributor over a pool of identical processors.
///
/// Stateless: a single instance can be shared across threads and reused.
///
/// # Example
///
/// ```
/// use workload_distributor::distributor::WorkloadDistributor;
/// use workload_distributor::models::Process;
///
/// let processes = vec![
///     Process::new(0, 0.0, 5.0, 1),
///     Process::new(1, 0.0, 3.0, 1),
/// ];
/// let result = WorkloadDistributor::new().distribute(&processes, 1).unwrap();
///
/// assert_eq!(result.waiting_time(1), Some(5.0));
/// assert_eq!(result.turnaround_time(1), Some(8.0));
/// assert_eq!(result.utilization, 100.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkloadDistributor;

impl WorkloadDistributor {
    /// Creates a new distributor.
    pub fn new() -> Self {
        Self
    }

    /// Distributes `processes` over `num_processors` processors.
    ///
    /// # Errors
    /// `InvalidArgument` if `num_processors` is zero or too large to
    /// allocate, or a process has a non-finite or negative arrival/burst
    /// time. Nothing is computed in that case.
    pub fn distribute(
        &self,
        processes: &[Process],
        num_processors: usize,
    ) -> Result<AllocationResult> {
        validate_input(processes, num_processors)?;

        let duplicates = duplicate_ids(processes);
        if !duplicates.is_empty() {
            tracing::warn!(
                ?duplicates,
                "Duplicate process IDs; their time entries will be merged"
            );
        }

        let mut processors = assign(processes, num_processors)?;
        let (waiting_times, turnaround_times) = simulate(&mut processors);
        let utilization = utilization(processes, &processors);

        tracing::debug!(
            processes = processes.len(),
            num_processors,
            utilization,
            "Distributed workload"
        );

        Ok(AllocationResult {
            processor_allocations: processors
                .into_iter()
                .enumerate()
                .map(|(idx, state)| (idx, state.queue))
                .collect(),
            waiting_times,
            turnaround_times,
            utilization,
        })
    }
}

/// Distributes processes with a default [`WorkloadDistributor`].
pub fn distribute(processes: &[Process], num_processors: usize) -> Result<AllocationResult> {
    WorkloadDistributor::new().distribute(processes, num_processors)
}

/// Phase 1: priority-ordered least-loaded assignment.
fn assign(processes: &[Process], num_processors: usize) -> Result<Vec<ProcessorState>> {
    let mut processors: Vec<ProcessorState> = Vec::new();
    processors.try_reserve_exact(num_processors).map_err(|e| {
        DistributeError::InvalidArgument(format!(
            "num_processors {num_processors} cannot be allocated: {e}"
        ))
    })?;
    processors.resize_with(num_processors, ProcessorState::default);

    // sort_by is stable: equal priorities keep input order
    let mut order: Vec<&Process> = processes.iter().collect();
    order.sort_by(|a, b| b.priority.cmp(&a.priority));

    for process in order {
        let target = least_loaded(&processors);
        processors[target].push(process);
    }
    Ok(processors)
}

/// Index of the processor with minimum accumulated burst, first on ties.
fn least_loaded(processors: &[ProcessorState]) -> usize {
    let mut best = 0;
    for (idx, state) in processors.iter().enumerate().skip(1) {
        if state.accumulated_burst < processors[best].accumulated_burst {
            best = idx;
        }
    }
    best
}

/// Phase 2: sequential, non-preemptive execution of each queue.
fn simulate(processors: &mut [ProcessorState]) -> (BTreeMap<i64, f64>, BTreeMap<i64, f64>) {
    let mut waiting_times = BTreeMap::new();
    let mut turnaround_times = BTreeMap::new();

    for state in processors.iter_mut() {
        let mut current_time = 0.0_f64;
        for process in &state.queue {
            let start = current_time.max(process.arrival_time);
            let completion = start + process.burst_time;

            waiting_times.insert(process.id, (start - process.arrival_time).max(0.0));
            turnaround_times.insert(process.id, (completion - process.arrival_time).max(0.0));

            current_time = completion;
        }
        state.completion_time = current_time;
    }

    (waiting_times, turnaround_times)
}

/// Phase 3: useful work over available processor-time, in percent.
fn utilization(processes: &[Process], processors: &[ProcessorState]) -> f64 {
    let total_work: f64 = processes.iter().map(|p| p.burst_time).sum();
    let max_completion = processors
        .iter()
        .map(|s| s.completion_time)
        .fold(0.0, f64::max);
    let total_available = processors.len() as f64 * max_completion;

    if total_available > 0.0 {
        (100.0 * total_work / total_available).min(100.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(queue: &[Process]) -> Vec<i64> {
        queue.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_single_processor_sequential() {
        let processes = vec![Process::new(0, 0.0, 5.0, 1), Process::new(1, 0.0, 3.0, 1)];
        let r = distribute(&processes, 1).unwrap();

        assert_eq!(ids(r.queue(0).unwrap()), vec![0, 1]);
        assert_eq!(r.waiting_time(0), Some(0.0));
        assert_eq!(r.turnaround_time(0), Some(5.0));
        assert_eq!(r.waiting_time(1), Some(5.0));
        assert_eq!(r.turnaround_time(1), Some(8.0));
        assert!((r.utilization - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_priority_ordering() {
        let processes = vec![Process::new(0, 0.0, 2.0, 1), Process::new(1, 0.0, 2.0, 5)];
        let r = distribute(&processes, 1).unwrap();

        assert_eq!(ids(r.queue(0).unwrap()), vec![1, 0]);
        assert_eq!(r.waiting_time(1), Some(0.0));
        assert_eq!(r.turnaround_time(1), Some(2.0));
        assert_eq!(r.waiting_time(0), Some(2.0));
        assert_eq!(r.turnaround_time(0), Some(4.0));
    }

    #[test]
    fn test_empty_input() {
        let r = distribute(&[], 3).unwrap();
        assert_eq!(r.processor_count(), 3);
        assert_eq!(r.process_count(), 0);
        assert!(r.waiting_times.is_empty());
        assert!(r.turnaround_times.is_empty());
        assert_eq!(r.utilization, 0.0);
    }

    #[test]
    fn test_zero_processors_rejected() {
        let err = distribute(&[Process::new(0, 0.0, 1.0, 1)], 0).unwrap_err();
        assert!(matches!(err, DistributeError::InvalidArgument(_)));
    }

    #[test]
    fn test_unallocatable_processor_count_rejected() {
        let err = distribute(&[Process::new(0, 0.0, 1.0, 1)], usize::MAX / 2).unwrap_err();
        match err {
            DistributeError::InvalidArgument(msg) => assert!(msg.contains("cannot be allocated")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_process_rejected() {
        let processes = vec![Process::new(0, 0.0, 1.0, 1), Process::new(1, 0.0, f64::NAN, 1)];
        let err = distribute(&processes, 2).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        // All loads equal at 0 → processors filled 0, 1, 2 in order
        let processes = vec![
            Process::new(0, 0.0, 1.0, 1),
            Process::new(1, 0.0, 1.0, 1),
            Process::new(2, 0.0, 1.0, 1),
            Process::new(3, 0.0, 1.0, 1),
        ];
        let r = distribute(&processes, 3).unwrap();
        assert_eq!(ids(r.queue(0).unwrap()), vec![0, 3]);
        assert_eq!(ids(r.queue(1).unwrap()), vec![1]);
        assert_eq!(ids(r.queue(2).unwrap()), vec![2]);
    }

    #[test]
    fn test_least_loaded_selection() {
        // P0 (burst 4) → cpu0, P1 (burst 1) → cpu1, P2 → cpu1 (load 1 < 4)
        let processes = vec![
            Process::new(0, 0.0, 4.0, 3),
            Process::new(1, 0.0, 1.0, 2),
            Process::new(2, 0.0, 2.0, 1),
        ];
        let r = distribute(&processes, 2).unwrap();
        assert_eq!(ids(r.queue(0).unwrap()), vec![0]);
        assert_eq!(ids(r.queue(1).unwrap()), vec![1, 2]);
        assert_eq!(r.waiting_time(2), Some(1.0));
        assert_eq!(r.turnaround_time(2), Some(3.0));
    }

    #[test]
    fn test_late_arrival_leaves_idle_gap() {
        let processes = vec![Process::new(0, 0.0, 1.0, 2), Process::new(1, 4.0, 2.0, 1)];
        let r = distribute(&processes, 1).unwrap();
        // P1 starts at its arrival (4), not at P0's completion (1)
        assert_eq!(r.waiting_time(1), Some(0.0));
        assert_eq!(r.turnaround_time(1), Some(2.0));
        // work 3 over 1 × 6
        assert!((r.utilization - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_utilization_uses_simulated_completion() {
        // Accumulated burst is 2 on each processor, but cpu1 completes at 12
        let processes = vec![Process::new(0, 0.0, 2.0, 2), Process::new(1, 10.0, 2.0, 1)];
        let r = distribute(&processes, 2).unwrap();
        assert_eq!(r.processor_of(1), Some(1));
        // work 4 over 2 × 12
        assert!((r.utilization - 100.0 * 4.0 / 24.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_burst_processes() {
        let processes = vec![Process::new(0, 0.0, 0.0, 1), Process::new(1, 0.0, 0.0, 1)];
        let r = distribute(&processes, 2).unwrap();
        assert_eq!(r.turnaround_time(0), Some(0.0));
        assert_eq!(r.utilization, 0.0);
    }

    #[test]
    fn test_stable_within_priority_tier() {
        let processes = vec![
            Process::new(10, 0.0, 1.0, 2),
            Process::new(11, 0.0, 1.0, 9),
            Process::new(12, 0.0, 1.0, 2),
            Process::new(13, 0.0, 1.0, 2),
        ];
        let r = distribute(&processes, 1).unwrap();
        assert_eq!(ids(r.queue(0).unwrap()), vec![11, 10, 12, 13]);
    }

    #[test]
    fn test_more_processors_than_processes() {
        let processes = vec![Process::new(0, 1.0, 3.0, 1)];
        let r = distribute(&processes, 4).unwrap();
        assert_eq!(r.processor_count(), 4);
        assert_eq!(r.processor_of(0), Some(0));
        // work 3 over 4 × 4
        assert!((r.utilization - 18.75).abs() < 1e-10);
    }
}
