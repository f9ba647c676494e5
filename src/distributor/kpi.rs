//! Distribution quality metrics (KPIs).
//!
//! Derived purely from an [`AllocationResult`], so it can be evaluated on
//! results received over the wire as well as on fresh runs.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Latest completion (arrival + turnaround) |
//! | Avg / Max Waiting | Over all processes |
//! | Avg Turnaround | Over all processes |
//! | Load by Processor | Sum of burst times per queue |
//! | Load Imbalance | Max load − min load |
//! | Utilization | Copied from the result (percent) |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::AllocationResult;

/// Distribution performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionKpi {
    /// Latest simulated completion time.
    pub makespan: f64,
    /// Mean waiting time (0 when there are no processes).
    pub avg_waiting_time: f64,
    /// Largest waiting time of any process.
    pub max_waiting_time: f64,
    /// Mean turnaround time (0 when there are no processes).
    pub avg_turnaround_time: f64,
    /// Assigned burst time per processor index.
    pub load_by_processor: BTreeMap<usize, f64>,
    /// Difference between the busiest and idlest processor.
    pub load_imbalance: f64,
    /// Pool utilization in percent.
    pub utilization: f64,
}

impl DistributionKpi {
    /// Computes KPIs from a distribution result.
    pub fn calculate(result: &AllocationResult) -> Self {
        let makespan = result
            .processes()
            .filter_map(|p| result.turnaround_time(p.id).map(|t| p.arrival_time + t))
            .fold(0.0, f64::max);

        let avg_waiting_time = mean(result.waiting_times.values().copied());
        let max_waiting_time = result.waiting_times.values().copied().fold(0.0, f64::max);
        let avg_turnaround_time = mean(result.turnaround_times.values().copied());

        let load_by_processor: BTreeMap<usize, f64> = result
            .processor_allocations
            .iter()
            .map(|(&idx, queue)| (idx, queue.iter().map(|p| p.burst_time).sum()))
            .collect();

        let load_imbalance = if load_by_processor.is_empty() {
            0.0
        } else {
            let max = load_by_processor.values().copied().fold(f64::MIN, f64::max);
            let min = load_by_processor.values().copied().fold(f64::MAX, f64::min);
            max - min
        };

        Self {
            makespan,
            avg_waiting_time,
            max_waiting_time,
            avg_turnaround_time,
            load_by_processor,
            load_imbalance,
            utilization: result.utilization,
        }
    }

    /// Whether the distribution meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_avg_waiting: f64, min_utilization: f64) -> bool {
        self.avg_waiting_time <= max_avg_waiting && self.utilization >= min_utilization
    }
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len();
    if n == 0 {
        0.0
    } else {
        values.sum::<f64>() / n as f64
    }
}
