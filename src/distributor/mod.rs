//! Greedy workload distribution and KPI evaluation.
//!
//! # Algorithm
//!
//! `WorkloadDistributor` orders processes by priority and hands each one to
//! the least-loaded processor, then simulates every processor queue to
//! obtain waiting and turnaround times. Not optimal, but fast and
//! deterministic.
//!
//! # KPI
//!
//! `DistributionKpi` summarizes a result: makespan, waiting/turnaround
//! averages, per-processor load and utilization.

mod greedy;
mod kpi;

pub use greedy::{distribute, WorkloadDistributor};
pub use kpi::DistributionKpi;
