//! Workload distribution simulator for pools of identical processors.
//!
//! Assigns independent processes to processors with a priority-ordered,
//! least-loaded greedy policy, then simulates each processor's queue
//! sequentially to report waiting time, turnaround time, and pool
//! utilization. The computation is pure and deterministic; everything
//! random or networked lives in separate collaborators.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Process`, `SystemState`, `AllocationResult`
//! - **`distributor`**: The greedy `WorkloadDistributor` and `DistributionKpi`
//! - **`validation`**: Input checks (processor count, non-finite/negative times)
//! - **`generator`**: Seedable random process sets for exercising the core
//! - **`server`**: HTTP API (`/distribute`, `/generate-test-data`)
//! - **`config`**: Service configuration and CORS policy
//!
//! # Example
//!
//! ```
//! use workload_distributor::{distribute, Process};
//!
//! let processes = vec![
//!     Process::new(0, 0.0, 2.0, 1),
//!     Process::new(1, 0.0, 2.0, 5),
//! ];
//! let result = distribute(&processes, 1).unwrap();
//!
//! // Higher priority runs first
//! assert_eq!(result.queue(0).unwrap()[0].id, 1);
//! assert_eq!(result.waiting_time(0), Some(2.0));
//! ```
//!
//! # References
//!
//! - Graham (1969), "Bounds on Multiprocessing Timing Anomalies"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod config;
pub mod distributor;
pub mod error;
pub mod generator;
pub mod models;
pub mod server;
pub mod validation;

pub use distributor::{distribute, DistributionKpi, WorkloadDistributor};
pub use error::{DistributeError, Result};
pub use models::{AllocationResult, Process, SystemState};
