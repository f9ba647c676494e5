//! Process model.
//!
//! A process is an independent unit of computational work that is
//! distributed onto one processor of a homogeneous pool.

use serde::{Deserialize, Serialize};

use crate::validation::{check_process, ValidationError};

/// A process to be distributed.
///
/// Times are abstract simulation units relative to t=0.
/// `id` is supplied by the caller and is not checked for uniqueness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    /// Caller-supplied identifier.
    pub id: i64,
    /// Time at which the process becomes available.
    pub arrival_time: f64,
    /// Uninterrupted processing time required once started.
    pub burst_time: f64,
    /// Scheduling priority (higher = assigned first).
    pub priority: i32,
}

impl Process {
    /// Creates a process without checking its fields.
    ///
    /// Use [`Process::try_new`] for input coming from outside the crate.
    pub fn new(id: i64, arrival_time: f64, burst_time: f64, priority: i32) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            priority,
        }
    }

    /// Creates a process, rejecting non-finite or negative times.
    ///
    /// # Example
    ///
    /// ```
    /// use workload_distributor::models::Process;
    ///
    /// assert!(Process::try_new(0, 0.0, 2.5, 1).is_ok());
    /// assert!(Process::try_new(1, -1.0, 2.5, 1).is_err());
    /// assert!(Process::try_new(2, 0.0, f64::NAN, 1).is_err());
    /// ```
    pub fn try_new(
        id: i64,
        arrival_time: f64,
        burst_time: f64,
        priority: i32,
    ) -> Result<Self, ValidationError> {
        let process = Self::new(id, arrival_time, burst_time, priority);
        match check_process(&process).into_iter().next() {
            Some(err) => Err(err),
            None => Ok(process),
        }
    }
}
