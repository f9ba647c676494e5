//! Request envelope: a process set plus the size of the processor pool.

use serde::{Deserialize, Serialize};

use super::Process;

/// Processes to distribute and the number of identical processors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemState {
    /// Processes to distribute.
    pub processes: Vec<Process>,
    /// Size of the processor pool.
    pub num_processors: usize,
}

impl SystemState {
    /// Creates a new system state.
    pub fn new(processes: Vec<Process>, num_processors: usize) -> Self {
        Self {
            processes,
            num_processors,
        }
    }
}
