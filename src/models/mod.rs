//! Workload distribution domain models.
//!
//! | Type | Role |
//! |------|------|
//! | `Process` | Unit of work: arrival, burst, priority |
//! | `SystemState` | Request: processes + processor count |
//! | `AllocationResult` | Output: queues, per-process times, utilization |

mod allocation;
mod process;
mod system_state;

pub use allocation::AllocationResult;
pub use process::Process;
pub use system_state::SystemState;
