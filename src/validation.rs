//! Input validation for distribution requests.
//!
//! Checks a process set and processor count before any assignment is
//! made, so a run either fails up front or produces a complete result.
//! Detects:
//! - Empty processor pools
//! - Non-finite arrival or burst times (NaN, ±∞)
//! - Negative arrival or burst times
//!
//! Duplicate process IDs are reported by [`duplicate_ids`] but not
//! rejected.

use std::collections::HashSet;
use thiserror::Error;

use crate::models::Process;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The processor pool has no processors.
    InvalidProcessorCount,
    /// A time field is NaN or infinite.
    NonFiniteValue,
    /// A time field is below zero.
    NegativeValue,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input of a distribution run.
///
/// Checks:
/// 1. At least one processor
/// 2. Every `arrival_time` and `burst_time` is finite
/// 3. Every `arrival_time` and `burst_time` is non-negative
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(processes: &[Process], num_processors: usize) -> ValidationResult {
    let mut errors = Vec::new();

    if num_processors == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidProcessorCount,
            "num_processors must be at least 1",
        ));
    }

    for process in processes {
        errors.extend(check_process(process));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Field-level checks for a single process.
pub(crate) fn check_process(process: &Process) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (field, value) in [
        ("arrival_time", process.arrival_time),
        ("burst_time", process.burst_time),
    ] {
        if !value.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFiniteValue,
                format!("Process {}: {field} must be finite, got {value}", process.id),
            ));
        } else if value < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeValue,
                format!(
                    "Process {}: {field} must be non-negative, got {value}",
                    process.id
                ),
            ));
        }
    }
    errors
}

/// Returns process IDs that occur more than once, in first-repeat order.
///
/// Repeated IDs collapse into one entry of the waiting/turnaround maps.
pub fn duplicate_ids(processes: &[Process]) -> Vec<i64> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    processes
        .iter()
        .filter(|p| !seen.insert(p.id) && reported.insert(p.id))
        .map(|p| p.id)
        .collect()
}
