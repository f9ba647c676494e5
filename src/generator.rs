//! Synthetic process generation.
//!
//! Produces random [`Process`] sets for exercising the distributor. The
//! random source is injected, so a seeded generator yields the same
//! process set on every run. The distributor never depends on this module.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::ops::{Range, RangeInclusive};

use crate::models::{Process, SystemState};

/// Sampling ranges for generated processes.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Arrival time range (half-open).
    pub arrival_time: Range<f64>,
    /// Burst time range (half-open).
    pub burst_time: Range<f64>,
    /// Priority range (inclusive).
    pub priority: RangeInclusive<i32>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            arrival_time: 0.0..10.0,
            burst_time: 1.0..5.0,
            priority: 1..=10,
        }
    }
}

/// Random process generator over an injected RNG.
///
/// # Example
///
/// ```
/// use workload_distributor::generator::TestDataGenerator;
///
/// let a = TestDataGenerator::from_seed(42).generate(5);
/// let b = TestDataGenerator::from_seed(42).generate(5);
/// assert_eq!(a, b);
/// assert_eq!(a[4].id, 4);
/// ```
#[derive(Debug, Clone)]
pub struct TestDataGenerator<R> {
    rng: R,
    config: GeneratorConfig,
}

impl TestDataGenerator<SmallRng> {
    /// Creates a generator seeded for reproducible output.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    /// Creates a generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_os_rng())
    }
}

impl<R: Rng> TestDataGenerator<R> {
    /// Creates a generator with default sampling ranges.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            config: GeneratorConfig::default(),
        }
    }

    /// Sets the sampling ranges.
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Generates `count` processes with IDs `0..count`.
    pub fn generate(&mut self, count: usize) -> Vec<Process> {
        (0..count)
            .map(|i| {
                let arrival = sample_f64(&mut self.rng, &self.config.arrival_time);
                let burst = sample_f64(&mut self.rng, &self.config.burst_time);
                let priority = if self.config.priority.is_empty() {
                    *self.config.priority.start()
                } else {
                    self.rng.random_range(self.config.priority.clone())
                };
                Process::new(i as i64, arrival, burst, priority)
            })
            .collect()
    }

    /// Generates a complete request for `num_processors` processors.
    pub fn generate_state(&mut self, count: usize, num_processors: usize) -> SystemState {
        SystemState::new(self.generate(count), num_processors)
    }
}

/// Samples a half-open range; a degenerate range yields its start.
fn sample_f64<R: Rng>(rng: &mut R, range: &Range<f64>) -> f64 {
    if range.start < range.end {
        rng.random_range(range.clone())
    } else {
        range.start
    }
}
