//! Locally generated progress animation for the Polling state
//!
//! The backend performs the optimization as a single blocking call and
//! reports no incremental progress, so the Polling state animates a local
//! estimate instead. The estimator sits behind a trait so a real
//! server-sent progress channel can replace it without touching the state
//! machine.

use horario_domain::constants::POLLING_PROGRESS_CAP_PCT;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// One frame of the polling animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollingFrame {
    /// Monotonically non-decreasing, capped below 100.
    pub progress: f64,
    /// Proportional generation readout.
    pub generation: u32,
    /// Proportional fitness readout in [0, 1).
    pub best_fitness: f64,
}

/// Source of polling frames. Implementations must be monotonic.
pub trait ProgressEstimator: Send {
    fn tick(&mut self) -> PollingFrame;
}

/// The placeholder animation: advances by a random step each tick and
/// saturates at the cap, never reaching 100.
pub struct SimulatedProgress {
    progress: f64,
    rng: StdRng,
}

impl SimulatedProgress {
    pub fn new() -> Self {
        Self { progress: 0.0, rng: StdRng::from_entropy() }
    }

    /// Deterministic variant for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self { progress: 0.0, rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for SimulatedProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressEstimator for SimulatedProgress {
    fn tick(&mut self) -> PollingFrame {
        let step: f64 = self.rng.gen::<f64>() * 10.0;
        self.progress = (self.progress + step).min(POLLING_PROGRESS_CAP_PCT);

        PollingFrame {
            progress: self.progress,
            generation: (self.progress * 5.0) as u32,
            best_fitness: self.progress / 100.0,
        }
    }
}
