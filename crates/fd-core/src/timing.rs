//! Lightweight wall-clock timing.
//!
//! `Timer` measures how long a solver pass took; `Deadline` turns an
//! optional wall-clock budget into a cheap "are we out of time" check.

use std::time::{Duration, Instant};

/// A simple timer that measures elapsed time.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Create and start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time in seconds since `start`.
    pub fn elapsed_s(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Stop the timer and return elapsed time in seconds.
    pub fn stop(self) -> f64 {
        self.elapsed_s()
    }
}

/// Optional wall-clock limit measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    budget: Option<Duration>,
}

impl Deadline {
    /// A deadline `budget` from now; `None` never expires.
    pub fn after(budget: Option<Duration>) -> Self {
        Self {
            start: Instant::now(),
            budget,
        }
    }

    pub fn unlimited() -> Self {
        Self::after(None)
    }

    pub fn budget(&self) -> Option<Duration> {
        self.budget
    }

    pub fn expired(&self) -> bool {
        self.budget
            .is_some_and(|budget| self.start.elapsed() >= budget)
    }
}
