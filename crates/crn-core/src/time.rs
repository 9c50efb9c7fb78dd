//! Simulation time model.
//!
//! # Design
//!
//! Solvers integrate in continuous time but report state only at the points
//! of a [`Timeline`]: a strictly increasing grid starting at `0.0` and ending
//! exactly at `end_time`.  Points are computed as `i * end_time / steps`
//! rather than by repeated addition, so the last point carries no
//! accumulated floating-point drift.

use std::fmt;

use crate::{CrnError, CrnResult};

/// Upper bound on output steps per run.
pub const MAX_OUTPUT_STEPS: usize = 1_000_000;

/// Output sampling grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timeline {
    points: Vec<f64>,
}

impl Timeline {
    /// `steps + 1` evenly spaced points over `[0, end_time]`.
    ///
    /// `steps == 0` yields the single point `0.0`.  Allocates `steps + 1`
    /// points; use [`try_uniform`][Self::try_uniform] for untrusted counts.
    pub fn uniform(end_time: f64, steps: usize) -> Self {
        if steps == 0 {
            return Self { points: vec![0.0] };
        }
        let points = (0..=steps)
            .map(|i| end_time * i as f64 / steps as f64)
            .collect();
        Self { points }
    }

    /// Like [`uniform`][Self::uniform], but takes a possibly non-integral,
    /// non-finite step count and rejects anything above [`MAX_OUTPUT_STEPS`].
    pub fn try_uniform(end_time: f64, steps: f64) -> CrnResult<Self> {
        if !(steps.is_finite() && steps >= 0.0 && steps <= MAX_OUTPUT_STEPS as f64) {
            return Err(CrnError::Config(format!(
                "{steps} output steps over [0, {end_time}] exceeds the limit of {MAX_OUTPUT_STEPS}"
            )));
        }
        Ok(Self::uniform(end_time, steps as usize))
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Number of sample points (including `t = 0`).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn end_time(&self) -> f64 {
        self.points.last().copied().unwrap_or(0.0)
    }

    /// Consecutive `(t_prev, t_next)` pairs.
    pub fn intervals(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} points over [0, {}]", self.len(), self.end_time())
    }
}
