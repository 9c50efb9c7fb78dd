//! The output trajectory buffer owned by a [`Simulation`][crate::Simulation].

use crn_core::Timeline;

use crate::{SimError, SimResult};

/// Species values sampled on a [`Timeline`], one flat block per trajectory.
///
/// A block is row-major: the values of all species at `timeline[0]`, then
/// at `timeline[1]`, and so on.  The buffer starts empty; solvers append
/// finished trajectories with [`push`][Self::push].
#[derive(Clone, Debug)]
pub struct TrajectoryBuffer {
    timeline:      Timeline,
    species_count: usize,
    trajectories:  Vec<Vec<f64>>,
}

impl TrajectoryBuffer {
    pub fn new(timeline: Timeline, species_count: usize) -> Self {
        Self { timeline, species_count, trajectories: Vec::new() }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn species_count(&self) -> usize {
        self.species_count
    }

    /// Values per trajectory: `timeline.len() * species_count`.
    pub fn block_len(&self) -> usize {
        self.timeline.len() * self.species_count
    }

    pub fn trajectory_count(&self) -> usize {
        self.trajectories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    /// Append one finished trajectory.
    pub fn push(&mut self, values: Vec<f64>) -> SimResult<()> {
        if values.len() != self.block_len() {
            return Err(SimError::CountMismatch {
                expected: self.block_len(),
                got:      values.len(),
                what:     "trajectory block",
            });
        }
        self.trajectories.push(values);
        Ok(())
    }

    pub fn trajectory(&self, index: usize) -> Option<&[f64]> {
        self.trajectories.get(index).map(Vec::as_slice)
    }

    /// Species values of trajectory `index` at output point `step`.
    pub fn row(&self, index: usize, step: usize) -> Option<&[f64]> {
        let block = self.trajectory(index)?;
        let start = step.checked_mul(self.species_count)?;
        block.get(start..start + self.species_count)
    }

    /// Iterate `(time, values)` rows of trajectory `index`.
    ///
    /// Yields nothing for an unknown index or a network without species.
    pub fn rows(&self, index: usize) -> impl Iterator<Item = (f64, &[f64])> + '_ {
        let block = self.trajectory(index).unwrap_or(&[]);
        self.timeline
            .points()
            .iter()
            .copied()
            .zip(block.chunks(self.species_count.max(1)))
    }
}
