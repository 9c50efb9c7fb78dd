//! The `Simulation` context consumed by solvers.

use std::fmt;

use crn_core::{ReactionNetwork, RunConfig, Timeline};
use crn_propensity::{Capability, PropensityModel};

use crate::TrajectoryBuffer;

/// Which dynamics a simulation runs under.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum SimMode {
    /// Deterministic ODE integration over concentrations.
    #[default]
    Ode,
    /// Exact stochastic simulation over integer populations.
    Stochastic,
}

impl SimMode {
    /// The rate capability a solver for this mode needs.
    pub fn capability(self) -> Capability {
        match self {
            SimMode::Ode        => Capability::Continuous,
            SimMode::Stochastic => Capability::ExactStochastic,
        }
    }
}

impl fmt::Display for SimMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimMode::Ode        => f.write_str("ode"),
            SimMode::Stochastic => f.write_str("stochastic"),
        }
    }
}

/// Everything a solver needs for one run.
///
/// Borrows the network, exclusively owns the propensity model for its
/// lifetime, and owns the output buffer the solver fills.  Create via
/// [`SimulationBuilder`][crate::SimulationBuilder].
pub struct Simulation<'n, P: PropensityModel> {
    /// Species and reaction bookkeeping.  Read-only.
    pub network: &'n ReactionNetwork,

    /// Rate model.  Its capability for `mode` was checked at build time.
    pub propensity: P,

    /// Frozen run configuration (seed already resolved).
    pub config: RunConfig,

    pub mode: SimMode,

    /// Resolved integration step (`config.increment`, or derived from the
    /// timestep count).
    pub increment: f64,

    /// Output buffer.  Empty until a solver runs.
    pub trajectories: TrajectoryBuffer,
}

impl<'n, P: PropensityModel> Simulation<'n, P> {
    pub fn is_ode(&self) -> bool {
        self.mode == SimMode::Ode
    }

    pub fn timeline(&self) -> &Timeline {
        self.trajectories.timeline()
    }

    pub fn seed(&self) -> u64 {
        self.config.seed_u64()
    }

    /// Trajectories to simulate; a configured count of 0 still runs one.
    pub fn trajectory_count(&self) -> u32 {
        self.config.trajectory_count.max(1)
    }

    /// Release the propensity model and hand back the filled buffer.
    pub fn finish(self) -> TrajectoryBuffer {
        let (_, trajectories) = self.into_parts();
        trajectories
    }

    /// Split into the propensity model and the buffer.
    pub fn into_parts(self) -> (P, TrajectoryBuffer) {
        log::debug!(
            "simulation finished: {} trajectories, propensity model released",
            self.trajectories.trajectory_count()
        );
        (self.propensity, self.trajectories)
    }
}
