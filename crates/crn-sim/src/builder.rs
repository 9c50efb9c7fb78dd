//! Fluent builder for constructing a [`Simulation`].

use crn_core::{ReactionNetwork, RunConfig};
use crn_propensity::{Capability, PropensityModel};

use crate::{SimError, SimMode, SimResult, Simulation, TrajectoryBuffer};

/// Fluent builder for [`Simulation<P>`].
///
/// # Required inputs
///
/// - [`ReactionNetwork`]: borrowed for the simulation's lifetime
/// - `P: PropensityModel`: moved in; released by [`Simulation::finish`]
/// - [`RunConfig`]: with the seed already resolved
///
/// # Optional inputs (have defaults)
///
/// | Method      | Default        |
/// |-------------|----------------|
/// | `.mode(m)`  | `SimMode::Ode` |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimulationBuilder::new(&network, rates, config)
///     .mode(SimMode::Stochastic)
///     .build()?;
/// ```
pub struct SimulationBuilder<'n, P: PropensityModel> {
    network:    &'n ReactionNetwork,
    propensity: P,
    config:     RunConfig,
    mode:       SimMode,
}

impl<'n, P: PropensityModel> SimulationBuilder<'n, P> {
    pub fn new(network: &'n ReactionNetwork, propensity: P, config: RunConfig) -> Self {
        Self {
            network,
            propensity,
            config,
            mode: SimMode::default(),
        }
    }

    pub fn mode(mut self, mode: SimMode) -> Self {
        self.mode = mode;
        self
    }

    /// Validate inputs, derive the output timeline, and return a
    /// ready-to-solve [`Simulation`].
    pub fn build(self) -> SimResult<Simulation<'n, P>> {
        // ── Propensity model must match the network and the mode ──────────
        if self.propensity.reaction_count() != self.network.reaction_count() {
            return Err(SimError::CountMismatch {
                expected: self.network.reaction_count(),
                got:      self.propensity.reaction_count(),
                what:     "propensity model reactions",
            });
        }
        match self.mode.capability() {
            Capability::Continuous => {
                self.propensity.require_continuous()?;
            }
            Capability::DiscreteJump => {
                self.propensity.require_discrete_jump()?;
            }
            Capability::ExactStochastic => {
                self.propensity.require_exact_stochastic()?;
            }
        }

        // ── Resolve time grid ─────────────────────────────────────────────
        self.config.validate()?;
        let timeline = self.config.timeline()?;
        let increment = self.config.resolved_increment()?;

        log::info!(
            "simulation assembled: mode {}, {} species, {} reactions, timeline {}, increment {}, seed {}",
            self.mode,
            self.network.species_count(),
            self.network.reaction_count(),
            timeline,
            increment,
            self.config.random_seed,
        );

        Ok(Simulation {
            trajectories: TrajectoryBuffer::new(timeline, self.network.species_count()),
            network:      self.network,
            propensity:   self.propensity,
            config:       self.config,
            mode:         self.mode,
            increment,
        })
    }
}
