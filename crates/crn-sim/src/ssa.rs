//! Gillespie direct-method exact stochastic simulation.
//!
//! Per trajectory:
//!
//! ```text
//! loop:
//!   a_r  = exact propensity of every reaction at the current state
//!   a_0  = Σ a_r;  if a_0 ≤ 0 → hold the state for the rest of the timeline
//!   τ    = -ln(u₁) / a_0
//!   record the (pre-firing) state at every output time ≤ t + τ
//!   fire the reaction r with  Σ_{j<r} a_j < u₂·a_0 ≤ Σ_{j≤r} a_j
//! ```
//!
//! Each trajectory draws from its own [`TrajectoryRng`], seeded from the run
//! seed and the trajectory index, so a fixed seed reproduces every
//! trajectory exactly, serial or parallel.

use crn_core::{ReactionId, ReactionNetwork, Timeline, TrajectoryRng};
use crn_propensity::{ExactStochasticRate, PropensityModel};

use crate::{SimError, SimResult, Simulation, Solver};

/// Exact stochastic simulation over integer populations.
///
/// The `increment` argument is unused: the direct method takes
/// event-driven steps and samples on the simulation's timeline.
#[derive(Copy, Clone, Debug, Default)]
pub struct DirectMethodSolver;

impl Solver for DirectMethodSolver {
    fn solve<P: PropensityModel>(&self, sim: &mut Simulation<'_, P>, _increment: f64) -> SimResult<()> {
        let rates = sim.propensity.require_exact_stochastic()?;
        let network = sim.network;
        let seed = sim.seed();
        let count = sim.trajectory_count();
        let timeline = sim.trajectories.timeline();

        log::info!("running {count} stochastic trajectories (seed {seed})");

        #[cfg(not(feature = "parallel"))]
        let blocks: Vec<SimResult<Vec<f64>>> = (0..count)
            .map(|i| run_trajectory(network, rates, timeline, TrajectoryRng::new(seed, i)))
            .collect();

        #[cfg(feature = "parallel")]
        let blocks: Vec<SimResult<Vec<f64>>> = {
            use rayon::prelude::*;
            (0..count)
                .into_par_iter()
                .map(|i| run_trajectory(network, rates, timeline, TrajectoryRng::new(seed, i)))
                .collect()
        };

        for block in blocks {
            sim.trajectories.push(block?)?;
        }
        Ok(())
    }
}

fn run_trajectory(
    network:  &ReactionNetwork,
    rates:    &dyn ExactStochasticRate,
    timeline: &Timeline,
    mut rng:  TrajectoryRng,
) -> SimResult<Vec<f64>> {
    let points = timeline.points();
    let mut state: Vec<u64> = network.initial_populations().to_vec();
    let mut block = Vec::with_capacity(points.len() * state.len());
    let mut propensities = vec![0.0; network.reaction_count()];

    record(&mut block, &state);
    let mut next = 1;
    let mut t = 0.0;

    while next < points.len() {
        let mut total = 0.0;
        for (r, slot) in network.reaction_ids().zip(propensities.iter_mut()) {
            let a = rates.exact_stochastic_rate(r, &state);
            if !(a.is_finite() && a >= 0.0) {
                return Err(SimError::InvalidPropensity { reaction: r, value: a, time: t });
            }
            *slot = a;
            total += a;
        }

        // Nothing can fire: the state is final.
        if total <= 0.0 {
            while next < points.len() {
                record(&mut block, &state);
                next += 1;
            }
            break;
        }

        t += -rng.open01().ln() / total;
        while next < points.len() && points[next] <= t {
            record(&mut block, &state);
            next += 1;
        }
        if next == points.len() {
            break;
        }

        let reaction = select_reaction(&propensities, rng.open01() * total);
        fire(network, &mut state, reaction, t)?;
    }

    Ok(block)
}

/// First reaction whose cumulative propensity reaches `target`.  Falls back
/// to the last reaction with positive propensity when rounding leaves
/// `target` a hair above the total.
pub(crate) fn select_reaction(propensities: &[f64], mut target: f64) -> ReactionId {
    let index = propensities
        .iter()
        .position(|&a| {
            target -= a;
            target <= 0.0
        })
        .or_else(|| propensities.iter().rposition(|&a| a > 0.0))
        .unwrap_or(0);
    ReactionId(index as u32)
}

fn fire(network: &ReactionNetwork, state: &mut [u64], reaction: ReactionId, time: f64) -> SimResult<()> {
    for &(species, delta) in network.net_changes(reaction) {
        let slot = &mut state[species.index()];
        let updated = *slot as i64 + delta;
        if updated < 0 {
            return Err(SimError::NegativePopulation { reaction, species, time });
        }
        *slot = updated as u64;
    }
    Ok(())
}

#[inline]
fn record(block: &mut Vec<f64>, state: &[u64]) {
    block.extend(state.iter().map(|&n| n as f64));
}
