//! Fixed-step fourth-order Runge–Kutta integration of the reaction ODEs.
//!
//! ```text
//! dx_s/dt = Σ_r  Δ_{r,s} · a_r(x)
//! ```
//!
//! where `Δ_{r,s}` is the net change of species `s` per firing of reaction
//! `r` and `a_r` the model's continuous rate.  Between two consecutive
//! output points the solver takes `ceil(span / increment)` equal substeps,
//! so the output grid is hit exactly and no substep exceeds `increment`.

use crn_core::{ReactionNetwork, SpeciesId};
use crn_propensity::{ContinuousRate, PropensityModel};

use crate::solver::{check_step_budget, effective_step};
use crate::{SimError, SimResult, Simulation, Solver};

/// Classical RK4 over the network's continuous rates.
///
/// The ODE path is deterministic, so one trajectory is produced regardless
/// of the configured trajectory count.
#[derive(Copy, Clone, Debug, Default)]
pub struct Rk4Solver;

impl Solver for Rk4Solver {
    fn solve<P: PropensityModel>(&self, sim: &mut Simulation<'_, P>, increment: f64) -> SimResult<()> {
        let step = effective_step(increment, sim.increment)?;
        check_step_budget(sim.timeline().end_time(), step)?;
        let rates = sim.propensity.require_continuous()?;
        let network = sim.network;

        if sim.config.trajectory_count > 1 {
            log::debug!(
                "ode run is deterministic; producing 1 trajectory instead of {}",
                sim.config.trajectory_count
            );
        }

        let mut x: Vec<f64> = network.initial_populations().iter().map(|&n| n as f64).collect();
        let mut block = Vec::with_capacity(sim.trajectories.block_len());
        block.extend_from_slice(&x);

        let mut scratch = Scratch::new(x.len());
        for (t0, t1) in sim.trajectories.timeline().intervals() {
            let span = t1 - t0;
            let substeps = (span / step).ceil().max(1.0) as usize;
            let h = span / substeps as f64;
            for _ in 0..substeps {
                rk4_step(network, rates, &mut x, h, &mut scratch);
            }
            if let Some(s) = x.iter().position(|v| !v.is_finite()) {
                return Err(SimError::NonFinite { species: SpeciesId(s as u32), time: t1 });
            }
            block.extend_from_slice(&x);
        }

        log::info!("ode integration complete (step {step})");
        sim.trajectories.push(block)
    }
}

/// Reused stage buffers; one allocation per solve rather than per step.
struct Scratch {
    k1:  Vec<f64>,
    k2:  Vec<f64>,
    k3:  Vec<f64>,
    k4:  Vec<f64>,
    tmp: Vec<f64>,
}

impl Scratch {
    fn new(n: usize) -> Self {
        Self {
            k1:  vec![0.0; n],
            k2:  vec![0.0; n],
            k3:  vec![0.0; n],
            k4:  vec![0.0; n],
            tmp: vec![0.0; n],
        }
    }
}

fn rk4_step(
    network: &ReactionNetwork,
    rates:   &dyn ContinuousRate,
    x:       &mut [f64],
    h:       f64,
    s:       &mut Scratch,
) {
    derivative(network, rates, x, &mut s.k1);

    axpy(&mut s.tmp, x, 0.5 * h, &s.k1);
    derivative(network, rates, &s.tmp, &mut s.k2);

    axpy(&mut s.tmp, x, 0.5 * h, &s.k2);
    derivative(network, rates, &s.tmp, &mut s.k3);

    axpy(&mut s.tmp, x, h, &s.k3);
    derivative(network, rates, &s.tmp, &mut s.k4);

    for i in 0..x.len() {
        x[i] += h / 6.0 * (s.k1[i] + 2.0 * s.k2[i] + 2.0 * s.k3[i] + s.k4[i]);
    }
}

/// `out = x + a * k`
#[inline]
fn axpy(out: &mut [f64], x: &[f64], a: f64, k: &[f64]) {
    for ((o, &xi), &ki) in out.iter_mut().zip(x).zip(k) {
        *o = xi + a * ki;
    }
}

/// `out = Σ_r Δ_r · a_r(x)`
fn derivative(network: &ReactionNetwork, rates: &dyn ContinuousRate, x: &[f64], out: &mut [f64]) {
    out.fill(0.0);
    for r in network.reaction_ids() {
        let a = rates.continuous_rate(r, x);
        for &(s, delta) in network.net_changes(r) {
            out[s.index()] += delta as f64 * a;
        }
    }
}
