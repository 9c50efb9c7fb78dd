//! Mass-action kinetics derived from the network's stoichiometry.
//!
//! For a reaction with rate constant `k` and reactant coefficients `ν_s`:
//!
//! ```text
//! continuous       a(x) = k · Π x_s^ν_s
//! stochastic       a(n) = k · Π [n_s (n_s - 1) … (n_s - ν_s + 1)] / V^(order - 1)
//! ```
//!
//! The stochastic form counts ordered reactant combinations, so a
//! dimerisation `2A → B` with `n_A = 1` has zero propensity and never drives
//! a population negative.  `V` is the system volume (default `1.0`).

use crn_core::{ReactionId, ReactionNetwork};

use crate::{
    ContinuousRate, DiscreteJumpRate, ExactStochasticRate, PropensityError, PropensityModel,
    PropensityResult,
};

/// A complete [`PropensityModel`]: implements all three capabilities.
#[derive(Clone, Debug)]
pub struct MassAction {
    rate_constants: Vec<f64>,
    /// Reactant `(species index, coefficient)` pairs per reaction.
    reactants:      Vec<Vec<(usize, u32)>>,
    /// `V^(order - 1)` per reaction, precomputed.
    volume_scale:   Vec<f64>,
}

impl MassAction {
    /// Mass-action rates with unit volume.
    pub fn new(network: &ReactionNetwork, rate_constants: Vec<f64>) -> PropensityResult<Self> {
        Self::with_volume(network, rate_constants, 1.0)
    }

    pub fn with_volume(
        network:        &ReactionNetwork,
        rate_constants: Vec<f64>,
        volume:         f64,
    ) -> PropensityResult<Self> {
        if rate_constants.len() != network.reaction_count() {
            return Err(PropensityError::RateCountMismatch {
                expected: network.reaction_count(),
                got:      rate_constants.len(),
            });
        }
        if let Some((i, &k)) = rate_constants
            .iter()
            .enumerate()
            .find(|&(_, k)| !(k.is_finite() && *k >= 0.0))
        {
            return Err(PropensityError::InvalidRateConstant {
                reaction: ReactionId(i as u32),
                value:    k,
            });
        }
        if !(volume.is_finite() && volume > 0.0) {
            return Err(PropensityError::InvalidVolume(volume));
        }

        let mut reactants = Vec::with_capacity(network.reaction_count());
        let mut volume_scale = Vec::with_capacity(network.reaction_count());
        for id in network.reaction_ids() {
            let (pairs, order) = match network.stoichiometry(id) {
                Some(st) => (
                    st.reactants.iter().map(|&(s, n)| (s.index(), n)).collect(),
                    st.order(),
                ),
                None => (Vec::new(), 0),
            };
            reactants.push(pairs);
            volume_scale.push(volume.powi(order as i32 - 1));
        }

        Ok(Self { rate_constants, reactants, volume_scale })
    }

    pub fn rate_constant(&self, reaction: ReactionId) -> f64 {
        self.rate_constants[reaction.index()]
    }

    /// Shared stochastic kernel; `count(s)` yields the population of species `s`.
    #[inline]
    fn combinatorial(&self, reaction: ReactionId, count: impl Fn(usize) -> f64) -> f64 {
        let r = reaction.index();
        let mut h = 1.0;
        for &(s, nu) in &self.reactants[r] {
            let n = count(s);
            for j in 0..nu {
                let available = n - j as f64;
                if available <= 0.0 {
                    return 0.0;
                }
                h *= available;
            }
        }
        self.rate_constants[r] * h / self.volume_scale[r]
    }
}

impl ContinuousRate for MassAction {
    #[inline]
    fn continuous_rate(&self, reaction: ReactionId, state: &[f64]) -> f64 {
        let r = reaction.index();
        self.reactants[r]
            .iter()
            .fold(self.rate_constants[r], |acc, &(s, nu)| acc * state[s].powi(nu as i32))
    }
}

impl DiscreteJumpRate for MassAction {
    #[inline]
    fn discrete_jump_rate(&self, reaction: ReactionId, state: &[i64]) -> f64 {
        self.combinatorial(reaction, |s| state[s] as f64)
    }
}

impl ExactStochasticRate for MassAction {
    #[inline]
    fn exact_stochastic_rate(&self, reaction: ReactionId, state: &[u64]) -> f64 {
        self.combinatorial(reaction, |s| state[s] as f64)
    }
}

impl PropensityModel for MassAction {
    fn reaction_count(&self) -> usize {
        self.rate_constants.len()
    }

    fn as_continuous(&self) -> Option<&dyn ContinuousRate> {
        Some(self)
    }

    fn as_discrete_jump(&self) -> Option<&dyn DiscreteJumpRate> {
        Some(self)
    }

    fn as_exact_stochastic(&self) -> Option<&dyn ExactStochasticRate> {
        Some(self)
    }
}
