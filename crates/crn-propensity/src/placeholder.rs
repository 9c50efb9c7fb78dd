//! Explicit opt-in constant rates for capabilities a model does not implement.
//!
//! Linking an ODE-only model into stochastic tooling used to "work" by
//! answering every discrete rate query with `1.0`.  That behavior is kept
//! here, but a caller must ask for it by wrapping the model in
//! [`PlaceholderRates`].  Results produced through a placeholder capability
//! are meaningless; the wrapper only keeps such tooling from failing.

use crn_core::ReactionId;

use crate::{Capability, ContinuousRate, DiscreteJumpRate, ExactStochasticRate, PropensityModel};

/// The rate every placeholder capability returns.
pub const PLACEHOLDER_RATE: f64 = 1.0;

/// Answers every discrete-jump and exact-stochastic query with
/// [`PLACEHOLDER_RATE`], for any reaction and any state.
#[derive(Copy, Clone, Debug, Default)]
pub struct Unimplemented;

impl DiscreteJumpRate for Unimplemented {
    #[inline]
    fn discrete_jump_rate(&self, _reaction: ReactionId, _state: &[i64]) -> f64 {
        PLACEHOLDER_RATE
    }
}

impl ExactStochasticRate for Unimplemented {
    #[inline]
    fn exact_stochastic_rate(&self, _reaction: ReactionId, _state: &[u64]) -> f64 {
        PLACEHOLDER_RATE
    }
}

static UNIMPLEMENTED: Unimplemented = Unimplemented;

/// Wraps a model and fills its missing discrete capabilities with
/// [`Unimplemented`].  Capabilities the inner model does implement are
/// passed through untouched.
pub struct PlaceholderRates<M> {
    inner: M,
}

impl<M: PropensityModel> PlaceholderRates<M> {
    pub fn new(inner: M) -> Self {
        if !inner.supports(Capability::DiscreteJump)
            || !inner.supports(Capability::ExactStochastic)
        {
            log::warn!("using placeholder rates ({PLACEHOLDER_RATE}) for unimplemented discrete capabilities");
        }
        Self { inner }
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M: PropensityModel> PropensityModel for PlaceholderRates<M> {
    fn reaction_count(&self) -> usize {
        self.inner.reaction_count()
    }

    fn as_continuous(&self) -> Option<&dyn ContinuousRate> {
        self.inner.as_continuous()
    }

    fn as_discrete_jump(&self) -> Option<&dyn DiscreteJumpRate> {
        self.inner
            .as_discrete_jump()
            .or(Some(&UNIMPLEMENTED as &dyn DiscreteJumpRate))
    }

    fn as_exact_stochastic(&self) -> Option<&dyn ExactStochasticRate> {
        self.inner
            .as_exact_stochastic()
            .or(Some(&UNIMPLEMENTED as &dyn ExactStochasticRate))
    }
}
