//! The three rate capabilities and the `PropensityModel` trait that declares
//! which of them a model implements.

use std::fmt;

use crn_core::ReactionId;

use crate::{PropensityError, PropensityResult};

/// Instantaneous deterministic rate, used by ODE integration.
///
/// Must be pure and defined (finite) for any state vector of
/// `species_count` non-negative concentrations.
pub trait ContinuousRate: Send + Sync {
    fn continuous_rate(&self, reaction: ReactionId, state: &[f64]) -> f64;
}

/// Rate over integer populations, used by tau-leaping style solvers.
pub trait DiscreteJumpRate: Send + Sync {
    fn discrete_jump_rate(&self, reaction: ReactionId, state: &[i64]) -> f64;
}

/// Stochastic propensity over non-negative populations, used by exact
/// stochastic simulation (Gillespie).
pub trait ExactStochasticRate: Send + Sync {
    fn exact_stochastic_rate(&self, reaction: ReactionId, state: &[u64]) -> f64;
}

/// Which rate family a solver needs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    Continuous,
    DiscreteJump,
    ExactStochastic,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Capability::Continuous      => "continuous",
            Capability::DiscreteJump    => "discrete-jump",
            Capability::ExactStochastic => "exact-stochastic",
        };
        f.write_str(s)
    }
}

/// A reaction-rate model over a network's dense reaction index.
///
/// Each `as_*` accessor returns `Some` only if the model genuinely
/// implements that rate family.  All default to `None`, so a model built
/// for ODE use overrides `as_continuous` and nothing else.
///
/// # Example
///
/// ```rust,ignore
/// struct Decay { k: f64 }
///
/// impl ContinuousRate for Decay {
///     fn continuous_rate(&self, _r: ReactionId, x: &[f64]) -> f64 { self.k * x[0] }
/// }
///
/// impl PropensityModel for Decay {
///     fn reaction_count(&self) -> usize { 1 }
///     fn as_continuous(&self) -> Option<&dyn ContinuousRate> { Some(self) }
/// }
/// ```
pub trait PropensityModel: Send + Sync {
    /// Number of reactions this model has rates for.  Must equal the
    /// network's `reaction_count`.
    fn reaction_count(&self) -> usize;

    fn as_continuous(&self) -> Option<&dyn ContinuousRate> {
        None
    }

    fn as_discrete_jump(&self) -> Option<&dyn DiscreteJumpRate> {
        None
    }

    fn as_exact_stochastic(&self) -> Option<&dyn ExactStochasticRate> {
        None
    }

    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Continuous      => self.as_continuous().is_some(),
            Capability::DiscreteJump    => self.as_discrete_jump().is_some(),
            Capability::ExactStochastic => self.as_exact_stochastic().is_some(),
        }
    }

    fn require_continuous(&self) -> PropensityResult<&dyn ContinuousRate> {
        self.as_continuous()
            .ok_or(PropensityError::MissingCapability(Capability::Continuous))
    }

    fn require_discrete_jump(&self) -> PropensityResult<&dyn DiscreteJumpRate> {
        self.as_discrete_jump()
            .ok_or(PropensityError::MissingCapability(Capability::DiscreteJump))
    }

    fn require_exact_stochastic(&self) -> PropensityResult<&dyn ExactStochasticRate> {
        self.as_exact_stochastic()
            .ok_or(PropensityError::MissingCapability(Capability::ExactStochastic))
    }
}

impl<M: PropensityModel + ?Sized> PropensityModel for Box<M> {
    fn reaction_count(&self) -> usize {
        (**self).reaction_count()
    }

    fn as_continuous(&self) -> Option<&dyn ContinuousRate> {
        (**self).as_continuous()
    }

    fn as_discrete_jump(&self) -> Option<&dyn DiscreteJumpRate> {
        (**self).as_discrete_jump()
    }

    fn as_exact_stochastic(&self) -> Option<&dyn ExactStochasticRate> {
        (**self).as_exact_stochastic()
    }
}
