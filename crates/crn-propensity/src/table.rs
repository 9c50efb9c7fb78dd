//! Per-reaction rate closures, registered by reaction index.
//!
//! This is the seam the model generator plugs into: for every reaction it
//! emits one rate expression per capability it supports and registers it
//! with a [`RateTableBuilder`].  A capability is offered by the finished
//! [`RateTable`] only when *every* reaction has an expression for it.

use crn_core::{ReactionId, ReactionNetwork};

use crate::{
    Capability, ContinuousRate, DiscreteJumpRate, ExactStochasticRate, PropensityError,
    PropensityModel, PropensityResult,
};

pub type ContinuousFn = Box<dyn Fn(&[f64]) -> f64 + Send + Sync>;
pub type DiscreteJumpFn = Box<dyn Fn(&[i64]) -> f64 + Send + Sync>;
pub type ExactStochasticFn = Box<dyn Fn(&[u64]) -> f64 + Send + Sync>;

// ── RateTable ─────────────────────────────────────────────────────────────────

/// A [`PropensityModel`] backed by boxed closures indexed by `ReactionId`.
///
/// Create via [`RateTableBuilder`].
pub struct RateTable {
    reaction_count:   usize,
    continuous:       Option<Vec<ContinuousFn>>,
    discrete_jump:    Option<Vec<DiscreteJumpFn>>,
    exact_stochastic: Option<Vec<ExactStochasticFn>>,
}

impl ContinuousRate for RateTable {
    #[inline]
    fn continuous_rate(&self, reaction: ReactionId, state: &[f64]) -> f64 {
        match &self.continuous {
            Some(fns) => fns[reaction.index()](state),
            None      => f64::NAN,
        }
    }
}

impl DiscreteJumpRate for RateTable {
    #[inline]
    fn discrete_jump_rate(&self, reaction: ReactionId, state: &[i64]) -> f64 {
        match &self.discrete_jump {
            Some(fns) => fns[reaction.index()](state),
            None      => f64::NAN,
        }
    }
}

impl ExactStochasticRate for RateTable {
    #[inline]
    fn exact_stochastic_rate(&self, reaction: ReactionId, state: &[u64]) -> f64 {
        match &self.exact_stochastic {
            Some(fns) => fns[reaction.index()](state),
            None      => f64::NAN,
        }
    }
}

impl PropensityModel for RateTable {
    fn reaction_count(&self) -> usize {
        self.reaction_count
    }

    fn as_continuous(&self) -> Option<&dyn ContinuousRate> {
        self.continuous.as_ref().map(|_| self as &dyn ContinuousRate)
    }

    fn as_discrete_jump(&self) -> Option<&dyn DiscreteJumpRate> {
        self.discrete_jump.as_ref().map(|_| self as &dyn DiscreteJumpRate)
    }

    fn as_exact_stochastic(&self) -> Option<&dyn ExactStochasticRate> {
        self.exact_stochastic.as_ref().map(|_| self as &dyn ExactStochasticRate)
    }
}

// ── RateTableBuilder ──────────────────────────────────────────────────────────

/// Fluent builder for [`RateTable`].
///
/// Registration order does not matter; completeness is checked in
/// [`build`][Self::build].
///
/// ```rust,ignore
/// let table = RateTableBuilder::new(&network)
///     .continuous(ReactionId(0), |x| 0.1 * x[0])
///     .continuous(ReactionId(1), |x| 0.02 * x[0] * x[1])
///     .build()?;
/// ```
pub struct RateTableBuilder {
    reaction_count:   usize,
    continuous:       Vec<(ReactionId, ContinuousFn)>,
    discrete_jump:    Vec<(ReactionId, DiscreteJumpFn)>,
    exact_stochastic: Vec<(ReactionId, ExactStochasticFn)>,
}

impl RateTableBuilder {
    pub fn new(network: &ReactionNetwork) -> Self {
        Self::with_reaction_count(network.reaction_count())
    }

    pub fn with_reaction_count(reaction_count: usize) -> Self {
        Self {
            reaction_count,
            continuous:       Vec::new(),
            discrete_jump:    Vec::new(),
            exact_stochastic: Vec::new(),
        }
    }

    /// Register the ODE rate expression of `reaction`.
    pub fn continuous<F>(mut self, reaction: ReactionId, f: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        self.continuous.push((reaction, Box::new(f)));
        self
    }

    /// Register the tau-leaping rate expression of `reaction`.
    pub fn discrete_jump<F>(mut self, reaction: ReactionId, f: F) -> Self
    where
        F: Fn(&[i64]) -> f64 + Send + Sync + 'static,
    {
        self.discrete_jump.push((reaction, Box::new(f)));
        self
    }

    /// Register the exact stochastic propensity of `reaction`.
    pub fn exact_stochastic<F>(mut self, reaction: ReactionId, f: F) -> Self
    where
        F: Fn(&[u64]) -> f64 + Send + Sync + 'static,
    {
        self.exact_stochastic.push((reaction, Box::new(f)));
        self
    }

    /// Validate registrations and return the finished table.
    ///
    /// Per capability: no registrations means "not implemented"; otherwise
    /// every reaction must be registered exactly once.
    pub fn build(self) -> PropensityResult<RateTable> {
        let n = self.reaction_count;
        let table = RateTable {
            reaction_count:   n,
            continuous:       dense(self.continuous, n, Capability::Continuous)?,
            discrete_jump:    dense(self.discrete_jump, n, Capability::DiscreteJump)?,
            exact_stochastic: dense(self.exact_stochastic, n, Capability::ExactStochastic)?,
        };
        log::debug!(
            "rate table built for {n} reactions (continuous: {}, discrete-jump: {}, exact-stochastic: {})",
            table.continuous.is_some(),
            table.discrete_jump.is_some(),
            table.exact_stochastic.is_some(),
        );
        Ok(table)
    }
}

/// Reorder `(id, f)` registrations into a dense `Vec` indexed by reaction.
fn dense<F>(
    registered:     Vec<(ReactionId, F)>,
    reaction_count: usize,
    capability:     Capability,
) -> PropensityResult<Option<Vec<F>>> {
    if registered.is_empty() {
        return Ok(None);
    }

    let mut slots: Vec<Option<F>> = (0..reaction_count).map(|_| None).collect();
    for (reaction, f) in registered {
        let slot = slots
            .get_mut(reaction.index())
            .ok_or(PropensityError::UnknownReaction { reaction, reaction_count })?;
        if slot.replace(f).is_some() {
            return Err(PropensityError::DuplicateRegistration { capability, reaction });
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| {
            slot.ok_or(PropensityError::IncompleteRegistration {
                capability,
                reaction: ReactionId(i as u32),
            })
        })
        .collect::<PropensityResult<Vec<F>>>()
        .map(Some)
}
