//! Unit tests for crn-propensity.

use crn_core::{ReactionId, ReactionNetwork, ReactionNetworkBuilder, Stoichiometry};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// `2A → B` (dimerise), `B → ∅` (degrade), `∅ → A` (produce).
fn dimer_network() -> ReactionNetwork {
    let mut b = ReactionNetworkBuilder::new();
    let a = b.add_species("A", 10);
    let d = b.add_species("B", 0);
    b.add_reaction("dimerise", Stoichiometry::new().reactant(a, 2).product(d, 1));
    b.add_reaction("degrade", Stoichiometry::new().reactant(d, 1));
    b.add_reaction("produce", Stoichiometry::new().product(a, 1));
    b.build().unwrap()
}

/// A model that only implements the continuous capability.
struct OdeOnly;

impl crate::ContinuousRate for OdeOnly {
    fn continuous_rate(&self, _reaction: ReactionId, state: &[f64]) -> f64 {
        0.5 * state[0]
    }
}

impl crate::PropensityModel for OdeOnly {
    fn reaction_count(&self) -> usize {
        2
    }

    fn as_continuous(&self) -> Option<&dyn crate::ContinuousRate> {
        Some(self)
    }
}

#[cfg(test)]
mod capability_tests {
    use super::*;
    use crate::{Capability, PropensityError, PropensityModel};

    #[test]
    fn unimplemented_capabilities_are_absent() {
        assert!(OdeOnly.supports(Capability::Continuous));
        assert!(!OdeOnly.supports(Capability::DiscreteJump));
        assert!(!OdeOnly.supports(Capability::ExactStochastic));
    }

    #[test]
    fn require_reports_missing_capability() {
        let err = OdeOnly.require_exact_stochastic().err().unwrap();
        assert!(matches!(err, PropensityError::MissingCapability(Capability::ExactStochastic)));
        assert!(OdeOnly.require_continuous().is_ok());
    }

    #[test]
    fn boxed_model_forwards() {
        let boxed: Box<dyn PropensityModel> = Box::new(OdeOnly);
        assert_eq!(boxed.reaction_count(), 2);
        let rate = boxed.require_continuous().unwrap().continuous_rate(ReactionId(0), &[4.0]);
        assert_eq!(rate, 2.0);
    }

    #[test]
    fn capability_display() {
        assert_eq!(Capability::ExactStochastic.to_string(), "exact-stochastic");
    }
}

#[cfg(test)]
mod placeholder_tests {
    use super::*;
    use crate::{
        Capability, DiscreteJumpRate, ExactStochasticRate, MassAction, PLACEHOLDER_RATE,
        PlaceholderRates, PropensityModel, Unimplemented,
    };

    #[test]
    fn unimplemented_is_constant_one() {
        for r in 0..5 {
            let states: [Vec<u64>; 3] = [vec![], vec![0], vec![7, 1_000_000]];
            for state in states {
                let istate: Vec<i64> = state.iter().map(|&v| v as i64).collect();
                assert_eq!(Unimplemented.discrete_jump_rate(ReactionId(r), &istate), 1.0);
                assert_eq!(Unimplemented.exact_stochastic_rate(ReactionId(r), &state), 1.0);
            }
        }
    }

    #[test]
    fn wrapper_fills_missing_capabilities() {
        let model = PlaceholderRates::new(OdeOnly);
        assert!(model.supports(Capability::DiscreteJump));
        assert!(model.supports(Capability::ExactStochastic));

        let exact = model.require_exact_stochastic().unwrap();
        assert_eq!(exact.exact_stochastic_rate(ReactionId(1), &[99]), PLACEHOLDER_RATE);
        let jump = model.require_discrete_jump().unwrap();
        assert_eq!(jump.discrete_jump_rate(ReactionId(0), &[-3]), PLACEHOLDER_RATE);

        // The real capability passes through.
        let ode = model.require_continuous().unwrap();
        assert_eq!(ode.continuous_rate(ReactionId(0), &[2.0]), 1.0);
    }

    #[test]
    fn wrapper_keeps_real_discrete_rates() {
        let net = dimer_network();
        let model = PlaceholderRates::new(MassAction::new(&net, vec![1.0, 1.0, 1.0]).unwrap());
        let exact = model.require_exact_stochastic().unwrap();
        // 2A → B with n_A = 3: 3 · 2 = 6.
        assert_eq!(exact.exact_stochastic_rate(ReactionId(0), &[3, 0]), 6.0);
    }
}

#[cfg(test)]
mod table_tests {
    use super::*;
    use crate::{Capability, PropensityError, PropensityModel, RateTableBuilder};

    #[test]
    fn registered_closures_are_called_by_index() {
        let net = dimer_network();
        let table = RateTableBuilder::new(&net)
            .continuous(ReactionId(2), |_| 0.5)
            .continuous(ReactionId(0), |x| 0.1 * x[0] * x[0])
            .continuous(ReactionId(1), |x| 0.2 * x[1])
            .build()
            .unwrap();

        let ode = table.require_continuous().unwrap();
        assert_eq!(ode.continuous_rate(ReactionId(0), &[10.0, 0.0]), 10.0);
        assert_eq!(ode.continuous_rate(ReactionId(1), &[0.0, 5.0]), 1.0);
        assert_eq!(ode.continuous_rate(ReactionId(2), &[0.0, 0.0]), 0.5);
        assert!(!table.supports(Capability::ExactStochastic));
    }

    #[test]
    fn partial_registration_rejected() {
        let net = dimer_network();
        let err = RateTableBuilder::new(&net)
            .continuous(ReactionId(0), |_| 1.0)
            .continuous(ReactionId(2), |_| 1.0)
            .build()
            .err()
            .unwrap();
        assert!(matches!(
            err,
            PropensityError::IncompleteRegistration {
                capability: Capability::Continuous,
                reaction:   ReactionId(1),
            }
        ));
    }

    #[test]
    fn out_of_range_registration_rejected() {
        let err = RateTableBuilder::with_reaction_count(1)
            .exact_stochastic(ReactionId(3), |_| 1.0)
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, PropensityError::UnknownReaction { reaction_count: 1, .. }));
    }

    #[test]
    fn duplicate_registration_rejected() {
        let err = RateTableBuilder::with_reaction_count(1)
            .discrete_jump(ReactionId(0), |_| 1.0)
            .discrete_jump(ReactionId(0), |_| 2.0)
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, PropensityError::DuplicateRegistration { .. }));
    }

    #[test]
    fn independent_capabilities() {
        let table = RateTableBuilder::with_reaction_count(1)
            .exact_stochastic(ReactionId(0), |n| n[0] as f64)
            .build()
            .unwrap();
        assert!(table.supports(Capability::ExactStochastic));
        assert!(!table.supports(Capability::Continuous));
        assert!(!table.supports(Capability::DiscreteJump));
    }
}

#[cfg(test)]
mod mass_action_tests {
    use super::*;
    use crate::{ContinuousRate, DiscreteJumpRate, ExactStochasticRate, MassAction, PropensityError};

    #[test]
    fn continuous_rates() {
        let net = dimer_network();
        let m = MassAction::new(&net, vec![0.5, 2.0, 3.0]).unwrap();
        assert_eq!(m.continuous_rate(ReactionId(0), &[4.0, 1.0]), 8.0); // 0.5 · 4²
        assert_eq!(m.continuous_rate(ReactionId(1), &[4.0, 1.5]), 3.0); // 2 · 1.5
        assert_eq!(m.continuous_rate(ReactionId(2), &[4.0, 1.5]), 3.0); // zero order
    }

    #[test]
    fn continuous_rates_finite_for_non_negative_states() {
        let net = dimer_network();
        let m = MassAction::new(&net, vec![0.5, 2.0, 3.0]).unwrap();
        for state in [[0.0, 0.0], [1e6, 1e6], [0.25, 17.0]] {
            for r in net.reaction_ids() {
                assert!(m.continuous_rate(r, &state).is_finite());
            }
        }
    }

    #[test]
    fn stochastic_rates_count_combinations() {
        let net = dimer_network();
        let m = MassAction::new(&net, vec![1.0, 1.0, 1.0]).unwrap();
        assert_eq!(m.exact_stochastic_rate(ReactionId(0), &[1, 0]), 0.0);
        assert_eq!(m.exact_stochastic_rate(ReactionId(0), &[5, 0]), 20.0);
        assert_eq!(m.discrete_jump_rate(ReactionId(0), &[5, 0]), 20.0);
        assert_eq!(m.discrete_jump_rate(ReactionId(0), &[-2, 0]), 0.0);
    }

    #[test]
    fn volume_scales_by_order() {
        let net = dimer_network();
        let m = MassAction::with_volume(&net, vec![1.0, 1.0, 1.0], 2.0).unwrap();
        assert_eq!(m.exact_stochastic_rate(ReactionId(0), &[5, 0]), 10.0); // ÷ V
        assert_eq!(m.exact_stochastic_rate(ReactionId(1), &[0, 3]), 3.0);  // first order
        assert_eq!(m.exact_stochastic_rate(ReactionId(2), &[0, 0]), 2.0);  // × V
    }

    #[test]
    fn constant_count_checked() {
        let net = dimer_network();
        let err = MassAction::new(&net, vec![1.0]).unwrap_err();
        assert!(matches!(err, PropensityError::RateCountMismatch { expected: 3, got: 1 }));
    }

    #[test]
    fn negative_constant_rejected() {
        let net = dimer_network();
        let err = MassAction::new(&net, vec![1.0, -1.0, 1.0]).unwrap_err();
        assert!(matches!(err, PropensityError::InvalidRateConstant { reaction: ReactionId(1), .. }));
    }
}
