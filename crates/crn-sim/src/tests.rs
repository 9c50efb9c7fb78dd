//! Integration tests for crn-sim.

use crn_core::{ReactionId, ReactionNetwork, ReactionNetworkBuilder, RunConfig, Stoichiometry};
use crn_propensity::{MassAction, RateTable, RateTableBuilder};

use crate::{SimMode, SimulationBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// `A → B` with `A₀ = 100`, `B₀ = 0`.
fn decay_network() -> ReactionNetwork {
    let mut b = ReactionNetworkBuilder::new();
    let a = b.add_species("A", 100);
    let bb = b.add_species("B", 0);
    b.add_reaction("decay", Stoichiometry::new().reactant(a, 1).product(bb, 1));
    b.build().unwrap()
}

fn decay_rates(network: &ReactionNetwork) -> RateTable {
    RateTableBuilder::new(network)
        .continuous(ReactionId(0), |x| 0.1 * x[0])
        .build()
        .unwrap()
}

fn config(args: &[&str]) -> RunConfig {
    RunConfig::from_args(args).unwrap()
}

#[cfg(test)]
mod buffer_tests {
    use crn_core::Timeline;

    use crate::{SimError, TrajectoryBuffer};

    #[test]
    fn starts_empty() {
        let buf = TrajectoryBuffer::new(Timeline::uniform(1.0, 2), 2);
        assert!(buf.is_empty());
        assert_eq!(buf.block_len(), 6);
        assert_eq!(buf.rows(0).count(), 0);
    }

    #[test]
    fn push_checks_length() {
        let mut buf = TrajectoryBuffer::new(Timeline::uniform(1.0, 2), 2);
        let err = buf.push(vec![0.0; 5]).unwrap_err();
        assert!(matches!(err, SimError::CountMismatch { expected: 6, got: 5, .. }));
    }

    #[test]
    fn rows_pair_time_with_values() {
        let mut buf = TrajectoryBuffer::new(Timeline::uniform(1.0, 2), 2);
        buf.push(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(buf.row(0, 1), Some(&[3.0, 4.0][..]));
        assert_eq!(buf.row(0, 3), None);
        assert_eq!(buf.row(1, 0), None);
        let rows: Vec<_> = buf.rows(0).collect();
        assert_eq!(rows[2], (1.0, &[5.0, 6.0][..]));
    }
}

// ── SimulationBuilder validation ──────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crn_core::CrnError;
    use crn_propensity::{Capability, PropensityError};

    use crate::SimError;

    #[test]
    fn builds_ode_by_default() {
        let net = decay_network();
        let sim = SimulationBuilder::new(&net, decay_rates(&net), config(&["-s", "1", "-ti", "10"]))
            .build()
            .unwrap();
        assert!(sim.is_ode());
        assert_eq!(sim.timeline().len(), 11);
        assert_eq!(sim.increment, 10.0);
        assert!(sim.trajectories.is_empty());
    }

    #[test]
    fn reaction_count_mismatch_errors() {
        let net = decay_network();
        let rates = RateTableBuilder::with_reaction_count(2)
            .continuous(ReactionId(0), |_| 1.0)
            .continuous(ReactionId(1), |_| 1.0)
            .build()
            .unwrap();
        let result = SimulationBuilder::new(&net, rates, config(&["-ti", "4"])).build();
        assert!(matches!(result, Err(SimError::CountMismatch { expected: 1, got: 2, .. })));
    }

    #[test]
    fn stochastic_mode_requires_exact_rates() {
        let net = decay_network();
        let result = SimulationBuilder::new(&net, decay_rates(&net), config(&["-ti", "4"]))
            .mode(SimMode::Stochastic)
            .build();
        assert!(matches!(
            result,
            Err(SimError::Propensity(PropensityError::MissingCapability(
                Capability::ExactStochastic
            )))
        ));
    }

    #[test]
    fn underivable_increment_errors() {
        let net = decay_network();
        let result = SimulationBuilder::new(&net, decay_rates(&net), config(&["-s", "3"])).build();
        assert!(matches!(result, Err(SimError::Core(CrnError::Config(_)))));
    }

    #[test]
    fn finish_releases_model_and_keeps_buffer() {
        let net = decay_network();
        let sim = SimulationBuilder::new(&net, decay_rates(&net), config(&["-ti", "2"]))
            .build()
            .unwrap();
        let buf = sim.finish();
        assert_eq!(buf.timeline().len(), 3);
        assert_eq!(buf.species_count(), 2);
    }
}

// ── ODE path ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ode_tests {
    use super::*;
    use crate::{Rk4Solver, SimError, Solver};

    #[test]
    fn decay_matches_analytic_solution() {
        let net = decay_network();
        let mut sim = SimulationBuilder::new(&net, decay_rates(&net), config(&["-e", "10", "-ti", "10", "-i", "0.1"]))
            .build()
            .unwrap();
        Rk4Solver.solve(&mut sim, 0.1).unwrap();

        assert_eq!(sim.trajectories.trajectory_count(), 1);
        for (t, row) in sim.trajectories.rows(0) {
            let expected = 100.0 * (-0.1 * t).exp();
            assert!((row[0] - expected).abs() < 1e-4, "A({t}) = {} vs {expected}", row[0]);
            assert!((row[0] + row[1] - 100.0).abs() < 1e-9, "mass not conserved at {t}");
        }
    }

    #[test]
    fn zero_increment_uses_resolved_step() {
        let net = decay_network();
        let mut sim = SimulationBuilder::new(&net, decay_rates(&net), config(&["-e", "5", "-ti", "50"]))
            .build()
            .unwrap();
        Rk4Solver.solve(&mut sim, 0.0).unwrap();
        let last = sim.trajectories.row(0, 50).unwrap();
        assert!((last[0] - 100.0 * (-0.5f64).exp()).abs() < 1e-4);
    }

    #[test]
    fn one_trajectory_regardless_of_count() {
        let net = decay_network();
        let mut sim = SimulationBuilder::new(&net, decay_rates(&net), config(&["-tr", "4", "-ti", "5"]))
            .build()
            .unwrap();
        Rk4Solver.solve(&mut sim, 0.0).unwrap();
        assert_eq!(sim.trajectories.trajectory_count(), 1);
    }

    #[test]
    fn runaway_growth_reports_non_finite() {
        let mut b = ReactionNetworkBuilder::new();
        let a = b.add_species("A", 100);
        b.add_reaction("autocatalysis", Stoichiometry::new().reactant(a, 1).product(a, 2));
        let net = b.build().unwrap();
        let rates = RateTableBuilder::new(&net)
            .continuous(ReactionId(0), |x| 1e6 * x[0] * x[0])
            .build()
            .unwrap();

        let mut sim = SimulationBuilder::new(&net, rates, config(&["-e", "1", "-ti", "1"]))
            .build()
            .unwrap();
        let err = Rk4Solver.solve(&mut sim, 0.1).unwrap_err();
        assert!(matches!(err, SimError::NonFinite { .. }));
    }

    #[test]
    fn tiny_step_rejected_before_integrating() {
        let net = decay_network();
        let mut sim = SimulationBuilder::new(&net, decay_rates(&net), config(&["-ti", "1", "-i", "1e-300"]))
            .build()
            .unwrap();
        assert!(matches!(Rk4Solver.solve(&mut sim, 0.0), Err(SimError::Config(_))));
        assert!(sim.trajectories.is_empty());
    }

    #[test]
    fn negative_increment_rejected() {
        let net = decay_network();
        let mut sim = SimulationBuilder::new(&net, decay_rates(&net), config(&["-ti", "5"]))
            .build()
            .unwrap();
        assert!(matches!(Rk4Solver.solve(&mut sim, -1.0), Err(SimError::Config(_))));
    }
}

// ── Stochastic path ───────────────────────────────────────────────────────────

#[cfg(test)]
mod ssa_tests {
    use super::*;
    use crn_propensity::PlaceholderRates;

    use crate::{DirectMethodSolver, SimError, Solver, TrajectoryBuffer};

    fn run_decay(args: &[&str]) -> TrajectoryBuffer {
        let net = decay_network();
        let rates = MassAction::new(&net, vec![0.1]).unwrap();
        let mut sim = SimulationBuilder::new(&net, rates, config(args))
            .mode(SimMode::Stochastic)
            .build()
            .unwrap();
        DirectMethodSolver.solve(&mut sim, 0.0).unwrap();
        sim.finish()
    }

    #[test]
    fn same_seed_same_trajectories() {
        let args = ["-s", "7", "-tr", "3", "-e", "20", "-ti", "40"];
        let a = run_decay(&args);
        let b = run_decay(&args);
        assert_eq!(a.trajectory_count(), 3);
        for i in 0..3 {
            assert_eq!(a.trajectory(i), b.trajectory(i));
        }
    }

    #[test]
    fn trajectory_streams_independent_of_count() {
        let few = run_decay(&["-s", "11", "-tr", "2", "-e", "20", "-ti", "20"]);
        let many = run_decay(&["-s", "11", "-tr", "5", "-e", "20", "-ti", "20"]);
        assert_eq!(few.trajectory(1), many.trajectory(1));
    }

    #[test]
    fn populations_conserved_and_integral() {
        let buf = run_decay(&["-s", "3", "-tr", "2", "-e", "30", "-ti", "30"]);
        for i in 0..buf.trajectory_count() {
            let mut prev_a = f64::INFINITY;
            for (_, row) in buf.rows(i) {
                assert_eq!(row[0] + row[1], 100.0);
                assert_eq!(row[0].fract(), 0.0);
                assert!(row[0] <= prev_a, "A must never increase under pure decay");
                prev_a = row[0];
            }
        }
    }

    #[test]
    fn zero_trajectory_count_runs_one() {
        let buf = run_decay(&["-s", "5", "-e", "10", "-ti", "10"]);
        assert_eq!(buf.trajectory_count(), 1);
        assert_eq!(buf.row(0, 0), Some(&[100.0, 0.0][..]));
    }

    #[test]
    fn exhausted_state_is_held() {
        // k large enough that every A decays long before t = 1000.
        let net = decay_network();
        let rates = MassAction::new(&net, vec![50.0]).unwrap();
        let mut sim = SimulationBuilder::new(&net, rates, config(&["-s", "1", "-e", "1000", "-ti", "10"]))
            .mode(SimMode::Stochastic)
            .build()
            .unwrap();
        DirectMethodSolver.solve(&mut sim, 0.0).unwrap();
        assert_eq!(sim.trajectories.row(0, 10), Some(&[0.0, 100.0][..]));
    }

    #[test]
    fn placeholder_rates_can_drive_populations_negative() {
        // The constant placeholder keeps firing even when A is exhausted.
        let mut b = ReactionNetworkBuilder::new();
        let a = b.add_species("A", 0);
        b.add_reaction("consume", Stoichiometry::new().reactant(a, 1));
        let net = b.build().unwrap();
        let rates = PlaceholderRates::new(
            RateTableBuilder::new(&net)
                .continuous(ReactionId(0), |x| x[0])
                .build()
                .unwrap(),
        );

        let mut sim = SimulationBuilder::new(&net, rates, config(&["-s", "1", "-e", "1000", "-ti", "1"]))
            .mode(SimMode::Stochastic)
            .build()
            .unwrap();
        let err = DirectMethodSolver.solve(&mut sim, 0.0).unwrap_err();
        assert!(matches!(err, SimError::NegativePopulation { .. }));
    }

    #[test]
    fn competing_reactions_split_by_rate() {
        // A → B at k = 1 and A → C at k = 3: each A ends up as B with p = 1/4.
        let mut b = ReactionNetworkBuilder::new();
        let a = b.add_species("A", 1000);
        let to_b = b.add_species("B", 0);
        let to_c = b.add_species("C", 0);
        b.add_reaction("slow", Stoichiometry::new().reactant(a, 1).product(to_b, 1));
        b.add_reaction("fast", Stoichiometry::new().reactant(a, 1).product(to_c, 1));
        let net = b.build().unwrap();
        let rates = MassAction::new(&net, vec![1.0, 3.0]).unwrap();

        let mut sim = SimulationBuilder::new(&net, rates, config(&["-s", "2024", "-e", "100", "-ti", "1"]))
            .mode(SimMode::Stochastic)
            .build()
            .unwrap();
        DirectMethodSolver.solve(&mut sim, 0.0).unwrap();

        let last = sim.trajectories.row(0, 1).unwrap();
        assert_eq!(last[0], 0.0);
        assert_eq!(last[1] + last[2], 1000.0);
        // 250 ± 5σ (σ ≈ 13.7)
        assert!((180.0..=320.0).contains(&last[1]), "B = {}", last[1]);
    }

    #[test]
    fn selection_walks_cumulative_propensity() {
        use crate::ssa::select_reaction;

        let a = [1.0, 2.0, 0.0];
        assert_eq!(select_reaction(&a, 0.5), ReactionId(0));
        assert_eq!(select_reaction(&a, 1.0), ReactionId(0));
        assert_eq!(select_reaction(&a, 1.5), ReactionId(1));
        assert_eq!(select_reaction(&a, 3.0), ReactionId(1));
        // Rounding overshoot falls back to the last reaction that can fire.
        assert_eq!(select_reaction(&a, 3.0 + 1e-12), ReactionId(1));
    }

    #[test]
    fn invalid_propensity_reported() {
        let net = decay_network();
        let rates = RateTableBuilder::new(&net)
            .exact_stochastic(ReactionId(0), |_| -1.0)
            .build()
            .unwrap();
        let mut sim = SimulationBuilder::new(&net, rates, config(&["-ti", "2"]))
            .mode(SimMode::Stochastic)
            .build()
            .unwrap();
        let err = DirectMethodSolver.solve(&mut sim, 0.0).unwrap_err();
        assert!(matches!(err, SimError::InvalidPropensity { .. }));
    }
}
