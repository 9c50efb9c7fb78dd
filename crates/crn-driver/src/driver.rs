//! The run pipeline shared by both binaries.
//!
//! ```text
//! build network → parse args → resolve seed → build rates
//!   → assemble Simulation → solve → write output → release rates
//! ```
//!
//! The pipeline is linear.  The first error ends the run.

use std::ffi::OsString;

use crn_core::{ReactionNetwork, RunConfig};
use crn_output::{OutputSink, write_trajectories};
use crn_propensity::{MassAction, PropensityModel};
use crn_sim::{DirectMethodSolver, Rk4Solver, SimMode, SimulationBuilder, Solver};

use crate::{DriverResult, ModelDefinition};

/// Run `model` once under `mode` and write every trajectory to `sink`.
///
/// `args` excludes the program name.  `SimMode::Ode` integrates the model's
/// registered rate expressions with [`Rk4Solver`]; `SimMode::Stochastic`
/// runs [`DirectMethodSolver`] over mass-action rates built from the
/// model's rate constants.  Returns the number of output rows written.
pub fn run<M, I, T, S>(model: &M, args: I, mode: SimMode, sink: &mut S) -> DriverResult<usize>
where
    M: ModelDefinition + ?Sized,
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
    S: OutputSink + ?Sized,
{
    let network = model.build_network()?;
    log::info!(
        "model loaded: {} species, {} reactions",
        network.species_count(),
        network.reaction_count()
    );

    let config = RunConfig::parse_args(args)?;
    log::debug!("parsed arguments: {config:?}");
    let config = config.with_resolved_seed();

    match mode {
        SimMode::Ode => {
            let rates = model.rate_table(&network)?;
            simulate(&network, rates, config, mode, Rk4Solver, sink)
        }
        SimMode::Stochastic => {
            let rates = MassAction::new(&network, model.rate_constants())?;
            simulate(&network, rates, config, mode, DirectMethodSolver, sink)
        }
    }
}

/// Process arguments as text.  Tokens that are not valid Unicode are
/// converted lossily, so a bad flag value surfaces as a malformed argument.
pub fn lossy_args<I: IntoIterator<Item = OsString>>(args: I) -> impl Iterator<Item = String> {
    args.into_iter().map(|arg| arg.to_string_lossy().into_owned())
}

fn simulate<P, V, S>(
    network: &ReactionNetwork,
    rates:   P,
    config:  RunConfig,
    mode:    SimMode,
    solver:  V,
    sink:    &mut S,
) -> DriverResult<usize>
where
    P: PropensityModel,
    V: Solver,
    S: OutputSink + ?Sized,
{
    let mut sim = SimulationBuilder::new(network, rates, config).mode(mode).build()?;

    let increment = sim.increment;
    solver.solve(&mut sim, increment)?;
    log::info!("solver finished: {} trajectories", sim.trajectories.trajectory_count());

    let rows = write_trajectories(sink, network.species_names(), &sim.trajectories)?;

    sim.finish();
    Ok(rows)
}
