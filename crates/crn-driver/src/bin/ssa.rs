//! crn-ssa: exact stochastic runs of the bundled model.
//!
//! Same flags as `crn-ode`.  `-tr` sets the number of independent
//! trajectories; `-s` fixes the seed for reproducible output.

use anyhow::Result;

use crn_driver::{DecayModel, lossy_args, run};
use crn_output::CsvSink;
use crn_sim::SimMode;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut sink = CsvSink::stdout();
    run(&DecayModel::default(), lossy_args(std::env::args_os().skip(1)), SimMode::Stochastic, &mut sink)?;
    Ok(())
}
