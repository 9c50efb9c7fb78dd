//! crn-ode: deterministic run of the bundled model.
//!
//! ```text
//! crn-ode [-s <seed>] [-e <end time>] [-i <increment>] [-tr <trajectories>] [-ti <timesteps>]
//! ```
//!
//! Trajectories go to stdout as CSV; logs go to stderr (`RUST_LOG` to
//! raise the level above `warn`).

use anyhow::Result;

use crn_driver::{DecayModel, lossy_args, run};
use crn_output::CsvSink;
use crn_sim::SimMode;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut sink = CsvSink::stdout();
    run(&DecayModel::default(), lossy_args(std::env::args_os().skip(1)), SimMode::Ode, &mut sink)?;
    Ok(())
}
