//! Error type for crn-driver.

use crn_core::CrnError;
use crn_output::OutputError;
use crn_propensity::PropensityError;
use crn_sim::SimError;
use thiserror::Error;

/// Any failure of a driver run.  All of them are fatal to the process.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Core(#[from] CrnError),

    #[error(transparent)]
    Propensity(#[from] PropensityError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

pub type DriverResult<T> = Result<T, DriverError>;
