//! The solver boundary.

use crn_propensity::PropensityModel;

use crate::{SimError, SimResult, Simulation};

/// A numerical method that fills a [`Simulation`]'s trajectory buffer.
///
/// `solve` runs synchronously to completion.  Any error is fatal to the run:
/// the buffer may be partially filled and should be discarded.
pub trait Solver {
    /// Simulate every trajectory of `sim` and append them to
    /// `sim.trajectories`.
    ///
    /// `increment` is the integration step size; `0.0` means "use the step
    /// resolved from the configuration" (`sim.increment`).
    fn solve<P: PropensityModel>(&self, sim: &mut Simulation<'_, P>, increment: f64) -> SimResult<()>;
}

/// Upper bound on fixed integration steps over a whole run.
pub const MAX_INTEGRATION_STEPS: u64 = 100_000_000;

/// Resolve the `0.0` sentinel and reject nonsensical steps.
pub(crate) fn effective_step(increment: f64, resolved: f64) -> SimResult<f64> {
    let step = if increment == 0.0 { resolved } else { increment };
    if step.is_finite() && step > 0.0 {
        Ok(step)
    } else {
        Err(SimError::Config(format!("integration step must be positive, got {step}")))
    }
}

/// Reject a step so small that integrating to `end_time` would take more
/// than [`MAX_INTEGRATION_STEPS`] steps.
pub(crate) fn check_step_budget(end_time: f64, step: f64) -> SimResult<()> {
    let steps = (end_time / step).ceil();
    if steps.is_finite() && steps <= MAX_INTEGRATION_STEPS as f64 {
        Ok(())
    } else {
        Err(SimError::Config(format!(
            "step {step} over [0, {end_time}] needs more than {MAX_INTEGRATION_STEPS} integration steps"
        )))
    }
}
