//! `crn-driver`: wires a model definition, the argument grammar, a solver
//! and an output sink into one run.
//!
//! | Module     | Contents                                              |
//! |------------|-------------------------------------------------------|
//! | [`model`]  | `ModelDefinition` (the generated-code boundary), `DecayModel` |
//! | [`driver`] | `run`: the linear build → parse → solve → write pipeline |
//! | [`error`]  | `DriverError`, `DriverResult`                         |
//!
//! Two binaries share the pipeline: `crn-ode` (deterministic, RK4) and
//! `crn-ssa` (Gillespie direct method with mass-action rates).

pub mod driver;
pub mod error;
pub mod model;


pub use driver::{lossy_args, run};
pub use error::{DriverError, DriverResult};
pub use model::{DecayModel, ModelDefinition};
