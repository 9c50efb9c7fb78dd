//! `crn-sim`: the simulation context and the solvers that consume it.
//!
//! # Lifecycle
//!
//! ```text
//! ReactionNetwork ─┐
//! PropensityModel ─┼─► SimulationBuilder::build() ─► Simulation
//! RunConfig ───────┘                                   │
//!                         Solver::solve(&mut sim, increment)
//!                                                      │
//!                  Simulation::finish() ─► TrajectoryBuffer (model released)
//! ```
//!
//! The solver is the only blocking step: it runs to completion on the
//! calling thread and fills the context's trajectory buffer in place.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | `DirectMethodSolver` fans trajectories out over Rayon.     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use crn_sim::{Rk4Solver, SimMode, SimulationBuilder, Solver};
//!
//! let mut sim = SimulationBuilder::new(&network, rates, config)
//!     .mode(SimMode::Ode)
//!     .build()?;
//! let increment = sim.increment;
//! Rk4Solver.solve(&mut sim, increment)?;
//! let trajectories = sim.finish();
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod ode;
pub mod solver;
pub mod ssa;
pub mod trajectory;

#[cfg(test)]
mod tests;

pub use builder::SimulationBuilder;
pub use context::{SimMode, Simulation};
pub use error::{SimError, SimResult};
pub use ode::Rk4Solver;
pub use solver::{MAX_INTEGRATION_STEPS, Solver};
pub use ssa::DirectMethodSolver;
pub use trajectory::TrajectoryBuffer;
