//! `crn-propensity`: reaction rate models shared by every solver family.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                        |
//! |-------------------|-----------------------------------------------------------------|
//! | [`rate`]          | `ContinuousRate`, `DiscreteJumpRate`, `ExactStochasticRate`, `PropensityModel`, `Capability` |
//! | [`placeholder`]   | `Unimplemented`, `PlaceholderRates<M>`, `PLACEHOLDER_RATE`      |
//! | [`table`]         | `RateTable`, `RateTableBuilder`: per-reaction rate closures    |
//! | [`mass_action`]   | `MassAction`: rates derived from stoichiometry                 |
//! | [`error`]         | `PropensityError`, `PropensityResult<T>`                        |
//!
//! # Design notes
//!
//! A model author writes rate expressions once; every solver family reaches
//! them through one of three capability traits.  A model declares which
//! capabilities it really implements through [`PropensityModel`], and a
//! solver asks for the one it needs with [`PropensityModel::require_continuous`]
//! (and siblings), failing with [`PropensityError::MissingCapability`] instead
//! of silently evaluating a constant.
//!
//! The constant-rate fallback still exists, but only as the explicit
//! [`PlaceholderRates`] wrapper.
//!
//! Rate evaluation is the solvers' hot path: no method here bounds-checks the
//! reaction index beyond what slice indexing does.  Callers iterate
//! `0..reaction_count()`.

pub mod error;
pub mod mass_action;
pub mod placeholder;
pub mod rate;
pub mod table;

#[cfg(test)]
mod tests;

pub use error::{PropensityError, PropensityResult};
pub use mass_action::MassAction;
pub use placeholder::{PLACEHOLDER_RATE, PlaceholderRates, Unimplemented};
pub use rate::{Capability, ContinuousRate, DiscreteJumpRate, ExactStochasticRate, PropensityModel};
pub use table::{RateTable, RateTableBuilder};
