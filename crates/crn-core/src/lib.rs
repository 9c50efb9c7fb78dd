//! `crn-core`: foundational types for the `rust_crn` simulation driver.
//!
//! This crate is a dependency of every other `crn-*` crate.  It has no
//! `crn-*` dependencies and minimal external ones (`rand`, `thiserror`,
//! `log`, plus optional `serde` and `rustc-hash`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`ids`]       | `SpeciesId`, `ReactionId`                                  |
//! | [`network`]   | `ReactionNetwork`, `ReactionNetworkBuilder`, `Stoichiometry` |
//! | [`config`]    | `RunConfig` and the single-dash argument grammar           |
//! | [`time`]      | `Timeline`: the output sampling grid                      |
//! | [`rng`]       | `TrajectoryRng`: one seeded stream per trajectory         |
//! | [`error`]     | `CrnError`, `CrnResult`                                    |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `serde`   | Adds `Serialize`/`Deserialize` to ids, config, timeline. |
//! | `fx-hash` | FxHash instead of SipHash for the name → index maps.     |

pub mod config;
pub mod error;
pub mod ids;
pub mod network;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::RunConfig;
pub use error::{CrnError, CrnResult};
pub use ids::{ReactionId, SpeciesId};
pub use network::{ReactionNetwork, ReactionNetworkBuilder, Stoichiometry};
pub use rng::TrajectoryRng;
pub use time::{MAX_OUTPUT_STEPS, Timeline};
