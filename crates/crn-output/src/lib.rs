//! `crn-output`: trajectory output sinks for the rust_crn driver.
//!
//! | Feature   | Sink         | Layout                                             |
//! |-----------|--------------|----------------------------------------------------|
//! | *(none)*  | [`CsvSink`]  | wide: `trajectory,time,<species…>`, one row per point |
//! | `sqlite`  | `SqliteSink` | long: `trajectory_values(trajectory, time, species, value)` |
//!
//! Every sink implements [`OutputSink`]; [`write_trajectories`] drives one
//! from a filled [`TrajectoryBuffer`][crn_sim::TrajectoryBuffer].
//!
//! ```rust,ignore
//! let mut sink = CsvSink::stdout();
//! write_trajectories(&mut sink, network.species_names(), &buffer)?;
//! ```

pub mod csv;
pub mod error;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvSink;
pub use error::{OutputError, OutputResult};
pub use row::TrajectoryRow;
pub use writer::{OutputSink, write_trajectories};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteSink;
