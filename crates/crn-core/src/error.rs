//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CrnError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::SpeciesId;

/// The top-level error type for `crn-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CrnError {
    /// Two species (or two reactions) share a name.  Fatal: the run aborts
    /// before any argument parsing or solving happens.
    #[error("duplicate {kind} name {name:?}")]
    DuplicateName { kind: &'static str, name: String },

    #[error("{what} length {got} does not match species count {expected}")]
    LengthMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("species {0} not found")]
    SpeciesNotFound(SpeciesId),

    /// A flag's value token could not be parsed as the expected type.
    #[error("malformed value {value:?} for flag {flag}: expected {expected}")]
    MalformedArgument {
        flag:     String,
        value:    String,
        expected: &'static str,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `crn-*` crates.
pub type CrnResult<T> = Result<T, CrnError>;
