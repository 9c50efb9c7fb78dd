use crn_core::{CrnError, ReactionId, SpeciesId};
use crn_propensity::PropensityError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match {expected}")]
    CountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("{species} became non-finite at t = {time}")]
    NonFinite { species: SpeciesId, time: f64 },

    #[error("{reaction} drove {species} negative at t = {time}")]
    NegativePopulation {
        reaction: ReactionId,
        species:  SpeciesId,
        time:     f64,
    },

    #[error("{reaction} has invalid propensity {value} at t = {time}")]
    InvalidPropensity {
        reaction: ReactionId,
        value:    f64,
        time:     f64,
    },

    #[error(transparent)]
    Core(#[from] CrnError),

    #[error(transparent)]
    Propensity(#[from] PropensityError),
}

pub type SimResult<T> = Result<T, SimError>;
