use thiserror::Error;

use crn_core::ReactionId;

use crate::Capability;

#[derive(Debug, Error)]
pub enum PropensityError {
    /// A solver needs a rate capability the model does not implement.
    #[error("propensity model does not implement {0} rates")]
    MissingCapability(Capability),

    #[error("rate registered for {reaction}, but the network has {reaction_count} reactions")]
    UnknownReaction {
        reaction:       ReactionId,
        reaction_count: usize,
    },

    #[error("{capability} rate registered twice for {reaction}")]
    DuplicateRegistration {
        capability: Capability,
        reaction:   ReactionId,
    },

    /// Some, but not all, reactions have a rate of this kind.
    #[error("{capability} rates registered for some reactions but not {reaction}")]
    IncompleteRegistration {
        capability: Capability,
        reaction:   ReactionId,
    },

    #[error("{got} rate constants supplied for {expected} reactions")]
    RateCountMismatch { expected: usize, got: usize },

    #[error("rate constant {value} for {reaction} must be finite and non-negative")]
    InvalidRateConstant { reaction: ReactionId, value: f64 },

    #[error("system volume must be finite and positive, got {0}")]
    InvalidVolume(f64),
}

pub type PropensityResult<T> = Result<T, PropensityError>;
