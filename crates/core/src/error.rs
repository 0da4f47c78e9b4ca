//! Error types for the sponge engine

use std::collections::TryReserveError;

use thiserror::Error;

/// A violated sponge parameter constraint
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecError {
    #[error("the state size must be positive")]
    StateNonPositive,

    #[error("the state size is too large, may not exceed 1600")]
    StateTooLarge,

    #[error("the state size must be a multiple of 25")]
    StateMod25,

    #[error("the word size must be positive")]
    WordNonPositive,

    #[error("the word size is too large, may not exceed 64")]
    WordTooLarge,

    #[error("the state size must be exactly 25 times the word size")]
    StateWordIncoherency,

    #[error("the rate plus the capacity must equal the state size")]
    StateSizeMismatch,

    #[error("the capacity must be positive")]
    CapacityNonPositive,

    #[error("the capacity must be a multiple of 8")]
    CapacityMod8,

    #[error("the rate must be positive")]
    BitrateNonPositive,

    #[error("the rate must be a multiple of 8")]
    BitrateMod8,

    #[error("the output size must be positive")]
    OutputNonPositive,

    #[error("the word size must be a power of 2")]
    WordNotPowerOfTwo,

    #[error("the word size must be a multiple of 8")]
    WordMod8,

    #[error("insufficient parameters: two of rate, capacity and state size are required")]
    InsufficientParameters,
}

/// Failure to restore a marshalled state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("marshalled state is truncated: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    #[error("marshalled state has invalid parameters: {0}")]
    Spec(#[from] SpecError),

    #[error("marshalled state is inconsistent: {0}")]
    Inconsistent(&'static str),
}

/// Errors returned by sponge and HMAC operations
#[derive(Error, Debug)]
pub enum SpongeError {
    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
