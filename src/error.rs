//! Facade error type

use kek_core::{SpecError, SpongeError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("sponge error: {0}")]
    Sponge(#[from] SpongeError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("configuration JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed input: {0}")]
    MalformedInput(String),
}

impl From<SpecError> for Error {
    fn from(e: SpecError) -> Self {
        Error::Sponge(SpongeError::Spec(e))
    }
}
