//! Kek: configurable Keccak hashing
//!
//! Selects a member of the Keccak family by name or by raw sponge
//! parameters, and runs it with an optional number of extra squeezes.
//!
//! # Overview
//!
//! The sponge engine lives in `kek-core` and is re-exported as
//! [`sponge`]. This crate adds the selection layer on top: a serde
//! [`HashConfig`], a reusable [`Hasher`], and the [`hash`] and [`mac`]
//! one-shot drivers.
//!
//! # Example
//!
//! ```rust
//! use kek::{Algorithm, HashConfig, hash};
//!
//! // SHA3-256
//! let digest = hash(&HashConfig::default(), b"abc").unwrap();
//! assert_eq!(digest.len(), 32);
//!
//! // The third 512-bit block of SHAKE256 output
//! let config = HashConfig::new(Algorithm::Shake, 256)
//!     .with_output(512)
//!     .with_squeezes(3);
//! let block = hash(&config, b"abc").unwrap();
//! assert_eq!(block.len(), 64);
//! ```
//!
//! # Logging
//!
//! Resolved parameters are reported through the `log` facade at debug
//! level; nothing is printed unless the application installs a logger.

// Re-export the sponge engine
pub use kek_core as sponge;

mod config;
mod error;
mod hasher;

pub use config::{Algorithm, DEFAULT_SECURITY, HashConfig};
pub use error::Error;
pub use hasher::{Hasher, hash, mac};

#[cfg(test)]
mod tests;
