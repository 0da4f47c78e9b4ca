//! # Keccak Sponge Core
//!
//! A generalised Keccak sponge: any state size from Keccak-f[200] to
//! Keccak-f[1600], any rate/capacity split, any output length, arbitrary
//! domain separation suffixes, and a nested HMAC built on the same sponge.
//!
//! ## Features
//!
//! - **Parameter resolution**: give some of rate, capacity, output, state
//!   size and word size; the rest is derived and validated
//! - **Incremental hashing**: absorb in chunks of any size, then digest
//! - **Extendable output**: keep squeezing, or skip digests with
//!   `fast_squeeze`
//! - **Serialisable state**: marshal a computation and resume it later
//! - **Secret hygiene**: volatile wiping of lanes, buffers and key pads
//!
//! ## Standard Functions
//!
//! | Function  | Parameters                      | Suffix   |
//! |-----------|---------------------------------|----------|
//! | Keccak-x  | `ConcreteSpec::keccak(x)`       | `""`     |
//! | SHA3-x    | `ConcreteSpec::sha3(x)`         | `"01"`   |
//! | RawSHAKEx | `ConcreteSpec::rawshake(x, d)`  | `"11"`   |
//! | SHAKEx    | `ConcreteSpec::shake(x, d)`     | `"1111"` |
//!
//! ## Example
//!
//! ```rust
//! use kek_core::{ConcreteSpec, SHA3_SUFFIX, SpongeState};
//!
//! let spec = ConcreteSpec::sha3(256).unwrap();
//! let mut state = SpongeState::new(&spec).unwrap();
//!
//! state.update(b"hello ").unwrap();
//! let digest = state.digest(b"world", 0, SHA3_SUFFIX).unwrap();
//! assert_eq!(digest.len(), 32);
//! ```
//!
//! ## Bit Order
//!
//! Bytes are absorbed little-endian into each lane. Partial bytes and
//! suffix bits are taken least significant bit first.

mod codec;
mod error;
mod hmac;
mod params;
mod primitives;
mod spec;
mod sponge;
mod state;

#[cfg(feature = "ffi")]
pub mod ffi;

pub use error::{DecodeError, SpecError, SpongeError};
pub use hmac::HmacState;
pub use params::*;
pub use primitives::permute;
pub use spec::{ConcreteSpec, GeneralizedSpec, Param, check};
pub use state::{Phase, SpongeState};
