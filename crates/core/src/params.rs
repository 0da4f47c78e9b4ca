//! Keccak sponge parameters and protocol constants
//!
//! Sizes are in bits unless the name says otherwise.

/// Number of lanes in the Keccak state (5 × 5)
pub const LANES: usize = 25;

/// Largest supported state size (Keccak-f[1600])
pub const MAX_STATE_SIZE: usize = 1600;

/// Largest supported word (lane) size
pub const MAX_WORD_SIZE: usize = MAX_STATE_SIZE / LANES;

/// Base round count; Keccak-f[25 × 2^ℓ] runs `BASE_ROUNDS + 2ℓ` rounds
pub const BASE_ROUNDS: usize = 12;

/// Domain separation suffix for plain Keccak (no suffix)
pub const KECCAK_SUFFIX: &str = "";

/// Domain separation suffix for SHA3-x
pub const SHA3_SUFFIX: &str = "01";

/// Domain separation suffix for RawSHAKEx
pub const RAWSHAKE_SUFFIX: &str = "11";

/// Domain separation suffix for SHAKEx
pub const SHAKE_SUFFIX: &str = "1111";

/// HMAC outer pad byte
pub const HMAC_OUTER_PAD: u8 = 0x5c;

/// HMAC inner pad byte
pub const HMAC_INNER_PAD: u8 = 0x36;

/// Size of one fixed-width field in the marshalled state
pub(crate) const FIELD_SIZE: usize = 8;

/// Fields stored ahead of the lanes in a marshalled sponge
/// (rate, capacity, output, state size, word size, word mask, ℓ, rounds, phase)
pub(crate) const PARAM_FIELDS: usize = 9;

/// Byte length of a marshalled sponge without its buffered message
pub const MARSHAL_HEADER_SIZE: usize = (PARAM_FIELDS + LANES + 1) * FIELD_SIZE;
