//! Sponge parameter sets
//!
//! A [`GeneralizedSpec`] may leave any field [`Param::Automatic`]; resolving it
//! fills those fields and then runs the stricter [`ConcreteSpec`] validation,
//! which is the only way to obtain a concrete parameter set.

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::params::{LANES, MAX_STATE_SIZE, MAX_WORD_SIZE};

/// A validated `{bitrate, capacity, output}` triple, all in bits
///
/// Invariants: every field is positive, rate and capacity are multiples of 8,
/// `bitrate + capacity` is at most 1600 and a multiple of 25, and the derived
/// word size is a power of two that is a multiple of 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSpec", into = "RawSpec")]
pub struct ConcreteSpec {
    bitrate: usize,
    capacity: usize,
    output: usize,
}

#[derive(Serialize, Deserialize)]
struct RawSpec {
    bitrate: usize,
    capacity: usize,
    output: usize,
}

impl TryFrom<RawSpec> for ConcreteSpec {
    type Error = SpecError;

    fn try_from(raw: RawSpec) -> Result<Self, Self::Error> {
        ConcreteSpec::new(raw.bitrate, raw.capacity, raw.output)
    }
}

impl From<ConcreteSpec> for RawSpec {
    fn from(spec: ConcreteSpec) -> Self {
        Self {
            bitrate: spec.bitrate,
            capacity: spec.capacity,
            output: spec.output,
        }
    }
}

impl ConcreteSpec {
    /// Validate a parameter triple
    pub fn new(bitrate: usize, capacity: usize, output: usize) -> Result<Self, SpecError> {
        check(bitrate, capacity, output)?;
        Ok(Self {
            bitrate,
            capacity,
            output,
        })
    }

    /// Parameters for SHA3-x: rate `1600 - 2x`, capacity `2x`, output `x`
    pub fn sha3(x: usize) -> Result<Self, SpecError> {
        Self::from_half_capacity(x, x)
    }

    /// Parameters for Keccak-x (SHA3-x parameters, used with an empty suffix)
    pub fn keccak(x: usize) -> Result<Self, SpecError> {
        Self::sha3(x)
    }

    /// Parameters for RawSHAKEx with a `d`-bit output
    pub fn rawshake(x: usize, d: usize) -> Result<Self, SpecError> {
        Self::from_half_capacity(x, d)
    }

    /// Parameters for SHAKEx with a `d`-bit output
    ///
    /// Identical to [`ConcreteSpec::rawshake`]; the two differ only in the
    /// suffix passed to the digest.
    pub fn shake(x: usize, d: usize) -> Result<Self, SpecError> {
        Self::rawshake(x, d)
    }

    fn from_half_capacity(x: usize, output: usize) -> Result<Self, SpecError> {
        let capacity = x.checked_mul(2).ok_or(SpecError::StateTooLarge)?;
        if capacity == 0 {
            return Err(SpecError::CapacityNonPositive);
        }
        let bitrate = MAX_STATE_SIZE
            .checked_sub(capacity)
            .ok_or(SpecError::StateTooLarge)?;
        Self::new(bitrate, capacity, output)
    }

    /// Bits absorbed or squeezed per permutation
    pub fn bitrate(&self) -> usize {
        self.bitrate
    }

    /// Bits of state not exposed to input or output
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Digest length in bits
    pub fn output(&self) -> usize {
        self.output
    }

    /// `bitrate + capacity`
    pub fn state_size(&self) -> usize {
        self.bitrate + self.capacity
    }

    /// Lane width in bits
    pub fn word_size(&self) -> usize {
        self.state_size() / LANES
    }

    /// Copy of this spec with a different output size
    pub fn with_output(&self, output: usize) -> Result<Self, SpecError> {
        Self::new(self.bitrate, self.capacity, output)
    }
}

/// Check a concrete parameter triple, reporting the first violated constraint
pub fn check(bitrate: usize, capacity: usize, output: usize) -> Result<(), SpecError> {
    if bitrate == 0 {
        return Err(SpecError::BitrateNonPositive);
    }
    if bitrate % 8 != 0 {
        return Err(SpecError::BitrateMod8);
    }
    if capacity == 0 {
        return Err(SpecError::CapacityNonPositive);
    }
    if capacity % 8 != 0 {
        return Err(SpecError::CapacityMod8);
    }
    if output == 0 {
        return Err(SpecError::OutputNonPositive);
    }

    let state_size = bitrate
        .checked_add(capacity)
        .ok_or(SpecError::StateTooLarge)?;
    if state_size > MAX_STATE_SIZE {
        return Err(SpecError::StateTooLarge);
    }
    if state_size % LANES != 0 {
        return Err(SpecError::StateMod25);
    }

    let word_size = state_size / LANES;
    if word_size % 8 != 0 {
        return Err(SpecError::WordMod8);
    }
    if !word_size.is_power_of_two() {
        return Err(SpecError::WordNotPowerOfTwo);
    }

    Ok(())
}

/// A parameter that is either given or left for the resolver to choose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Param {
    #[default]
    Automatic,
    Exactly(i64),
}

impl Param {
    /// The given value, if any
    pub fn value(self) -> Option<i64> {
        match self {
            Param::Automatic => None,
            Param::Exactly(v) => Some(v),
        }
    }
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Param::Exactly(v)
    }
}

impl From<Option<i64>> for Param {
    fn from(v: Option<i64>) -> Self {
        v.map_or(Param::Automatic, Param::Exactly)
    }
}

/// A partially specified parameter set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralizedSpec {
    pub bitrate: Param,
    pub capacity: Param,
    pub output: Param,
    pub state_size: Param,
    pub word_size: Param,
}

impl GeneralizedSpec {
    /// Every field automatic
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill automatic fields and validate the result
    pub fn resolve(&self) -> Result<ConcreteSpec, SpecError> {
        let mut state_size = self.state_size.value();

        if let Some(s) = state_size {
            if s <= 0 {
                return Err(SpecError::StateNonPositive);
            }
            if s > MAX_STATE_SIZE as i64 {
                return Err(SpecError::StateTooLarge);
            }
            if s % LANES as i64 != 0 {
                return Err(SpecError::StateMod25);
            }
        }

        if let Some(w) = self.word_size.value() {
            if w <= 0 {
                return Err(SpecError::WordNonPositive);
            }
            if w > MAX_WORD_SIZE as i64 {
                return Err(SpecError::WordTooLarge);
            }
            let implied = w * LANES as i64;
            if state_size.is_some_and(|s| s != implied) {
                return Err(SpecError::StateWordIncoherency);
            }
            state_size = Some(implied);
        }

        let capacity = self.capacity.value();
        if let Some(c) = capacity {
            if c <= 0 {
                return Err(SpecError::CapacityNonPositive);
            }
            if c % 8 != 0 {
                return Err(SpecError::CapacityMod8);
            }
        }

        let bitrate = self.bitrate.value();
        if let Some(r) = bitrate {
            if r <= 0 {
                return Err(SpecError::BitrateNonPositive);
            }
            if r % 8 != 0 {
                return Err(SpecError::BitrateMod8);
            }
        }

        let output = self.output.value();
        if output.is_some_and(|n| n <= 0) {
            return Err(SpecError::OutputNonPositive);
        }

        let (bitrate, capacity) = match (bitrate, capacity, state_size) {
            (Some(r), Some(c), Some(s)) if r.checked_add(c) != Some(s) => {
                return Err(SpecError::StateSizeMismatch);
            }
            (Some(r), Some(c), _) => (r, c),
            (Some(r), None, Some(s)) => {
                let c = s - r;
                if c <= 0 {
                    return Err(SpecError::CapacityNonPositive);
                }
                (r, c)
            }
            (None, Some(c), Some(s)) => {
                let r = s - c;
                if r <= 0 {
                    return Err(SpecError::BitrateNonPositive);
                }
                (r, c)
            }
            _ => return Err(SpecError::InsufficientParameters),
        };

        let output = output.unwrap_or(capacity / 2);

        // Values are positive here; the concrete pass owns the remaining rules.
        // A value past usize::MAX cannot fit any state.
        let bitrate = usize::try_from(bitrate).map_err(|_| SpecError::StateTooLarge)?;
        let capacity = usize::try_from(capacity).map_err(|_| SpecError::StateTooLarge)?;
        let output = usize::try_from(output).map_err(|_| SpecError::OutputNonPositive)?;
        ConcreteSpec::new(bitrate, capacity, output)
    }
}

impl From<ConcreteSpec> for GeneralizedSpec {
    fn from(spec: ConcreteSpec) -> Self {
        Self {
            bitrate: Param::Exactly(spec.bitrate as i64),
            capacity: Param::Exactly(spec.capacity as i64),
            output: Param::Exactly(spec.output as i64),
            state_size: Param::Automatic,
            word_size: Param::Automatic,
        }
    }
}

impl TryFrom<GeneralizedSpec> for ConcreteSpec {
    type Error = SpecError;

    fn try_from(spec: GeneralizedSpec) -> Result<Self, Self::Error> {
        spec.resolve()
    }
}
